use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wsn_core::NodeState;
use wsn_simulation::{Annotations, ProtocolKind, RoundSnapshot, SimEventKind};

use crate::ParamArgs;

pub fn run(params: &ParamArgs, protocol: ProtocolKind, verbose: bool) -> Result<(), String> {
    let config = super::load_config(params)?;
    let sim = super::simulate(config, protocol)?;
    let config = sim.config();

    println!(
        "  {} {} {}",
        "Simulation".bold(),
        protocol.label(),
        format!(
            "({} nodes, {} rounds, seed={})",
            config.node_count, config.max_rounds, config.seed
        )
        .dimmed()
    );
    let last = sim.current_snapshot();
    let summary = last.summary();
    println!(
        "  {} of {} nodes alive, {:.2} J residual, {} events logged",
        summary.alive,
        config.node_count,
        summary.total_energy,
        sim.events().len()
    );
    match sim.first_depletion() {
        Some(round) => println!("  First node depleted in round {round}"),
        None => println!("  No node depleted"),
    }
    println!();

    if verbose {
        println!("  {}", "Rounds".bold().underline());
        println!();
        println!("{}", round_table(sim.history()));
        println!();

        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in sim.events().events() {
            let round_label = format!("[round {:>3}]", event.round).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {round_label} {desc}");
        }
        if sim.events().is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    }

    println!("  {}", "Node Status".bold().underline());
    println!();
    println!("{}", node_table(last, config.initial_energy));
    println!();

    Ok(())
}

fn round_table(history: &[RoundSnapshot]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Round", "Alive", "Drained", "Residual", "Heads", "Isolated", "Tx", "Origin",
    ]);
    for snapshot in history {
        let summary = snapshot.summary();
        table.add_row(vec![
            summary.round.to_string(),
            summary.alive.to_string(),
            format!("{:.2}", summary.drained),
            format!("{:.2}", summary.total_energy),
            tag_count(snapshot, |t| t.cluster_head),
            tag_count(snapshot, |t| t.isolated),
            tag_count(snapshot, |t| t.transmitting),
            tag_count(snapshot, |t| t.originator),
        ]);
    }
    table
}

fn tag_count(snapshot: &RoundSnapshot, pred: impl Fn(&Annotations) -> bool) -> String {
    snapshot
        .nodes
        .iter()
        .filter(|n| pred(&n.tags))
        .count()
        .to_string()
}

fn node_table(snapshot: &RoundSnapshot, initial_energy: f64) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Node", "Position", "Energy", "State", "Tags"]);
    for node in &snapshot.nodes {
        let state = match node.state {
            NodeState::Active => node.state.to_string().green().to_string(),
            NodeState::Inactive => node.state.to_string().red().to_string(),
        };
        table.add_row(vec![
            node.id.to_string(),
            node.position.to_string(),
            format_energy_bar(node.energy, initial_energy),
            state,
            node.tags.labels().join(", "),
        ]);
    }
    table
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::NodeDepleted { .. } => description.red(),
        SimEventKind::NetworkDepleted => description.red().bold(),
        SimEventKind::NoClusterHeads => description.yellow(),
    }
}

fn format_energy_bar(energy: f64, initial: f64) -> String {
    let ratio = if initial > 0.0 {
        (energy / initial).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * 10.0).round() as usize;
    let empty = 10_usize.saturating_sub(filled);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));

    if ratio <= 0.15 {
        format!("[{}] {:>6.2}", bar.red(), energy)
    } else if ratio <= 0.4 {
        format!("[{}] {:>6.2}", bar.yellow(), energy)
    } else {
        format!("[{}] {:>6.2}", bar.green(), energy)
    }
}
