use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wsn_simulation::ProtocolKind;

use crate::ParamArgs;

pub fn run(params: &ParamArgs) -> Result<(), String> {
    let config = super::load_config(params)?;

    println!(
        "  {} {}",
        "Protocol comparison".bold(),
        format!(
            "({} nodes, {} rounds, seed={})",
            config.node_count, config.max_rounds, config.seed
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Protocol",
        "Alive",
        "Residual",
        "Mean",
        "Min",
        "Max",
        "First depletion",
    ]);

    // Same seed, so every protocol starts from the same node layout.
    for kind in ProtocolKind::ALL {
        let sim = super::simulate(config.clone(), kind)?;
        let summary = sim.current_snapshot().summary();
        let first = sim
            .first_depletion()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            kind.label().to_string(),
            format!("{}/{}", summary.alive, config.node_count),
            format!("{:.2}", summary.total_energy),
            format!("{:.2}", summary.mean_energy),
            format!("{:.2}", summary.min_energy),
            format!("{:.2}", summary.max_energy),
            first,
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}
