use std::path::Path;

use wsn_simulation::{ProtocolKind, Simulation};

use crate::ParamArgs;

pub fn run(params: &ParamArgs, protocol: ProtocolKind, output: Option<&Path>) -> Result<(), String> {
    let config = super::load_config(params)?;
    let sim = super::simulate(config, protocol)?;
    let content = export_json(&sim)?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported {} rounds to {}", sim.latest_round(), path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}

fn export_json(sim: &Simulation) -> Result<String, String> {
    let export = serde_json::json!({
        "protocol": sim.protocol(),
        "config": sim.config(),
        "setup": sim.initial_snapshot(),
        "rounds": sim.history(),
    });

    serde_json::to_string_pretty(&export).map_err(|e| format!("JSON serialization error: {e}"))
}
