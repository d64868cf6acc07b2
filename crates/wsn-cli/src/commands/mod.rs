pub mod compare;
pub mod export;
pub mod run;

use wsn_simulation::{ProtocolKind, Simulation, WsnConfig};

use crate::ParamArgs;

/// Build the configuration from defaults, an optional JSON file, and flag overrides.
fn load_config(params: &ParamArgs) -> Result<WsnConfig, String> {
    let mut config: WsnConfig = match &params.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => WsnConfig::default(),
    };

    if let Some(rounds) = params.rounds {
        config.max_rounds = rounds;
    }
    if let Some(nodes) = params.nodes {
        config.node_count = nodes;
    }
    if let Some(seed) = params.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Set up a simulation and run it to the last round.
fn simulate(config: WsnConfig, protocol: ProtocolKind) -> Result<Simulation, String> {
    let mut sim = Simulation::initialize(config, protocol, None).map_err(|e| e.to_string())?;
    sim.run_to_completion()
        .map_err(|e| format!("simulation error: {e}"))?;
    Ok(sim)
}
