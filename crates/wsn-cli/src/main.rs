//! CLI frontend for the WSN round simulator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wsn_simulation::ProtocolKind;

#[derive(Parser)]
#[command(
    name = "wsn",
    about = "Round-based simulator for energy-constrained wireless sensor networks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the defaults or a `--config` file.
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// JSON file with configuration options (missing keys use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rounds to simulate
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Number of sensor nodes
    #[arg(short, long)]
    nodes: Option<usize>,

    /// RNG seed for node placement and protocol draws
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one protocol and print per-round and final node tables
    Run {
        /// Protocol: leach, csma, diffusion
        #[arg(short, long, default_value = "leach")]
        protocol: ProtocolKind,

        /// Show the event log and per-round table
        #[arg(short, long)]
        verbose: bool,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Simulate one protocol and write every round snapshot as JSON
    Export {
        /// Protocol: leach, csma, diffusion
        #[arg(short, long, default_value = "leach")]
        protocol: ProtocolKind,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Run all three protocols on the same layout and compare residual energy
    Compare {
        #[command(flatten)]
        params: ParamArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            protocol,
            verbose,
            params,
        } => commands::run::run(&params, protocol, verbose),
        Commands::Export {
            protocol,
            output,
            params,
        } => commands::export::run(&params, protocol, output.as_deref()),
        Commands::Compare { params } => commands::compare::run(&params),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
