//! # cadence
//!
//! Command-line front end for the cadence scheduling engine.
//!
//! ## Usage
//!
//! ```bash
//! # Build a schedule from a workload file
//! cadence build workload.json --strategy earliest
//!
//! # Independent resource sets
//! cadence partition workload.json
//!
//! # Merge two workloads
//! cadence merge a.json b.json --mode tetris --align right
//!
//! # Walk forward from a frontier until a blocking operation
//! cadence frontier workload.json --start q0=0,q1=0 --blocker measure
//!
//! # Configuration
//! cadence config --show
//! cadence config --set-strategy inline
//! ```
//!
//! A workload is a JSON array. Each entry is an operation
//! `{"name": "cz", "resources": ["q0", "q1"]}` or a verbatim slot
//! `{"slot": [...]}`. Operations may carry `reads`/`writes` classical keys
//! or a nested `body` workload.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;
mod workload;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Cadence CLI
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter, e.g. `debug` or `cadence_schedule=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a schedule from a workload
    Build(commands::build::BuildCommand),
    /// List independent resource sets
    Partition(commands::partition::PartitionCommand),
    /// Zip or tetris-merge two workloads
    Merge(commands::merge::MergeCommand),
    /// Reachable frontier from a starting point
    Frontier(commands::frontier::FrontierCommand),
    /// Show or edit configuration
    Config(commands::config::ConfigCommand),
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    // Load config
    let mut config = Config::load();

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));

    let result = match cli.command {
        Commands::Build(cmd) => cmd.execute(&config, cli.json),
        Commands::Partition(cmd) => cmd.execute(&config, cli.json),
        Commands::Merge(cmd) => cmd.execute(&config, cli.json),
        Commands::Frontier(cmd) => cmd.execute(&config, cli.json),
        Commands::Config(cmd) => cmd.execute(&mut config, cli.json),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
