//! rosterdelta CLI
//!
//! Command-line interface for computing snapshot deltas

use clap::{Parser, Subcommand, ValueEnum};
use rosterdelta_core::logging_facility::{init, Profile};

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "rosterdelta")]
#[command(about = "rosterdelta - New and changed records between two snapshots", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the delta between a prior and a latest snapshot
    Delta(commands::delta::DeltaArgs),
    /// Configuration operations
    Config(commands::config::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Delta(args) => commands::delta::execute(args),
        Commands::Config(args) => commands::config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
