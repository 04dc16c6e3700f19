//! Config command
//!
//! Usage: rosterdelta config show [--config <FILE>]

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// TOML settings file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ConfigCommand::Show(show_args) => execute_show(show_args),
    }
}

fn execute_show(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(args.config.as_deref())?;
    print!("{}", settings.to_toml_string()?);
    Ok(())
}
