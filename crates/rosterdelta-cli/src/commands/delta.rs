//! Delta command
//!
//! Usage: rosterdelta delta --prior <FILE> --latest <FILE> --output <FILE> [OPTIONS]

use clap::{Args, ValueEnum};
use rosterdelta_core::delta::render_human_summary;
use rosterdelta_core::errors::{ExError, ExErrorKind};
use rosterdelta_core::{compute_delta_with_report, DomainFilter, JoinMode, OutputPolicy, TableRole};
use rosterdelta_core_types::RequestId;
use rosterdelta_io::{read_table, write_table, CsvOptions};
use std::fs;
use std::path::PathBuf;

use crate::settings::Settings;

#[derive(Debug, Args)]
pub struct DeltaArgs {
    /// Earlier snapshot
    #[arg(long)]
    pub prior: PathBuf,

    /// Current snapshot; its header defines the output columns
    #[arg(long)]
    pub latest: PathBuf,

    /// Where to write the delta
    #[arg(long)]
    pub output: PathBuf,

    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub key_column: Option<String>,

    /// Exempt column (repeatable); replaces the configured set
    #[arg(long = "exempt", value_name = "COLUMN")]
    pub exempt: Vec<String>,

    /// Compare every non-key column
    #[arg(long, conflicts_with = "exempt")]
    pub no_exempt: bool,

    /// Only keep rows whose COLUMN equals VALUE
    #[arg(long, value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    pub filter: Option<DomainFilter>,

    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Literal prepended to every emitted key
    #[arg(long)]
    pub key_prefix: Option<String>,

    /// Also emit rows whose key disappeared from the latest snapshot
    #[arg(long)]
    pub include_removed: bool,

    /// Column to fill from prior when null in latest (repeatable)
    #[arg(long = "backfill", value_name = "COLUMN")]
    pub backfill: Vec<String>,

    /// Field delimiter for input and output
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Print a Markdown summary of the delta
    #[arg(long)]
    pub summary: bool,

    /// Write the classification report as JSON
    #[arg(long, value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Simple,
    Strict,
}

impl From<PolicyArg> for OutputPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Simple => OutputPolicy::Simple,
            PolicyArg::Strict => OutputPolicy::Strict,
        }
    }
}

fn parse_filter(raw: &str) -> Result<DomainFilter, String> {
    match raw.split_once('=') {
        Some((column, value)) if !column.is_empty() => Ok(DomainFilter::new(column, value)),
        _ => Err(format!("expected COLUMN=VALUE, got '{}'", raw)),
    }
}

pub fn execute(args: DeltaArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request_id = RequestId::new();
    let _span = tracing::info_span!("delta", request_id = %request_id).entered();

    run(args).map_err(|e| Box::new(e.with_request_id(request_id)) as Box<dyn std::error::Error>)
}

fn run(args: DeltaArgs) -> Result<(), ExError> {
    let settings = effective_settings(&args)?;

    let prior = read_table(&args.prior, &settings.csv, TableRole::Prior)?;
    let latest = read_table(&args.latest, &settings.csv, TableRole::Latest)?;

    let outcome = compute_delta_with_report(&prior, &latest, &settings.delta)
        .map_err(|e| ExError::from(e).with_op("compute_delta"))?;

    write_table(&args.output, &outcome.table, &settings.csv)?;

    let counts = &outcome.report.counts;
    println!(
        "{} new, {} changed, {} removed, {} unchanged, {} filtered; {} rows written to {}",
        counts.new,
        counts.changed,
        counts.removed,
        counts.unchanged,
        counts.filtered,
        outcome.table.len(),
        args.output.display()
    );

    if args.summary {
        println!();
        print!("{}", render_human_summary(&outcome.report));
    }

    if let Some(path) = &args.report_json {
        let json = serde_json::to_string_pretty(&outcome.report).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("write_report")
                .with_message(e.to_string())
        })?;
        fs::write(path, json).map_err(|e| {
            ExError::new(ExErrorKind::OutputWrite)
                .with_op("write_report")
                .with_path(path.display().to_string())
                .with_message(format!("Failed to write report: {}", e))
        })?;
    }

    Ok(())
}

/// Settings file first, then command-line overrides.
fn effective_settings(args: &DeltaArgs) -> Result<Settings, ExError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    let delta = &mut settings.delta;

    if let Some(key) = &args.key_column {
        delta.key_column = key.clone();
    }
    if args.no_exempt {
        delta.exempt_columns.clear();
    } else if !args.exempt.is_empty() {
        delta.exempt_columns = args.exempt.iter().cloned().collect();
    }
    if let Some(filter) = &args.filter {
        delta.domain_filter = Some(filter.clone());
    }
    if let Some(policy) = args.policy {
        delta.output_policy = policy.into();
    }
    if let Some(prefix) = &args.key_prefix {
        delta.key_prefix = Some(prefix.clone());
    }
    if args.include_removed {
        delta.join_mode = JoinMode::IncludeRemoved;
    }
    if !args.backfill.is_empty() {
        delta.backfill_columns = args.backfill.clone();
    }
    if let Some(delimiter) = args.delimiter {
        settings.csv = CsvOptions::with_delimiter(delimiter);
    }

    settings.delta.validate()?;
    settings.csv.delimiter_byte()?;
    Ok(settings)
}
