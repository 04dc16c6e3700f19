//! Delta computation engine.
//!
//! The core entry point is [`compute_delta_with_report`], which joins two
//! snapshots on the key column and returns the new and changed rows of the
//! latest snapshot together with a [`DeltaReport`].

use std::time::Instant;

use crate::config::{DeltaConfig, JoinMode, OutputPolicy};
use crate::delta::model::{ChangeKind, DeltaCounts, DeltaOutcome, DeltaReport};
use crate::delta::plan::{ComparisonPlan, KeyIndex};
use crate::errors::Result;
use crate::model::{Table, TableRole};
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "compute_delta";

/// Compute the delta table between `prior` and `latest`.
///
/// Shorthand for [`compute_delta_with_report`] that drops the report.
///
/// # Errors
///
/// See [`compute_delta_with_report`].
pub fn compute_delta(prior: &Table, latest: &Table, config: &DeltaConfig) -> Result<Table> {
    compute_delta_with_report(prior, latest, config).map(|outcome| outcome.table)
}

/// Compute the delta table and its classification report.
///
/// The output table always has `latest`'s header. Rows appear in latest
/// order (new and changed), followed by removed rows in prior order when
/// `join_mode` is `include_removed`.
///
/// All validation (configuration, key and filter columns, key uniqueness)
/// happens before any row is compared, so either the full delta is returned
/// or nothing is.
///
/// # Errors
///
/// - `InvalidConfig`: the configuration fails validation
/// - `MissingColumn`: the key column is absent from either table, or the
///   domain filter column is absent from `latest`
/// - `NullKey` / `DuplicateKey`: a key is empty or repeats within one table
pub fn compute_delta_with_report(
    prior: &Table,
    latest: &Table,
    config: &DeltaConfig,
) -> Result<DeltaOutcome> {
    let started = Instant::now();
    log_op_start!(
        OP,
        prior_rows = prior.len(),
        latest_rows = latest.len(),
        key_column = config.key_column.as_str()
    );

    match run(prior, latest, config) {
        Ok(outcome) => {
            log_op_end!(
                OP,
                duration_ms = started.elapsed().as_millis() as u64,
                output_rows = outcome.table.len(),
                new = outcome.report.counts.new,
                changed = outcome.report.counts.changed,
                removed = outcome.report.counts.removed
            );
            Ok(outcome)
        }
        Err(err) => {
            log_op_error!(OP, err.clone(), duration_ms = started.elapsed().as_millis() as u64);
            Err(err)
        }
    }
}

fn run(prior: &Table, latest: &Table, config: &DeltaConfig) -> Result<DeltaOutcome> {
    let plan = ComparisonPlan::build(prior, latest, config)?;
    let prior_keys = KeyIndex::build(prior, plan.key_prior, TableRole::Prior)?;
    let latest_keys = KeyIndex::build(latest, plan.key_latest, TableRole::Latest)?;

    for column in &plan.ignored_exempt {
        tracing::warn!(
            component = module_path!(),
            op = OP,
            column = column.as_str(),
            "exempt column not present in latest snapshot; ignored"
        );
    }

    let strict = config.output_policy == OutputPolicy::Strict;
    let mut emitter = Emitter::new(prior, latest, &plan, config)?;

    for (row, record) in latest.rows().iter().enumerate() {
        let key = latest_keys.keys[row];

        if let Some(filter) = &plan.filter {
            if !filter.admits_latest(record) {
                emitter.report.counts.filtered += 1;
                continue;
            }
        }

        let Some(prior_row) = prior_keys.row_of(key) else {
            emitter.emit(key, ChangeKind::New, Vec::new(), record.values().to_vec())?;
            continue;
        };

        let prior_record = &prior.rows()[prior_row];
        let changed = plan.changed_columns(record, prior_record);
        if changed.is_empty() {
            emitter.report.counts.unchanged += 1;
            continue;
        }

        let mut values = record.values().to_vec();
        plan.apply_backfill(&mut values, prior_record);
        if strict {
            plan.blank_exempt(&mut values);
        }
        emitter.emit(key, ChangeKind::Changed, changed, values)?;
    }

    if config.join_mode == JoinMode::IncludeRemoved {
        for (row, record) in prior.rows().iter().enumerate() {
            let key = prior_keys.keys[row];
            if latest_keys.contains(key) {
                continue;
            }
            if let Some(filter) = &plan.filter {
                if !filter.admits_prior(record) {
                    emitter.report.counts.filtered += 1;
                    continue;
                }
            }

            let mut values = plan.project_prior(record);
            if strict {
                plan.blank_exempt(&mut values);
            }
            emitter.emit(key, ChangeKind::Removed, Vec::new(), values)?;
        }
    }

    Ok(emitter.finish())
}

/// Accumulates output rows and their report entries.
struct Emitter<'a> {
    table: Table,
    report: DeltaReport,
    key_pos: usize,
    key_prefix: Option<&'a str>,
}

impl<'a> Emitter<'a> {
    fn new(
        prior: &Table,
        latest: &Table,
        plan: &ComparisonPlan,
        config: &'a DeltaConfig,
    ) -> Result<Self> {
        let compared = plan.compared_names();
        let report = DeltaReport {
            report_schema_version: 1,
            key_column: config.key_column.clone(),
            output_policy: config.output_policy,
            join_mode: config.join_mode,
            column_change_counts: compared.iter().map(|c| (c.clone(), 0)).collect(),
            compared_columns: compared,
            ignored_exempt_columns: plan.ignored_exempt.clone(),
            counts: DeltaCounts {
                latest_rows: latest.len(),
                prior_rows: prior.len(),
                ..DeltaCounts::default()
            },
            entries: Vec::new(),
        };
        Ok(Self {
            table: Table::new(latest.columns().to_vec())?,
            report,
            key_pos: plan.key_latest,
            key_prefix: config.key_prefix.as_deref(),
        })
    }

    /// Record the classification against the raw key, then write the row
    /// with the prefixed key.
    fn emit(
        &mut self,
        key: &str,
        kind: ChangeKind,
        changed_columns: Vec<String>,
        mut values: Vec<Option<String>>,
    ) -> Result<()> {
        tracing::debug!(
            component = module_path!(),
            op = OP,
            key = key,
            kind = ?kind,
            changed_columns = ?changed_columns,
            "delta row"
        );

        if let Some(prefix) = self.key_prefix {
            values[self.key_pos] = Some(format!("{}{}", prefix, key));
        }
        self.report.record(key, kind, changed_columns);
        self.table.push_row(values)
    }

    fn finish(self) -> DeltaOutcome {
        DeltaOutcome {
            table: self.table,
            report: self.report,
        }
    }
}
