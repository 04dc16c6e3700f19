//! Delta output types.
//!
//! The report is a side product of the delta table: it records how every
//! emitted row was classified and how many rows fell into each bucket.
//! Collections use `BTreeMap` and ordered `Vec` for deterministic serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{JoinMode, OutputPolicy};
use crate::model::Table;

/// Where a key was found when joining the two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Key only in latest
    New,
    /// Key in both snapshots
    Matched,
    /// Key only in prior
    Removed,
}

/// Why a row was emitted into the delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// New key, emitted with every latest column
    New,
    /// Matched key with at least one compared column changed
    Changed,
    /// Key dropped from latest (only when removals are reported)
    Removed,
}

impl ChangeKind {
    /// Join provenance that produces this kind of row
    pub fn provenance(&self) -> Provenance {
        match self {
            ChangeKind::New => Provenance::New,
            ChangeKind::Changed => Provenance::Matched,
            ChangeKind::Removed => Provenance::Removed,
        }
    }
}

/// Classification of one emitted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEntry {
    /// Raw key as joined (before any prefix is applied)
    pub key: String,
    pub kind: ChangeKind,
    /// Compared columns whose value changed; empty for new and removed rows
    pub changed_columns: Vec<String>,
}

/// Row counts for one delta computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaCounts {
    pub latest_rows: usize,
    pub prior_rows: usize,
    pub new: usize,
    pub changed: usize,
    pub removed: usize,
    /// Matched rows with no change in any compared column
    pub unchanged: usize,
    /// Rows dropped by the domain filter
    pub filtered: usize,
}

impl DeltaCounts {
    /// Number of rows written to the delta table
    pub fn emitted(&self) -> usize {
        self.new + self.changed + self.removed
    }
}

/// Structured account of a delta computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    /// Schema version of this report structure (always 1)
    pub report_schema_version: u32,
    pub key_column: String,
    pub output_policy: OutputPolicy,
    pub join_mode: JoinMode,
    /// Latest columns that took part in change detection, in header order
    pub compared_columns: Vec<String>,
    /// Exempt column names that were not present in latest
    pub ignored_exempt_columns: Vec<String>,
    pub counts: DeltaCounts,
    /// Changed-row count per compared column (zero entries included)
    pub column_change_counts: BTreeMap<String, usize>,
    /// One entry per emitted row, in output order
    pub entries: Vec<DeltaEntry>,
}

impl DeltaReport {
    /// True when no row was emitted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind, in output order
    pub fn entries_of(&self, kind: ChangeKind) -> impl Iterator<Item = &DeltaEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub(crate) fn record(&mut self, key: &str, kind: ChangeKind, changed_columns: Vec<String>) {
        match kind {
            ChangeKind::New => self.counts.new += 1,
            ChangeKind::Changed => {
                self.counts.changed += 1;
                for column in &changed_columns {
                    if let Some(count) = self.column_change_counts.get_mut(column) {
                        *count += 1;
                    }
                }
            }
            ChangeKind::Removed => self.counts.removed += 1,
        }
        self.entries.push(DeltaEntry {
            key: key.to_string(),
            kind,
            changed_columns,
        });
    }
}

/// The delta table together with its report.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaOutcome {
    pub table: Table,
    pub report: DeltaReport,
}
