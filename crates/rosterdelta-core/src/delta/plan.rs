//! Column plan and key index for one delta computation.
//!
//! Everything that depends only on the two headers and the configuration is
//! resolved here once, before any row is compared: column positions in both
//! tables, the compared set `latest \ exempt \ {key}`, the exempt positions
//! blanked under the strict policy, and the domain filter position.

use std::collections::HashMap;

use rosterdelta_core_types::Sensitive;

use crate::config::{DeltaConfig, DomainFilter};
use crate::errors::{DeltaError, Result};
use crate::model::{Record, Table, TableRole};

/// A latest column with its position in both tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnPair {
    pub name: String,
    pub latest: usize,
    /// `None` when prior's header lacks the column
    pub prior: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct FilterPlan {
    pub filter: DomainFilter,
    pub latest: usize,
    pub prior: Option<usize>,
}

impl FilterPlan {
    pub fn admits_latest(&self, record: &Record) -> bool {
        self.filter.admits(record.get(self.latest))
    }

    pub fn admits_prior(&self, record: &Record) -> bool {
        self.filter.admits(self.prior.and_then(|i| record.get(i)))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ComparisonPlan {
    pub key_latest: usize,
    pub key_prior: usize,
    pub compared: Vec<ColumnPair>,
    pub exempt_latest: Vec<usize>,
    pub ignored_exempt: Vec<String>,
    pub backfill: Vec<ColumnPair>,
    pub filter: Option<FilterPlan>,
    /// For each latest column, its position in prior
    pub latest_to_prior: Vec<Option<usize>>,
}

impl ComparisonPlan {
    /// Resolve the plan, validating configuration and both headers.
    pub fn build(prior: &Table, latest: &Table, config: &DeltaConfig) -> Result<Self> {
        config.validate()?;

        let key = config.key_column.as_str();
        let key_latest = latest
            .column_index(key)
            .ok_or_else(|| missing(key, TableRole::Latest))?;
        let key_prior = prior
            .column_index(key)
            .ok_or_else(|| missing(key, TableRole::Prior))?;

        let filter = match &config.domain_filter {
            Some(filter) => Some(FilterPlan {
                latest: latest
                    .column_index(&filter.column)
                    .ok_or_else(|| missing(&filter.column, TableRole::Latest))?,
                prior: prior.column_index(&filter.column),
                filter: filter.clone(),
            }),
            None => None,
        };

        let latest_to_prior: Vec<Option<usize>> = latest
            .columns()
            .iter()
            .map(|c| prior.column_index(c))
            .collect();

        let pair = |latest_pos: usize| ColumnPair {
            name: latest.columns()[latest_pos].clone(),
            latest: latest_pos,
            prior: latest_to_prior[latest_pos],
        };

        let mut compared = Vec::new();
        let mut exempt_latest = Vec::new();
        for (pos, column) in latest.columns().iter().enumerate() {
            if pos == key_latest {
                continue;
            }
            if config.exempt_columns.contains(column) {
                exempt_latest.push(pos);
            } else {
                compared.push(pair(pos));
            }
        }

        let ignored_exempt = config
            .exempt_columns
            .iter()
            .filter(|c| !latest.has_column(c))
            .cloned()
            .collect();

        let backfill = config
            .backfill_columns
            .iter()
            .filter_map(|c| latest.column_index(c))
            .filter(|pos| *pos != key_latest)
            .map(pair)
            .collect();

        Ok(Self {
            key_latest,
            key_prior,
            compared,
            exempt_latest,
            ignored_exempt,
            backfill,
            filter,
            latest_to_prior,
        })
    }

    /// Compared columns that changed between a matched pair of records.
    ///
    /// A column changed iff the prior cell is non-null and differs from the
    /// latest cell. A null or absent prior cell is no baseline and never
    /// marks the column changed.
    pub fn changed_columns(&self, latest: &Record, prior: &Record) -> Vec<String> {
        self.compared
            .iter()
            .filter(|pair| {
                let Some(before) = pair.prior.and_then(|i| prior.get(i)) else {
                    return false;
                };
                let after = latest.get(pair.latest);
                let changed = after != Some(before);
                if changed {
                    tracing::trace!(
                        component = module_path!(),
                        column = %pair.name,
                        prior = ?Sensitive::new(before),
                        latest = ?Sensitive::new(after),
                        "cell changed"
                    );
                }
                changed
            })
            .map(|pair| pair.name.clone())
            .collect()
    }

    /// Fill null backfill cells of `values` from `prior`.
    pub fn apply_backfill(&self, values: &mut [Option<String>], prior: &Record) {
        for pair in &self.backfill {
            if values[pair.latest].is_none() {
                values[pair.latest] = pair.prior.and_then(|i| prior.get(i)).map(str::to_string);
            }
        }
    }

    /// Null every exempt cell (strict projection).
    pub fn blank_exempt(&self, values: &mut [Option<String>]) {
        for &pos in &self.exempt_latest {
            values[pos] = None;
        }
    }

    /// Project a prior record onto the latest header.
    pub fn project_prior(&self, prior: &Record) -> Vec<Option<String>> {
        self.latest_to_prior
            .iter()
            .map(|pos| pos.and_then(|i| prior.get(i)).map(str::to_string))
            .collect()
    }

    pub fn compared_names(&self) -> Vec<String> {
        self.compared.iter().map(|p| p.name.clone()).collect()
    }
}

fn missing(column: &str, table: TableRole) -> DeltaError {
    DeltaError::MissingColumn {
        column: column.to_string(),
        table,
    }
}

/// Key values of one table in row order, with a hash lookup back to the row.
#[derive(Debug)]
pub(crate) struct KeyIndex<'a> {
    pub keys: Vec<&'a str>,
    positions: HashMap<&'a str, usize>,
}

impl<'a> KeyIndex<'a> {
    /// Index `table` on the column at `key_pos`.
    ///
    /// Rejects null keys and repeated keys so the join is one-to-one.
    pub fn build(table: &'a Table, key_pos: usize, role: TableRole) -> Result<Self> {
        let mut keys = Vec::with_capacity(table.len());
        let mut positions = HashMap::with_capacity(table.len());
        for (row, record) in table.rows().iter().enumerate() {
            let key = record
                .get(key_pos)
                .ok_or(DeltaError::NullKey { table: role, row })?;
            if positions.insert(key, row).is_some() {
                return Err(DeltaError::DuplicateKey {
                    key: key.to_string(),
                    table: role,
                });
            }
            keys.push(key);
        }
        Ok(Self { keys, positions })
    }

    pub fn row_of(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }
}
