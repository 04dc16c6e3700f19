use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::errors::{DeltaError, Result};

/// Identity of an input table, used to locate schema and key errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    /// The earlier snapshot, used as the comparison baseline
    Prior,
    /// The current snapshot, which defines the output schema
    Latest,
}

impl std::fmt::Display for TableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableRole::Prior => write!(f, "prior"),
            TableRole::Latest => write!(f, "latest"),
        }
    }
}

/// One row of a [`Table`]
///
/// Values are positional: index `i` holds the cell for `table.columns()[i]`.
/// `None` is a null cell (an empty field in the delimited source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<Option<String>>,
}

impl Record {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// All cells in column order
    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Cell at `index`; `None` for a null cell or an out-of-range index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    pub(crate) fn set(&mut self, index: usize, value: Option<String>) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }
}

/// An ordered sequence of records sharing one header
///
/// Column names are unique and every row is exactly as wide as the header;
/// both are enforced on construction so downstream code can index by
/// position without re-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given header
    ///
    /// # Errors
    ///
    /// `DuplicateColumn` if a column name repeats.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DeltaError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a table and append `rows` in order
    ///
    /// # Errors
    ///
    /// `DuplicateColumn` on a repeated header name, `RowWidthMismatch` on a
    /// row whose width differs from the header.
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append one row
    ///
    /// # Errors
    ///
    /// `RowWidthMismatch` if the row width differs from the header.
    pub fn push_row(&mut self, values: Vec<Option<String>>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(DeltaError::RowWidthMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        self.rows.push(Record::new(values));
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell of row `row` in column `column`; `None` if null or unknown
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Row `row` as a column-name keyed map
    pub fn row_map(&self, row: usize) -> Option<BTreeMap<&str, Option<&str>>> {
        let record = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .zip(record.values())
                .map(|(c, v)| (c.as_str(), v.as_deref()))
                .collect(),
        )
    }
}
