//! Delta configuration
//!
//! Every variant of the delta (left or outer join, strict or simple
//! projection, with or without a domain filter or key prefix) is one
//! [`DeltaConfig`] value passed to the same engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{DeltaError, Result};

pub const DEFAULT_KEY_COLUMN: &str = "employee_number";
pub const DEFAULT_EXEMPT_COLUMNS: &[&str] = &["name", "last_name", "address"];

/// How changed rows are projected onto the output schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPolicy {
    /// Changed rows carry every latest column
    Simple,
    /// Changed rows carry only the key and compared columns; exempt cells are null
    #[default]
    Strict,
}

/// Which join provenances may reach the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Left join to latest: keys only in prior never appear
    #[default]
    NewAndChangedOnly,
    /// Outer join: keys only in prior are emitted as removed rows
    IncludeRemoved,
}

/// Restricts the delta to rows whose indicator column equals `include`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {
    pub column: String,
    pub include: String,
}

impl DomainFilter {
    pub fn new(column: impl Into<String>, include: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            include: include.into(),
        }
    }

    /// Whether a row with indicator value `value` passes the filter
    pub fn admits(&self, value: Option<&str>) -> bool {
        value == Some(self.include.as_str())
    }
}

/// Parameters of one delta computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaConfig {
    /// Column joining the two snapshots; compared as an opaque string
    pub key_column: String,
    /// Columns whose differences never mark a row changed
    pub exempt_columns: BTreeSet<String>,
    pub output_policy: OutputPolicy,
    pub join_mode: JoinMode,
    /// Literal prepended to every emitted key after classification
    pub key_prefix: Option<String>,
    /// Columns whose null latest cells are filled from prior on emitted matched rows
    pub backfill_columns: Vec<String>,
    pub domain_filter: Option<DomainFilter>,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            exempt_columns: DEFAULT_EXEMPT_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            output_policy: OutputPolicy::Strict,
            join_mode: JoinMode::NewAndChangedOnly,
            key_prefix: None,
            backfill_columns: Vec::new(),
            domain_filter: None,
        }
    }
}

impl DeltaConfig {
    /// Configuration keyed on `key_column` with no exempt columns and defaults otherwise
    pub fn keyed_on(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            exempt_columns: BTreeSet::new(),
            ..Self::default()
        }
    }

    pub fn with_exempt<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_policy(mut self, policy: OutputPolicy) -> Self {
        self.output_policy = policy;
        self
    }

    pub fn with_join_mode(mut self, mode: JoinMode) -> Self {
        self.join_mode = mode;
        self
    }

    pub fn with_domain_filter(mut self, filter: DomainFilter) -> Self {
        self.domain_filter = Some(filter);
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_backfill<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backfill_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the key column is empty or listed as exempt, the
    /// domain filter names an empty column, or the key prefix is empty.
    pub fn validate(&self) -> Result<()> {
        if self.key_column.trim().is_empty() {
            return Err(invalid("key_column must not be empty"));
        }
        if self.exempt_columns.contains(&self.key_column) {
            return Err(invalid(format!(
                "key column '{}' cannot also be exempt",
                self.key_column
            )));
        }
        if let Some(filter) = &self.domain_filter {
            if filter.column.trim().is_empty() {
                return Err(invalid("domain_filter.column must not be empty"));
            }
        }
        if matches!(self.key_prefix.as_deref(), Some("")) {
            return Err(invalid("key_prefix must not be empty when set"));
        }
        Ok(())
    }

    /// Parse a TOML document; absent fields take their defaults
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the document is not valid TOML for this shape or
    /// fails [`DeltaConfig::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DeltaConfig =
            toml::from_str(text).map_err(|e| invalid(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a TOML document
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| invalid(format!("TOML serialize error: {}", e)))
    }
}

fn invalid(reason: impl Into<String>) -> DeltaError {
    DeltaError::InvalidConfig {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_employee_snapshots() {
        let config = DeltaConfig::default();
        assert_eq!(config.key_column, "employee_number");
        assert!(config.exempt_columns.contains("name"));
        assert!(config.exempt_columns.contains("last_name"));
        assert!(config.exempt_columns.contains("address"));
        assert_eq!(config.output_policy, OutputPolicy::Strict);
        assert_eq!(config.join_mode, JoinMode::NewAndChangedOnly);
        assert!(config.domain_filter.is_none());
        assert!(config.key_prefix.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DeltaConfig::from_toml_str(
            r#"
            output_policy = "simple"
            key_prefix = "N"

            [domain_filter]
            column = "labindicator"
            include = "Y"
            "#,
        )
        .unwrap();

        assert_eq!(config.key_column, "employee_number");
        assert_eq!(config.output_policy, OutputPolicy::Simple);
        assert_eq!(config.key_prefix.as_deref(), Some("N"));
        assert_eq!(
            config.domain_filter,
            Some(DomainFilter::new("labindicator", "Y"))
        );
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let err = DeltaConfig::from_toml_str(r#"join_mode = "full_outer""#).unwrap_err();
        assert!(matches!(err, DeltaError::InvalidConfig { .. }));
    }

    #[test]
    fn test_key_column_cannot_be_exempt() {
        let config = DeltaConfig::keyed_on("id").with_exempt(["id", "city"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot also be exempt"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = DeltaConfig::keyed_on("id").with_key_prefix("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DeltaConfig::keyed_on("id")
            .with_exempt(["city"])
            .with_join_mode(JoinMode::IncludeRemoved)
            .with_domain_filter(DomainFilter::new("labindicator", "Y"));

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("join_mode = \"include_removed\""));
        assert_eq!(DeltaConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_domain_filter_admits_only_include_value() {
        let filter = DomainFilter::new("labindicator", "Y");
        assert!(filter.admits(Some("Y")));
        assert!(!filter.admits(Some("N")));
        assert!(!filter.admits(Some("y")));
        assert!(!filter.admits(None));
    }
}
