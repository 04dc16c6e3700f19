//! Settings file loading
//!
//! One TOML document carries the delta configuration at the top level and
//! the reader/writer options under `[csv]`.

use rosterdelta_core::errors::{ExError, ExErrorKind};
use rosterdelta_core::DeltaConfig;
use rosterdelta_io::CsvOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Effective settings for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub delta: DeltaConfig,
    pub csv: CsvOptions,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CsvSection {
    #[serde(default)]
    csv: CsvOptions,
}

impl Settings {
    /// Load from `path`, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ExError> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    ExError::new(ExErrorKind::InputRead)
                        .with_op("load_settings")
                        .with_path(path.display().to_string())
                        .with_message(format!("Failed to read settings file: {}", e))
                })?;
                Self::from_toml_str(&text)
                    .map_err(|e| e.with_path(path.display().to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ExError> {
        let delta = DeltaConfig::from_toml_str(text)?;
        let section: CsvSection = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_settings")
                .with_message(format!("Invalid [csv] section: {}", e))
        })?;
        Ok(Self {
            delta,
            csv: section.csv,
        })
    }

    /// Render as the same TOML shape [`Settings::from_toml_str`] reads
    pub fn to_toml_string(&self) -> Result<String, ExError> {
        let mut out = self.delta.to_toml_string()?;
        let csv = toml::to_string(&CsvSection { csv: self.csv }).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("show_settings")
                .with_message(e.to_string())
        })?;
        if !out.is_empty() && !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str(&csv);
        Ok(out)
    }
}
