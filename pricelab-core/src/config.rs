//! Run configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! standard run: TSLA, SPY and BND from 2015-07-01 to 2025-07-31.

use crate::data::DEFAULT_RAW_DIR;
use crate::stats::RiskParams;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Serializable configuration for a download + analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Symbols to download and analyze, in output order.
    pub symbols: Vec<String>,

    /// First date requested from the provider (inclusive).
    pub start_date: NaiveDate,

    /// Last date of the request window (exclusive at the provider).
    pub end_date: NaiveDate,

    /// Directory holding the per-symbol raw CSV files.
    pub raw_dir: PathBuf,

    /// Statistics parameters.
    pub risk: RiskParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["TSLA".into(), "SPY".into(), "BND".into()],
            start_date: NaiveDate::from_ymd_opt(2015, 7, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap_or_default(),
            raw_dir: PathBuf::from(DEFAULT_RAW_DIR),
            risk: RiskParams::default(),
        }
    }
}

impl RunConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a run depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("symbols must not be empty".into()));
        }
        if let Some(blank) = self.symbols.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("blank symbol {blank:?}")));
        }
        if self.start_date > self.end_date {
            return Err(ConfigError::Invalid(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.risk.window == 0 {
            return Err(ConfigError::Invalid("risk.window must be at least 1".into()));
        }
        let c = self.risk.confidence_level;
        if !(c > 0.0 && c < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "risk.confidence_level must be in (0, 1), got {c}"
            )));
        }
        if !self.risk.risk_free_rate.is_finite() {
            return Err(ConfigError::Invalid("risk.risk_free_rate must be finite".into()));
        }
        Ok(())
    }

    /// Symbols as string slices, for the data APIs.
    pub fn symbol_refs(&self) -> Vec<&str> {
        self.symbols.iter().map(|s| s.as_str()).collect()
    }
}
