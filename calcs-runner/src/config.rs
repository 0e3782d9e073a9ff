//! TOML job configuration for the runner.
//!
//! ```toml
//! [[indicator]]
//! symbol = "rsi"
//! alias = "rsi_14"
//! params = { window = 14 }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use calcs_core::components::{create_indicator, ParamSet};
use calcs_core::CalcError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("indicator job {job} ('{symbol}'): {source}")]
    Indicator {
        job: usize,
        symbol: String,
        #[source]
        source: CalcError,
    },

    #[error("output column '{0}' is produced by more than one job")]
    DuplicateColumn(String),
}

/// One indicator computation: which symbol, what to call the output, and
/// the parameters to pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorJob {
    pub symbol: String,

    /// Output column name. Defaults to the descriptor's output name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default)]
    pub params: ParamSet,
}

impl IndicatorJob {
    pub fn new(symbol: impl Into<String>, params: ParamSet) -> Self {
        Self {
            symbol: symbol.into(),
            alias: None,
            params,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Name of the column this job appends.
    pub fn column_name(&self) -> Result<String, CalcError> {
        match &self.alias {
            Some(alias) => Ok(alias.clone()),
            None => Ok(create_indicator(&self.symbol)?
                .descriptor()
                .output
                .to_string()),
        }
    }
}

/// A batch of indicator jobs run against one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(rename = "indicator", default)]
    pub indicators: Vec<IndicatorJob>,
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check every job against its indicator's parameter schema and make
    /// sure no two jobs write the same column.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (job_index, job) in self.indicators.iter().enumerate() {
            let wrap = |source| ConfigError::Indicator {
                job: job_index,
                symbol: job.symbol.clone(),
                source,
            };
            let indicator = create_indicator(&job.symbol).map_err(wrap)?;
            indicator.descriptor().validate(&job.params).map_err(wrap)?;

            let column = job.column_name().map_err(wrap)?;
            if !seen.insert(column.clone()) {
                return Err(ConfigError::DuplicateColumn(column));
            }
        }
        Ok(())
    }
}
