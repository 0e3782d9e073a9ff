//! Batch indicator runner.
//!
//! Entry points:
//! - `run_indicators()`: appends one column per configured job to a table.
//! - `run_from_files()`: loads the config and the table from disk, then runs.
//! - `run_self_tests()`: runs every registered indicator's fixture case.

use std::path::Path;

use calcs_core::components::{all_indicators, compute};
use calcs_core::CalcError;
use polars::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, RunConfig};
use crate::data_loader::{load_frame, LoadError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] LoadError),

    #[error("job {job}: {source}")]
    Indicator {
        job: usize,
        #[source]
        source: CalcError,
    },

    #[error("output column '{0}' already exists in the input table")]
    ColumnExists(String),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Compute every job in `config` over `frame` and return a copy of the
/// table with the outputs appended, in job order.
///
/// Jobs always read the input columns, never each other's output.
pub fn run_indicators(frame: &DataFrame, config: &RunConfig) -> Result<DataFrame, RunError> {
    config.validate()?;

    let mut out = frame.clone();
    for (job_index, job) in config.indicators.iter().enumerate() {
        let wrap = |source| RunError::Indicator {
            job: job_index,
            source,
        };
        let name = job.column_name().map_err(wrap)?;
        if frame.column(&name).is_ok() {
            return Err(RunError::ColumnExists(name));
        }

        let series = compute(&job.symbol, frame, &job.params).map_err(wrap)?;
        let defined = series.defined_count();
        out.with_column(Column::from(series.rename(name.as_str())))?;

        info!(
            job = job_index,
            indicator = %job.symbol,
            column = %name,
            rows = frame.height(),
            defined,
            "indicator job complete"
        );
    }
    Ok(out)
}

/// Load `config_path` (TOML) and `data_path` (CSV or Parquet), then run.
pub fn run_from_files(
    data_path: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
) -> Result<DataFrame, RunError> {
    let config = RunConfig::from_path(config_path)?;
    let frame = load_frame(data_path)?;
    run_indicators(&frame, &config)
}

/// Outcome of one indicator's self-test.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfTestReport {
    pub symbol: &'static str,
    pub outcome: Result<(), CalcError>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Run every registered indicator's self-test, in symbol order.
pub fn run_self_tests() -> Vec<SelfTestReport> {
    let reports: Vec<SelfTestReport> = all_indicators()
        .iter()
        .map(|indicator| {
            let outcome = indicator.self_test();
            if let Err(e) = &outcome {
                warn!(indicator = indicator.symbol(), error = %e, "self-test failed");
            }
            SelfTestReport {
                symbol: indicator.symbol(),
                outcome,
            }
        })
        .collect();

    let passed = reports.iter().filter(|r| r.passed()).count();
    info!(passed, total = reports.len(), "self-tests complete");
    reports
}
