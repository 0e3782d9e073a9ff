//! calcs runner: batch indicator computation over files.
//!
//! This crate builds on `calcs-core` to provide:
//! - TOML job configuration (`[[indicator]]` tables)
//! - CSV and Parquet loading into polars `DataFrame`s, Parquet export
//! - A runner that appends one output column per job
//! - Self-tests for every registered indicator
//!
//! Library code never installs a tracing subscriber; callers choose.

pub mod config;
pub mod data_loader;
pub mod runner;

pub use config::{ConfigError, IndicatorJob, RunConfig};
pub use data_loader::{load_csv, load_frame, load_parquet, read_csv, write_parquet, LoadError};
pub use runner::{run_from_files, run_indicators, run_self_tests, RunError, SelfTestReport};
