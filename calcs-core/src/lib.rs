//! calcs core — technical-analysis indicators over OHLCV tables.
//!
//! This crate contains:
//! - Domain types (bars, price fields)
//! - The table capability over polars `DataFrame`s and bar slices
//! - Rolling-window primitives (rolling mean, shift, diff, guarded division)
//! - Self-describing indicators: ATR, RSI, MACD histogram
//! - Parameter schemas, descriptors, and lookup by symbol
//!
//! Every computation is a pure function of the table and the parameters.
//! Rows without enough history come back as `None`, never as errors.

pub mod components;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod primitives;
pub mod series;

pub use components::{
    compute, create_indicator, descriptors, param_set, Indicator, IndicatorDescriptor, ParamSet,
    ParamValue,
};
pub use data::{bars_to_frame, sample_bars, OhlcvTable};
pub use domain::{Bar, PriceField};
pub use error::{CalcError, ContractError};
pub use series::IndicatorSeries;
