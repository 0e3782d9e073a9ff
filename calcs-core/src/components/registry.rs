//! Indicator lookup by symbol.
//!
//! `create_indicator` turns a descriptor symbol into a runtime trait object;
//! `compute` is the one-call path used by generic runners.

use tracing::debug;

use super::descriptor::IndicatorDescriptor;
use super::indicator::Indicator;
use super::params::ParamSet;
use crate::data::OhlcvTable;
use crate::error::CalcError;
use crate::indicators::{Atr, Macd, Rsi};
use crate::series::IndicatorSeries;

/// Every registered symbol, sorted.
pub const SYMBOLS: [&str; 3] = ["atr", "macd", "rsi"];

/// Create an indicator from its descriptor symbol (case-insensitive).
pub fn create_indicator(symbol: &str) -> Result<Box<dyn Indicator>, CalcError> {
    match symbol.to_ascii_lowercase().as_str() {
        "atr" => Ok(Box::new(Atr)),
        "macd" => Ok(Box::new(Macd)),
        "rsi" => Ok(Box::new(Rsi)),
        _ => Err(CalcError::UnknownIndicator(symbol.to_string())),
    }
}

pub fn all_indicators() -> Vec<Box<dyn Indicator>> {
    vec![Box::new(Atr), Box::new(Macd), Box::new(Rsi)]
}

pub fn descriptors() -> Vec<&'static IndicatorDescriptor> {
    all_indicators().iter().map(|i| i.descriptor()).collect()
}

/// Look up `symbol`, check the table has its columns, and compute.
pub fn compute(
    symbol: &str,
    table: &dyn OhlcvTable,
    params: &ParamSet,
) -> Result<IndicatorSeries, CalcError> {
    let indicator = create_indicator(symbol)?;
    indicator.check_inputs(table)?;
    debug!(
        indicator = indicator.symbol(),
        rows = table.rows(),
        ?params,
        "computing indicator"
    );
    indicator.compute(table, params)
}
