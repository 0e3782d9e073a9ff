//! Moving Average Convergence Divergence (MACD), simple-moving-average form.
//!
//! macd_line      = sma(close, fast_period) - sma(close, slow_period)
//! signal_line    = sma(macd_line, signal_period)
//! macd_histogram = macd_line - signal_line
//!
//! The histogram is the indicator's output. fast_period >= slow_period is
//! accepted; the line simply changes sign.
//! First defined histogram row: max(fast, slow) + signal - 2.

use crate::components::descriptor::{IndicatorDescriptor, SelfTestCase};
use crate::components::indicator::Indicator;
use crate::components::params::{reject_unknown, ParamField, ParamSet};
use crate::data::OhlcvTable;
use crate::domain::PriceField;
use crate::error::CalcError;
use crate::primitives::{rolling_mean, sub};
use crate::series::IndicatorSeries;

const FAST_PERIOD: ParamField = ParamField::int(
    "fast_period",
    1,
    100,
    "Fast Period",
    "The number of periods for the fast moving average.",
);
const SLOW_PERIOD: ParamField = ParamField::int(
    "slow_period",
    1,
    100,
    "Slow Period",
    "The number of periods for the slow moving average.",
);
const SIGNAL_PERIOD: ParamField = ParamField::int(
    "signal_period",
    1,
    100,
    "Signal Period",
    "The number of periods for the signal line.",
);

pub static MACD_DESCRIPTOR: IndicatorDescriptor = IndicatorDescriptor {
    symbol: "macd",
    name: "Moving Average Convergence Divergence",
    description: "MACD is a trend-following momentum indicator that shows the relationship \
                  between two moving averages of a security's price.",
    example: "Use MACD (12, 26, 9) to identify potential buy or sell signals based on the \
              crossover between MACD and its signal line.",
    output: "macd_histogram",
    identifiers: &["macd", "close", "fast_period", "slow_period", "signal_period"],
    params_fields: &[FAST_PERIOD, SLOW_PERIOD, SIGNAL_PERIOD],
    inputs: &[PriceField::Close],
    self_test: SelfTestCase {
        params: &[("fast_period", 12), ("slow_period", 26), ("signal_period", 9)],
        expected: &[None, None, None, None, None],
    },
};

/// Validated MACD parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl MacdParams {
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, CalcError> {
        let check = |field: &ParamField, value| {
            field
                .check_len(value)
                .map_err(|e| e.in_indicator(MACD_DESCRIPTOR.symbol))
        };
        Ok(Self {
            fast_period: check(&FAST_PERIOD, fast_period)?,
            slow_period: check(&SLOW_PERIOD, slow_period)?,
            signal_period: check(&SIGNAL_PERIOD, signal_period)?,
        })
    }

    pub fn from_params(params: &ParamSet) -> Result<Self, CalcError> {
        reject_unknown(MACD_DESCRIPTOR.params_fields, params)
            .map_err(|e| e.in_indicator(MACD_DESCRIPTOR.symbol))?;
        Ok(Self {
            fast_period: MACD_DESCRIPTOR.extract(&FAST_PERIOD, params)?,
            slow_period: MACD_DESCRIPTOR.extract(&SLOW_PERIOD, params)?,
            signal_period: MACD_DESCRIPTOR.extract(&SIGNAL_PERIOD, params)?,
        })
    }

    pub fn fast_period(&self) -> usize {
        self.fast_period
    }

    pub fn slow_period(&self) -> usize {
        self.slow_period
    }

    pub fn signal_period(&self) -> usize {
        self.signal_period
    }
}

/// All three MACD lines, aligned with the input rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd_line: IndicatorSeries,
    pub signal_line: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

/// MACD line, signal line, and histogram over every row of `table`.
pub fn macd_lines<T: OhlcvTable + ?Sized>(
    table: &T,
    params: &MacdParams,
) -> Result<MacdLines, CalcError> {
    let close = table
        .field(PriceField::Close)
        .map_err(|e| e.in_indicator(MACD_DESCRIPTOR.symbol))?;

    let fast_ma = rolling_mean(&close, params.fast_period);
    let slow_ma = rolling_mean(&close, params.slow_period);
    let macd_line = sub(&fast_ma, &slow_ma);
    let signal_line = rolling_mean(&macd_line, params.signal_period);
    let histogram = sub(&macd_line, &signal_line);

    Ok(MacdLines {
        macd_line: IndicatorSeries::new("macd_line", macd_line),
        signal_line: IndicatorSeries::new("signal_line", signal_line),
        histogram: IndicatorSeries::new(MACD_DESCRIPTOR.output, histogram),
    })
}

/// MACD histogram over every row of `table`.
pub fn macd<T: OhlcvTable + ?Sized>(
    table: &T,
    params: &MacdParams,
) -> Result<IndicatorSeries, CalcError> {
    macd_lines(table, params).map(|lines| lines.histogram)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Macd;

impl Indicator for Macd {
    fn descriptor(&self) -> &'static IndicatorDescriptor {
        &MACD_DESCRIPTOR
    }

    fn compute(
        &self,
        table: &dyn OhlcvTable,
        params: &ParamSet,
    ) -> Result<IndicatorSeries, CalcError> {
        macd(table, &MacdParams::from_params(params)?)
    }
}
