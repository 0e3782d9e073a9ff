//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR: simple rolling mean of True Range over `window` rows.
//! Row 0 has no previous close, so its True Range degrades to high-low.
//! First defined value: row window-1.

use crate::components::descriptor::{IndicatorDescriptor, SelfTestCase};
use crate::components::indicator::Indicator;
use crate::components::params::{reject_unknown, ParamField, ParamSet};
use crate::data::OhlcvTable;
use crate::domain::PriceField;
use crate::error::CalcError;
use crate::primitives::{abs, max_horizontal, rolling_mean, shift, sub};
use crate::series::IndicatorSeries;

const WINDOW: ParamField = ParamField::int(
    "window",
    1,
    100,
    "Window Size",
    "The number of periods over which to calculate the ATR.",
);

pub static ATR_DESCRIPTOR: IndicatorDescriptor = IndicatorDescriptor {
    symbol: "atr",
    name: "Average True Range",
    description: "The ATR measures market volatility by decomposing the entire range of an \
                  asset price for that period.",
    example: "Use a 14-period ATR to measure volatility and identify potential breakout \
              conditions.",
    output: "atr",
    identifiers: &["atr", "high", "low", "close", "window"],
    params_fields: &[WINDOW],
    inputs: &[PriceField::High, PriceField::Low, PriceField::Close],
    self_test: SelfTestCase {
        params: &[("window", 14)],
        expected: &[None, None, None, None, None],
    },
};

/// Validated ATR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtrParams {
    window: usize,
}

impl AtrParams {
    pub fn new(window: usize) -> Result<Self, CalcError> {
        let window = WINDOW
            .check_len(window)
            .map_err(|e| e.in_indicator(ATR_DESCRIPTOR.symbol))?;
        Ok(Self { window })
    }

    pub fn from_params(params: &ParamSet) -> Result<Self, CalcError> {
        reject_unknown(ATR_DESCRIPTOR.params_fields, params)
            .map_err(|e| e.in_indicator(ATR_DESCRIPTOR.symbol))?;
        Ok(Self {
            window: ATR_DESCRIPTOR.extract(&WINDOW, params)?,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// True Range series from aligned high/low/close columns.
pub fn true_range(
    high: &[Option<f64>],
    low: &[Option<f64>],
    close: &[Option<f64>],
) -> Vec<Option<f64>> {
    let prev_close = shift(close, 1);
    let range = sub(high, low);
    let high_gap = abs(&sub(high, &prev_close));
    let low_gap = abs(&sub(low, &prev_close));
    max_horizontal(&[range.as_slice(), high_gap.as_slice(), low_gap.as_slice()])
}

/// ATR over every row of `table`.
pub fn atr<T: OhlcvTable + ?Sized>(
    table: &T,
    params: &AtrParams,
) -> Result<IndicatorSeries, CalcError> {
    let column = |field| {
        table
            .field(field)
            .map_err(|e| e.in_indicator(ATR_DESCRIPTOR.symbol))
    };
    let high = column(PriceField::High)?;
    let low = column(PriceField::Low)?;
    let close = column(PriceField::Close)?;

    let tr = true_range(&high, &low, &close);
    Ok(IndicatorSeries::new(
        ATR_DESCRIPTOR.output,
        rolling_mean(&tr, params.window),
    ))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Atr;

impl Indicator for Atr {
    fn descriptor(&self) -> &'static IndicatorDescriptor {
        &ATR_DESCRIPTOR
    }

    fn compute(
        &self,
        table: &dyn OhlcvTable,
        params: &ParamSet,
    ) -> Result<IndicatorSeries, CalcError> {
        atr(table, &AtrParams::from_params(params)?)
    }
}
