//! Relative Strength Index (RSI).
//!
//! delta = close - prev_close, gain = max(delta, 0), loss = max(-delta, 0).
//! Row 0 has no delta and contributes zero gain and zero loss.
//! avg_gain/avg_loss are simple rolling means over `window`.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge case: avg_loss == 0 → undefined, not 100. Zero denominators are
//! undefined everywhere in this crate.

use crate::components::descriptor::{IndicatorDescriptor, SelfTestCase};
use crate::components::indicator::Indicator;
use crate::components::params::{reject_unknown, ParamField, ParamSet};
use crate::data::OhlcvTable;
use crate::domain::PriceField;
use crate::error::CalcError;
use crate::primitives::{clip_lower, diff, div, fill_undefined, map, rolling_mean};
use crate::series::IndicatorSeries;

const WINDOW: ParamField = ParamField::int(
    "window",
    1,
    100,
    "Window Size",
    "The number of periods over which to calculate the RSI.",
);

pub static RSI_DESCRIPTOR: IndicatorDescriptor = IndicatorDescriptor {
    symbol: "rsi",
    name: "Relative Strength Index",
    description: "The RSI is a momentum oscillator that measures the speed and change of price \
                  movements, typically used to identify overbought or oversold conditions.",
    example: "Use a 14-period RSI to detect overbought conditions (RSI > 70) or oversold \
              conditions (RSI < 30).",
    output: "rsi",
    identifiers: &["rsi", "close", "window"],
    params_fields: &[WINDOW],
    inputs: &[PriceField::Close],
    self_test: SelfTestCase {
        params: &[("window", 14)],
        expected: &[None, None, None, None, None],
    },
};

/// Validated RSI parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsiParams {
    window: usize,
}

impl RsiParams {
    pub fn new(window: usize) -> Result<Self, CalcError> {
        let window = WINDOW
            .check_len(window)
            .map_err(|e| e.in_indicator(RSI_DESCRIPTOR.symbol))?;
        Ok(Self { window })
    }

    pub fn from_params(params: &ParamSet) -> Result<Self, CalcError> {
        reject_unknown(RSI_DESCRIPTOR.params_fields, params)
            .map_err(|e| e.in_indicator(RSI_DESCRIPTOR.symbol))?;
        Ok(Self {
            window: RSI_DESCRIPTOR.extract(&WINDOW, params)?,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// RSI over every row of `table`.
pub fn rsi<T: OhlcvTable + ?Sized>(
    table: &T,
    params: &RsiParams,
) -> Result<IndicatorSeries, CalcError> {
    let close = table
        .field(PriceField::Close)
        .map_err(|e| e.in_indicator(RSI_DESCRIPTOR.symbol))?;

    let delta = diff(&close);
    let gain = fill_undefined(&clip_lower(&delta, 0.0), 0.0);
    let loss = fill_undefined(&clip_lower(&map(&delta, |d| -d), 0.0), 0.0);

    let avg_gain = rolling_mean(&gain, params.window);
    let avg_loss = rolling_mean(&loss, params.window);
    let rs = div(&avg_gain, &avg_loss);

    Ok(IndicatorSeries::new(
        RSI_DESCRIPTOR.output,
        map(&rs, |rs| 100.0 - 100.0 / (1.0 + rs)),
    ))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Rsi;

impl Indicator for Rsi {
    fn descriptor(&self) -> &'static IndicatorDescriptor {
        &RSI_DESCRIPTOR
    }

    fn compute(
        &self,
        table: &dyn OhlcvTable,
        params: &ParamSet,
    ) -> Result<IndicatorSeries, CalcError> {
        rsi(table, &RsiParams::from_params(params)?)
    }
}
