//! Indicator trait.
//!
//! Indicators are stateless unit values: constructing one computes nothing.
//! `compute` takes a table and a loosely typed parameter set, validates the
//! parameters against the indicator's descriptor, and returns one output
//! series with the same length as the table.

use super::descriptor::IndicatorDescriptor;
use super::params::{param_set, ParamSet};
use crate::data::fixture::sample_bars;
use crate::data::OhlcvTable;
use crate::error::{CalcError, ContractError};
use crate::series::IndicatorSeries;

/// Tolerance used when comparing self-test output to the expected series.
const SELF_TEST_EPSILON: f64 = 1e-9;

/// Trait for table indicators.
///
/// # Look-ahead contamination guard
/// No value at row t may depend on rows after t. Computing on a truncated
/// table must reproduce the prefix of the full-table output.
pub trait Indicator: Send + Sync {
    fn descriptor(&self) -> &'static IndicatorDescriptor;

    /// Validate `params`, then compute over every row of `table`.
    fn compute(
        &self,
        table: &dyn OhlcvTable,
        params: &ParamSet,
    ) -> Result<IndicatorSeries, CalcError>;

    fn symbol(&self) -> &'static str {
        self.descriptor().symbol
    }

    /// Fail fast if `table` lacks any column this indicator reads.
    fn check_inputs(&self, table: &dyn OhlcvTable) -> Result<(), CalcError> {
        let descriptor = self.descriptor();
        match descriptor.inputs.iter().find(|f| !table.has_field(**f)) {
            Some(field) => {
                Err(ContractError::MissingColumn(field.name()).in_indicator(descriptor.symbol))
            }
            None => Ok(()),
        }
    }

    /// Run the descriptor's fixture case and compare row by row.
    fn self_test(&self) -> Result<(), CalcError> {
        let descriptor = self.descriptor();
        let case = descriptor.self_test;
        let output = self.compute(&sample_bars(), &param_set(case.params.iter().copied()))?;

        if output.len() != case.expected.len() {
            return Err(CalcError::SelfTestLength {
                indicator: descriptor.symbol,
                expected: case.expected.len(),
                actual: output.len(),
            });
        }
        for (row, (&actual, &expected)) in output.values.iter().zip(case.expected).enumerate() {
            let matches = match (actual, expected) {
                (None, None) => true,
                (Some(a), Some(e)) => (a - e).abs() < SELF_TEST_EPSILON,
                _ => false,
            };
            if !matches {
                return Err(CalcError::SelfTestMismatch {
                    indicator: descriptor.symbol,
                    row,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::descriptor::SelfTestCase;
    use crate::components::params::ParamField;
    use crate::domain::PriceField;
    use crate::primitives;

    static CLOSE_SMA: IndicatorDescriptor = IndicatorDescriptor {
        symbol: "close_sma",
        name: "Close SMA",
        description: "Rolling mean of close.",
        example: "Use a 2-period mean.",
        output: "close_sma",
        identifiers: &["close_sma", "close", "window"],
        params_fields: &[ParamField::int("window", 1, 100, "Window", "Window.")],
        inputs: &[PriceField::Close],
        self_test: SelfTestCase {
            params: &[("window", 2)],
            expected: &[None, Some(101.5), Some(101.5), Some(102.5), Some(104.5)],
        },
    };

    struct CloseSma;

    impl Indicator for CloseSma {
        fn descriptor(&self) -> &'static IndicatorDescriptor {
            &CLOSE_SMA
        }

        fn compute(
            &self,
            table: &dyn OhlcvTable,
            params: &ParamSet,
        ) -> Result<IndicatorSeries, CalcError> {
            CLOSE_SMA.validate(params)?;
            let window = CLOSE_SMA.extract(&CLOSE_SMA.params_fields[0], params)?;
            let close = table
                .field(PriceField::Close)
                .map_err(|e| e.in_indicator(CLOSE_SMA.symbol))?;
            Ok(IndicatorSeries::new(
                CLOSE_SMA.output,
                primitives::rolling_mean(&close, window),
            ))
        }
    }

    #[test]
    fn default_self_test_passes_on_matching_case() {
        assert_eq!(CloseSma.self_test(), Ok(()));
        assert_eq!(CloseSma.symbol(), "close_sma");
    }

    #[test]
    fn check_inputs_reports_missing_column() {
        let df = polars::prelude::DataFrame::new(vec![polars::prelude::Column::new(
            "open".into(),
            &[1.0],
        )])
        .unwrap();
        let err = CloseSma.check_inputs(&df).unwrap_err();
        assert_eq!(err.contract(), Some(&ContractError::MissingColumn("close")));
        assert_eq!(CloseSma.check_inputs(&sample_bars()), Ok(()));
    }
}
