//! Error types.
//!
//! Two layers: `ContractError` names what the caller got wrong (a missing
//! column, a bad parameter), `CalcError` says which indicator it happened in.
//! Insufficient history and zero denominators are not errors; they show up as
//! `None` in the output series.

use crate::components::params::ParamKind;
use thiserror::Error;

/// Input contract violation: the table or parameter set does not satisfy an
/// indicator's declared schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),

    #[error("parameter '{param}' must be {expected}, got {actual}")]
    WrongType {
        param: &'static str,
        expected: ParamKind,
        actual: ParamKind,
    },

    #[error("parameter '{param}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("unknown parameter '{0}'")]
    UnknownParam(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("column '{column}' is not numeric ({dtype})")]
    NonNumericColumn { column: &'static str, dtype: String },
}

impl ContractError {
    /// Attach the indicator symbol the violation happened in.
    pub fn in_indicator(self, indicator: &'static str) -> CalcError {
        CalcError::Calculation {
            indicator,
            source: self,
        }
    }
}

/// Errors surfaced by the indicator layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("error in {indicator} calculation: {source}")]
    Calculation {
        indicator: &'static str,
        #[source]
        source: ContractError,
    },

    #[error("unknown indicator '{0}'")]
    UnknownIndicator(String),

    #[error("{indicator} self-test: expected {expected} rows, got {actual}")]
    SelfTestLength {
        indicator: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{indicator} self-test mismatch at row {row}: expected {expected:?}, got {actual:?}")]
    SelfTestMismatch {
        indicator: &'static str,
        row: usize,
        expected: Option<f64>,
        actual: Option<f64>,
    },
}

impl CalcError {
    /// The underlying contract violation, if this is one.
    pub fn contract(&self) -> Option<&ContractError> {
        match self {
            CalcError::Calculation { source, .. } => Some(source),
            _ => None,
        }
    }
}
