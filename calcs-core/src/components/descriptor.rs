//! Static indicator descriptors.
//!
//! A descriptor is everything a caller needs to know about an indicator
//! without running it: its symbol, human-readable metadata, the parameter
//! schema, the input columns it reads, and the fixture case it is checked
//! against. Descriptors are `static` items and never change.

use super::params::{reject_unknown, ParamField, ParamSet};
use crate::domain::PriceField;
use crate::error::CalcError;
use serde::{Serialize, Serializer};

#[derive(Debug, Serialize)]
pub struct IndicatorDescriptor {
    /// Unique lookup key (e.g. "atr").
    pub symbol: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    /// Name of the output series (e.g. "macd_histogram").
    pub output: &'static str,
    /// Output symbol, input columns, and parameter names the indicator consumes.
    pub identifiers: &'static [&'static str],
    #[serde(serialize_with = "serialize_fields")]
    pub params_fields: &'static [ParamField],
    #[serde(skip)]
    pub inputs: &'static [PriceField],
    #[serde(skip)]
    pub self_test: SelfTestCase,
}

/// Parameters and expected output for the shared five-row fixture.
#[derive(Debug, Clone, Copy)]
pub struct SelfTestCase {
    pub params: &'static [(&'static str, i64)],
    pub expected: &'static [Option<f64>],
}

impl IndicatorDescriptor {
    pub fn field(&self, name: &str) -> Option<&ParamField> {
        self.params_fields.iter().find(|f| f.name == name)
    }

    /// Validate a parameter set against this schema without computing.
    ///
    /// Fails on unknown keys, missing keys, wrong types, and out-of-range
    /// values, in that order.
    pub fn validate(&self, params: &ParamSet) -> Result<(), CalcError> {
        reject_unknown(self.params_fields, params).map_err(|e| e.in_indicator(self.symbol))?;
        for field in self.params_fields {
            field
                .extract(params)
                .map_err(|e| e.in_indicator(self.symbol))?;
        }
        Ok(())
    }

    /// Look up and validate one declared field.
    pub(crate) fn extract(&self, field: &ParamField, params: &ParamSet) -> Result<usize, CalcError> {
        field.extract(params).map_err(|e| e.in_indicator(self.symbol))
    }

    /// Pretty-printed JSON for self-documentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_fields<S: Serializer>(
    fields: &&'static [ParamField],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(fields.iter().map(|f| (f.name, f)))
}
