//! Parameter schema and caller-supplied parameter sets.
//!
//! A `ParamSet` is the loosely typed form (what comes out of TOML or JSON).
//! Each indicator declares its accepted keys as `ParamField`s and turns a
//! validated set into its own typed record before computing anything.

use crate::error::ContractError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied parameters keyed by name.
///
/// Uses `BTreeMap` so iteration and serialization order is deterministic.
pub type ParamSet = BTreeMap<String, ParamValue>;

/// A single parameter value as it arrives from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

/// Build a `ParamSet` from `(name, value)` pairs.
pub fn param_set<I, K, V>(pairs: I) -> ParamSet
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Float,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Int => f.write_str("int"),
            ParamKind::Float => f.write_str("float"),
        }
    }
}

/// Schema entry for one parameter: type, inclusive range, and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamField {
    #[serde(skip)]
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    pub range: (i64, i64),
    pub title: &'static str,
    pub description: &'static str,
}

impl ParamField {
    /// An integer window-length parameter bounded to `[min, max]`.
    pub const fn int(
        name: &'static str,
        min: i64,
        max: i64,
        title: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ParamKind::Int,
            range: (min, max),
            title,
            description,
        }
    }

    /// Check a raw integer against the declared range.
    ///
    /// Every declared range starts at 1 or above, so a value that passes is a
    /// valid window length.
    pub fn check(&self, value: i64) -> Result<usize, ContractError> {
        let (min, max) = self.range;
        if value < min || value > max {
            return Err(ContractError::OutOfRange {
                param: self.name,
                value,
                min,
                max,
            });
        }
        usize::try_from(value).map_err(|_| ContractError::OutOfRange {
            param: self.name,
            value,
            min,
            max,
        })
    }

    /// Check a window length given as `usize`.
    pub fn check_len(&self, value: usize) -> Result<usize, ContractError> {
        self.check(i64::try_from(value).unwrap_or(i64::MAX))
    }

    /// Look this field up in `params`, then check type and range.
    pub fn extract(&self, params: &ParamSet) -> Result<usize, ContractError> {
        match params.get(self.name) {
            None => Err(ContractError::MissingParam(self.name)),
            Some(ParamValue::Int(v)) => self.check(*v),
            Some(other) => Err(ContractError::WrongType {
                param: self.name,
                expected: self.kind,
                actual: other.kind(),
            }),
        }
    }
}

/// Reject keys in `params` that no field declares.
pub fn reject_unknown(fields: &[ParamField], params: &ParamSet) -> Result<(), ContractError> {
    match params
        .keys()
        .find(|key| !fields.iter().any(|f| f.name == key.as_str()))
    {
        Some(key) => Err(ContractError::UnknownParam(key.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: ParamField = ParamField::int("window", 1, 100, "Window Size", "Test window.");

    #[test]
    fn extract_accepts_bounds() {
        assert_eq!(WINDOW.extract(&param_set([("window", 1)])), Ok(1));
        assert_eq!(WINDOW.extract(&param_set([("window", 100)])), Ok(100));
    }

    #[test]
    fn extract_rejects_out_of_range() {
        for bad in [0, 101, -5] {
            let err = WINDOW.extract(&param_set([("window", bad)])).unwrap_err();
            assert!(
                matches!(err, ContractError::OutOfRange { value, .. } if value == i64::from(bad)),
                "window={bad} gave {err:?}"
            );
        }
    }

    #[test]
    fn extract_rejects_missing() {
        let err = WINDOW.extract(&ParamSet::new()).unwrap_err();
        assert_eq!(err, ContractError::MissingParam("window"));
    }

    #[test]
    fn extract_rejects_float_for_int() {
        let err = WINDOW.extract(&param_set([("window", 14.0)])).unwrap_err();
        assert_eq!(
            err,
            ContractError::WrongType {
                param: "window",
                expected: ParamKind::Int,
                actual: ParamKind::Float,
            }
        );
    }

    #[test]
    fn check_len_saturates_huge_values() {
        assert!(matches!(
            WINDOW.check_len(usize::MAX),
            Err(ContractError::OutOfRange { .. })
        ));
    }

    #[test]
    fn reject_unknown_names_first_stray_key() {
        let params = param_set([("window", 14), ("windw", 3)]);
        assert_eq!(
            reject_unknown(&[WINDOW], &params),
            Err(ContractError::UnknownParam("windw".into()))
        );
        assert_eq!(reject_unknown(&[WINDOW], &param_set([("window", 3)])), Ok(()));
    }

    #[test]
    fn param_value_deserializes_untagged() {
        let params: ParamSet = serde_json::from_str(r#"{"a": 14, "b": 2.5}"#).unwrap();
        assert_eq!(params["a"], ParamValue::Int(14));
        assert_eq!(params["b"], ParamValue::Float(2.5));
    }

    #[test]
    fn field_serializes_with_type_and_range() {
        let json = serde_json::to_value(WINDOW).unwrap();
        assert_eq!(json["type"], "int");
        assert_eq!(json["range"], serde_json::json!([1, 100]));
        assert_eq!(json["title"], "Window Size");
        assert!(json.get("name").is_none());
    }
}
