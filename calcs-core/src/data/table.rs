//! Table capability: column access by name over an ordered row sequence.
//!
//! Indicators never touch storage directly. They ask an `OhlcvTable` for the
//! columns they need and get back `Vec<Option<f64>>`, where `None` marks an
//! undefined value (a polars null or a NaN price).

use crate::domain::{Bar, PriceField};
use crate::error::ContractError;
use polars::prelude::*;

pub trait OhlcvTable {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Whether the table carries `field` at all.
    fn has_field(&self, field: PriceField) -> bool;

    /// One numeric column, aligned with row order.
    fn field(&self, field: PriceField) -> Result<Vec<Option<f64>>, ContractError>;
}

fn defined(v: f64) -> Option<f64> {
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

impl OhlcvTable for [Bar] {
    fn rows(&self) -> usize {
        self.len()
    }

    fn has_field(&self, _field: PriceField) -> bool {
        true
    }

    fn field(&self, field: PriceField) -> Result<Vec<Option<f64>>, ContractError> {
        Ok(self.iter().map(|b| defined(b.field(field))).collect())
    }
}

impl OhlcvTable for Vec<Bar> {
    fn rows(&self) -> usize {
        self.len()
    }

    fn has_field(&self, field: PriceField) -> bool {
        self.as_slice().has_field(field)
    }

    fn field(&self, field: PriceField) -> Result<Vec<Option<f64>>, ContractError> {
        self.as_slice().field(field)
    }
}

/// Find a column whose name matches `field` ignoring ASCII case.
fn find_column(df: &DataFrame, field: PriceField) -> Option<&Column> {
    df.get_columns()
        .iter()
        .find(|c| c.name().as_str().eq_ignore_ascii_case(field.name()))
}

impl OhlcvTable for DataFrame {
    fn rows(&self) -> usize {
        self.height()
    }

    fn has_field(&self, field: PriceField) -> bool {
        find_column(self, field).is_some()
    }

    fn field(&self, field: PriceField) -> Result<Vec<Option<f64>>, ContractError> {
        let name = field.name();
        let column = find_column(self, field).ok_or(ContractError::MissingColumn(name))?;

        let non_numeric = |dtype: &DataType| ContractError::NonNumericColumn {
            column: name,
            dtype: dtype.to_string(),
        };
        match column.dtype() {
            DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::UInt64
            | DataType::UInt32 => {}
            other => return Err(non_numeric(other)),
        }

        let cast = column
            .cast(&DataType::Float64)
            .map_err(|_| non_numeric(column.dtype()))?;
        let values = cast.f64().map_err(|_| non_numeric(column.dtype()))?;
        Ok(values.iter().map(|v| v.and_then(defined)).collect())
    }
}
