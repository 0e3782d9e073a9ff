//! Indicator output series.

use serde::Serialize;

/// A named, nullable numeric series aligned one-to-one with input rows.
///
/// `None` marks a row without a computed value: not enough history for the
/// window, or a zero/undefined denominator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`; `None` if undefined or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// `(index, value)` for every defined row.
    pub fn defined(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|x| (i, x)))
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let s = IndicatorSeries::new("rsi", vec![None, None, Some(40.0), Some(55.0)]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.get(1), None);
        assert_eq!(s.get(2), Some(40.0));
        assert_eq!(s.get(9), None);
        assert_eq!(s.first_defined(), Some(2));
        assert_eq!(s.defined_count(), 2);
        assert_eq!(s.defined().collect::<Vec<_>>(), vec![(2, 40.0), (3, 55.0)]);
    }

    #[test]
    fn all_undefined_has_no_first() {
        let s = IndicatorSeries::new("atr", vec![None; 3]);
        assert_eq!(s.first_defined(), None);
        assert!(!s.is_empty());
        assert_eq!(s.rename("atr_14").name, "atr_14");
    }
}
