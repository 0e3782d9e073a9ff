//! Rolling-window primitives shared by every indicator.
//!
//! All functions are pure and total. Input and output are aligned
//! `Option<f64>` slices; `None` propagates instead of raising. Binary
//! operations expect equal-length inputs.

/// Mean of the last `window` values ending at each row.
///
/// A row is defined only when all `window` values are defined, so rows
/// `0..window-1` are always `None`. `window == 0` or `window > len` yields an
/// all-`None` series.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || window > values.len() {
        return out;
    }
    let divisor = window as f64;
    for (i, chunk) in values.windows(window).enumerate() {
        let sum: Option<f64> = chunk.iter().copied().sum();
        out[i + window - 1] = sum.map(|s| s / divisor);
    }
    out
}

/// Value at row `i` becomes the value from row `i - lag`; the first `lag`
/// rows are `None`.
pub fn shift(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| if i < lag { None } else { values[i - lag] })
        .collect()
}

/// `values - shift(values, 1)`. Row 0 is `None`.
pub fn diff(values: &[Option<f64>]) -> Vec<Option<f64>> {
    sub(values, &shift(values, 1))
}

pub fn sub(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| Some((*x)? - (*y)?))
        .collect()
}

/// Elementwise `a / b`; `None` when either side is undefined or `b == 0`.
pub fn div(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| match (*x, *y) {
            (Some(x), Some(y)) if y != 0.0 => Some(x / y),
            _ => None,
        })
        .collect()
}

pub fn abs(values: &[Option<f64>]) -> Vec<Option<f64>> {
    map(values, f64::abs)
}

/// Apply `f` to every defined value.
pub fn map(values: &[Option<f64>], f: impl Fn(f64) -> f64) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(&f)).collect()
}

/// Row-wise maximum across aligned series.
///
/// Undefined operands are skipped; a row is `None` only when every operand
/// is undefined there.
pub fn max_horizontal(columns: &[&[Option<f64>]]) -> Vec<Option<f64>> {
    let len = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..len)
        .map(|i| columns.iter().filter_map(|c| c[i]).reduce(f64::max))
        .collect()
}

/// Replace undefined values with `fill`.
pub fn fill_undefined(values: &[Option<f64>], fill: f64) -> Vec<Option<f64>> {
    values.iter().map(|v| Some(v.unwrap_or(fill))).collect()
}

/// `max(value, floor)` for every defined value.
pub fn clip_lower(values: &[Option<f64>], floor: f64) -> Vec<Option<f64>> {
    map(values, |x| x.max(floor))
}
