//! Property tests for indicator invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism: same table and parameters give identical output
//! 2. Length: output row count always equals input row count
//! 3. Rolling-mean boundary: first defined row is window - 1
//! 4. RSI range: every defined value lies in [0, 100]
//! 5. MACD identity: histogram = macd_line - signal_line
//! 6. Parameter ranges: 0 and 101 are rejected, 1 and 100 accepted

use chrono::NaiveDate;
use proptest::prelude::*;

use calcs_core::components::{compute, param_set, ParamSet};
use calcs_core::indicators::{macd_lines, MacdParams};
use calcs_core::primitives::rolling_mean;
use calcs_core::{Bar, ContractError};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(10.0..500.0_f64, 0..max_len)
        .prop_map(|v| v.into_iter().map(|p| (p * 100.0).round() / 100.0).collect())
}

fn arb_window() -> impl Strategy<Value = i64> {
    1..=100_i64
}

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                datetime: start + chrono::Duration::minutes(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: 1000,
            }
        })
        .collect()
}

fn params_for(symbol: &str, window: i64) -> ParamSet {
    match symbol {
        "macd" => param_set([
            ("fast_period", window),
            ("slow_period", (window + 7).min(100)),
            ("signal_period", (window / 2).max(1)),
        ]),
        _ => param_set([("window", window)]),
    }
}

// ── 1 & 2. Determinism and length ────────────────────────────────────

proptest! {
    /// Same inputs, same outputs, one row per input row.
    #[test]
    fn deterministic_and_length_preserving(
        closes in arb_closes(120),
        window in arb_window(),
    ) {
        let bars = bars_from_closes(&closes);
        for symbol in ["atr", "rsi", "macd"] {
            let params = params_for(symbol, window);
            let first = compute(symbol, &bars, &params).unwrap();
            let second = compute(symbol, &bars, &params).unwrap();
            prop_assert_eq!(first.len(), bars.len());
            prop_assert_eq!(&first, &second);
        }
    }
}

// ── 3. Rolling-mean boundary ─────────────────────────────────────────

proptest! {
    /// With fully defined input, rows 0..window-1 are None and the rest are
    /// Some, unless the window is longer than the series.
    #[test]
    fn rolling_mean_first_defined_row(
        closes in arb_closes(150),
        window in 1usize..=100,
    ) {
        let values: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
        let out = rolling_mean(&values, window);
        prop_assert_eq!(out.len(), values.len());
        for (i, v) in out.iter().enumerate() {
            prop_assert_eq!(v.is_some(), i + 1 >= window, "row {} window {}", i, window);
        }
    }
}

// ── 4. RSI range ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_stays_in_range(
        closes in arb_closes(200),
        window in arb_window(),
    ) {
        let out = compute("rsi", &bars_from_closes(&closes), &param_set([("window", window)]))
            .unwrap();
        for (_, v) in out.defined() {
            prop_assert!((0.0..=100.0).contains(&v), "RSI out of range: {}", v);
        }
    }
}

// ── 5. MACD identity ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn macd_histogram_is_line_minus_signal(
        closes in arb_closes(200),
        fast in 1usize..=30,
        slow in 1usize..=60,
        signal in 1usize..=20,
    ) {
        let bars = bars_from_closes(&closes);
        let lines = macd_lines(&bars, &MacdParams::new(fast, slow, signal).unwrap()).unwrap();
        for i in 0..bars.len() {
            let expected = match (lines.macd_line.get(i), lines.signal_line.get(i)) {
                (Some(line), Some(signal)) => Some(line - signal),
                _ => None,
            };
            prop_assert_eq!(lines.histogram.get(i), expected);
        }
    }
}

// ── 6. Parameter ranges ──────────────────────────────────────────────

proptest! {
    /// Anything outside [1, 100] is an OutOfRange contract violation.
    #[test]
    fn window_outside_range_rejected(
        window in prop_oneof![-1000..=0_i64, 101..=1000_i64],
    ) {
        let bars = bars_from_closes(&[100.0, 101.0, 102.0]);
        for symbol in ["atr", "rsi"] {
            let err = compute(symbol, &bars, &param_set([("window", window)])).unwrap_err();
            let is_out_of_range = matches!(
                err.contract(),
                Some(ContractError::OutOfRange { param: "window", .. })
            );
            prop_assert!(is_out_of_range, "{} accepted window {}", symbol, window);
        }
    }
}

#[test]
fn window_bounds_are_inclusive() {
    let bars = bars_from_closes(&[100.0, 101.0, 102.0]);
    for symbol in ["atr", "rsi"] {
        for window in [1, 100] {
            assert!(compute(symbol, &bars, &param_set([("window", window)])).is_ok());
        }
    }
}
