//! Look-ahead contamination tests for every registered indicator.
//!
//! Invariant: no indicator value at row t may depend on rows t+1 or later.
//!
//! Method: compute on a truncated table (rows 0..100) and the full table
//! (rows 0..200). Rows 0..100 must be identical between both runs.

use calcs_core::components::{all_indicators, param_set, Indicator, ParamSet};
use calcs_core::Bar;
use chrono::NaiveDate;

/// Generate N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = price.max(10.0); // floor at 10

        let open = price - 0.5;
        let close = price + 0.3;
        let high = open.max(close) + 2.0;
        let low = open.min(close) - 2.0;

        bars.push(Bar {
            datetime: start + chrono::Duration::minutes(5 * i as i64),
            open,
            high,
            low,
            close,
            volume: 1000 + (i as u64 * 100),
        });
    }

    bars
}

fn params_for(symbol: &str) -> ParamSet {
    match symbol {
        "macd" => param_set([("fast_period", 12), ("slow_period", 26), ("signal_period", 9)]),
        _ => param_set([("window", 14)]),
    }
}

fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &[Bar], truncated_len: usize) {
    let symbol = indicator.symbol();
    let params = params_for(symbol);
    let truncated = full_bars[..truncated_len].to_vec();
    let full = full_bars.to_vec();

    let full_result = indicator.compute(&full, &params).unwrap();
    let truncated_result = indicator.compute(&truncated, &params).unwrap();

    assert_eq!(truncated_result.len(), truncated_len, "{symbol}: truncated length");
    assert_eq!(full_result.len(), full_bars.len(), "{symbol}: full length");
    assert_eq!(
        truncated_result.values[..],
        full_result.values[..truncated_len],
        "{symbol}: truncated and full series diverge"
    );
    assert!(
        full_result.defined_count() > 0,
        "{symbol}: no defined values in 200 rows"
    );
}

#[test]
fn no_indicator_looks_ahead() {
    let bars = make_test_bars(200);
    for indicator in all_indicators() {
        assert_no_lookahead(indicator.as_ref(), &bars, 100);
    }
}

#[test]
fn no_lookahead_at_every_cut_for_short_series() {
    let bars = make_test_bars(40);
    for indicator in all_indicators() {
        for cut in 1..bars.len() {
            assert_no_lookahead_values(indicator.as_ref(), &bars, cut);
        }
    }
}

fn assert_no_lookahead_values(indicator: &dyn Indicator, full_bars: &[Bar], cut: usize) {
    let params = params_for(indicator.symbol());
    let full = indicator.compute(&full_bars.to_vec(), &params).unwrap();
    let truncated = indicator
        .compute(&full_bars[..cut].to_vec(), &params)
        .unwrap();
    assert_eq!(
        truncated.values[..],
        full.values[..cut],
        "{} diverges at cut {cut}",
        indicator.symbol()
    );
}
