//! The shared five-row OHLCV fixture.
//!
//! Five 5-minute bars on 2024-10-01 from 09:30. Every indicator's self-test
//! runs against these rows.

use crate::domain::Bar;
use chrono::{Duration, NaiveDate, NaiveDateTime};

const OPEN: [f64; 5] = [100.0, 102.0, 101.0, 103.0, 104.0];
const HIGH: [f64; 5] = [102.0, 103.0, 102.0, 105.0, 106.0];
const LOW: [f64; 5] = [99.0, 101.0, 100.0, 102.0, 103.0];
const CLOSE: [f64; 5] = [101.0, 102.0, 101.0, 104.0, 105.0];
const VOLUME: [u64; 5] = [1000, 1500, 1200, 1600, 1700];

fn session_open() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap_or_default()
}

pub fn sample_bars() -> Vec<Bar> {
    let start = session_open();
    (0..CLOSE.len())
        .map(|i| Bar {
            datetime: start + Duration::minutes(5 * i as i64),
            open: OPEN[i],
            high: HIGH[i],
            low: LOW[i],
            close: CLOSE[i],
            volume: VOLUME[i],
        })
        .collect()
}
