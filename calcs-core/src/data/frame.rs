//! Polars conversions for bars and indicator output.

use crate::domain::Bar;
use crate::series::IndicatorSeries;
use polars::prelude::*;

/// Build a `DataFrame` with columns
/// `datetime, open, high, low, close, volume` from bars.
pub fn bars_to_frame(bars: &[Bar]) -> PolarsResult<DataFrame> {
    let datetimes: Vec<i64> = bars
        .iter()
        .map(|b| b.datetime.and_utc().timestamp_millis())
        .collect();
    let opens: Vec<f64> = bars.iter().map(|b| b.open).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<u64> = bars.iter().map(|b| b.volume).collect();

    DataFrame::new(vec![
        Column::new("datetime".into(), datetimes)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?,
        Column::new("open".into(), opens),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
        Column::new("close".into(), closes),
        Column::new("volume".into(), volumes),
    ])
}

impl From<IndicatorSeries> for Column {
    fn from(series: IndicatorSeries) -> Self {
        Column::new(series.name.as_str().into(), series.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixture::sample_bars;
    use crate::data::OhlcvTable;
    use crate::domain::PriceField;

    #[test]
    fn frame_has_ohlcv_columns_and_rows() {
        let bars = sample_bars();
        let df = bars_to_frame(&bars).unwrap();
        assert_eq!(df.height(), 5);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, ["datetime", "open", "high", "low", "close", "volume"]);
        assert_eq!(df.field(PriceField::Low).unwrap(), bars.field(PriceField::Low).unwrap());
    }

    #[test]
    fn series_converts_to_nullable_column() {
        let column: Column = IndicatorSeries::new("atr", vec![None, Some(2.5)]).into();
        assert_eq!(column.name().as_str(), "atr");
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.f64().unwrap().get(1), Some(2.5));
    }
}
