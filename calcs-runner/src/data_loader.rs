//! Loading OHLCV tables from disk and writing results back.
//!
//! CSV files become `Bar`s (then a `DataFrame`); Parquet files are read as
//! `DataFrame`s directly. Either way, indicators see the same table shape.

use std::fs;
use std::path::{Path, PathBuf};

use calcs_core::{bars_to_frame, Bar};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("missing CSV column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse {field} from '{value}'")]
    BadValue {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: datetime {datetime} is earlier than the previous row")]
    OutOfOrder { row: usize, datetime: NaiveDateTime },

    #[error("unsupported file format '{}' (expected .csv or .parquet)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Header names accepted for the timestamp column.
const DATETIME_HEADERS: [&str; 3] = ["datetime", "timestamp", "date"];

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Empty price cells are undefined (NaN), not errors.
fn parse_price(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        Some(f64::NAN)
    } else {
        s.parse().ok()
    }
}

fn parse_volume(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0);
    }
    s.parse::<u64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

/// Column positions resolved from a CSV header row.
struct CsvLayout {
    datetime: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl CsvLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &'static str| {
            names
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        let datetime = DATETIME_HEADERS
            .iter()
            .find_map(|h| names.iter().position(|n| n == h))
            .ok_or(LoadError::MissingColumn("datetime"))?;
        Ok(Self {
            datetime,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
            volume: find("volume")?,
        })
    }
}

/// Read bars from a CSV file with a `Datetime,Open,High,Low,Close,Volume`
/// header (any case, any column order).
///
/// Rows must be in non-decreasing time order.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Bar>, LoadError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}

/// Read bars from any CSV source. Row numbers in errors are 1-based data rows.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<Bar>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let layout = CsvLayout::from_headers(rdr.headers()?)?;

    let mut bars: Vec<Bar> = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let bad = |field: &'static str, idx: usize| LoadError::BadValue {
            row,
            field,
            value: cell(idx).to_string(),
        };

        let datetime =
            parse_datetime(cell(layout.datetime)).ok_or_else(|| bad("datetime", layout.datetime))?;
        let price = |field, idx| parse_price(cell(idx)).ok_or_else(|| bad(field, idx));
        let bar = Bar {
            datetime,
            open: price("open", layout.open)?,
            high: price("high", layout.high)?,
            low: price("low", layout.low)?,
            close: price("close", layout.close)?,
            volume: parse_volume(cell(layout.volume)).ok_or_else(|| bad("volume", layout.volume))?,
        };

        if let Some(prev) = bars.last() {
            if bar.datetime < prev.datetime {
                return Err(LoadError::OutOfOrder {
                    row,
                    datetime: bar.datetime,
                });
            }
        }
        if !bar.is_void() && !bar.is_sane() {
            warn!(row, datetime = %bar.datetime, "bar fails OHLC sanity check");
        }
        bars.push(bar);
    }

    debug!(rows = bars.len(), "loaded CSV bars");
    Ok(bars)
}

/// Read a Parquet file into a `DataFrame` as-is.
pub fn load_parquet(path: impl AsRef<Path>) -> Result<DataFrame, LoadError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let df = ParquetReader::new(file).finish()?;
    debug!(rows = df.height(), path = %path.display(), "loaded parquet");
    Ok(df)
}

/// Load a table by file extension: `.csv` or `.parquet`/`.pq`.
pub fn load_frame(path: impl AsRef<Path>) -> Result<DataFrame, LoadError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => Ok(bars_to_frame(&load_csv(path)?)?),
        Some("parquet") | Some("pq") => load_parquet(path),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Write a `DataFrame` to a Parquet file.
pub fn write_parquet(df: &DataFrame, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetWriter::new(file).finish(&mut df.clone())?;
    Ok(())
}
