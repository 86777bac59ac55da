//! Per-symbol raw CSV files.
//!
//! Layout: `{raw_dir}/{symbol-lowercased}_raw.csv`
//!
//! Ingestion writes one file per symbol with the date as the first column and
//! every provider field after it. Writes are atomic (write to .tmp, rename
//! into place), so a rerun either fully replaces a file or leaves it alone.
//! Reading is schema-agnostic: any header is accepted and inspected later.

use super::provider::{DataError, RawBar};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default raw data directory, relative to the working directory.
pub const DEFAULT_RAW_DIR: &str = "data/raw";

const DATE_HEADER: &str = "Date";

/// A raw file read back into memory.
///
/// `columns` excludes the date column. `values[c][r]` is the value of
/// column `c` on `dates[r]`; empty or non-numeric cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    pub columns: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl RawFrame {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Values of the column at `index`.
    pub fn column(&self, index: usize) -> Option<&[Option<f64>]> {
        self.values.get(index).map(|v| v.as_slice())
    }
}

/// Summary of one raw file on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFileStatus {
    pub symbol: String,
    pub path: PathBuf,
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// The raw file store.
#[derive(Debug, Clone)]
pub struct RawStore {
    raw_dir: PathBuf,
}

impl Default for RawStore {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_DIR)
    }
}

impl RawStore {
    pub fn new(raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
        }
    }

    /// Root directory of the store.
    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    /// Path to the raw file for a symbol: `{raw_dir}/{symbol-lowercased}_raw.csv`
    pub fn raw_path(&self, symbol: &str) -> PathBuf {
        self.raw_dir
            .join(format!("{}_raw.csv", symbol.to_lowercase()))
    }

    /// Create the raw directory if it does not exist yet.
    ///
    /// Returns `true` if the directory was created by this call.
    pub fn ensure_dir(&self) -> Result<bool, DataError> {
        if self.raw_dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.raw_dir).map_err(|source| DataError::Io {
            path: self.raw_dir.clone(),
            source,
        })?;
        Ok(true)
    }

    /// Write bars for a symbol, replacing any existing file.
    ///
    /// The `Adj Close` column is written only if at least one bar carries an
    /// adjusted close.
    pub fn write(&self, symbol: &str, bars: &[RawBar]) -> Result<PathBuf, DataError> {
        let path = self.raw_path(symbol);
        let tmp_path = path.with_extension("csv.tmp");

        let with_adj = bars.iter().any(|b| b.adj_close.is_some());

        if let Err(e) = write_csv(&tmp_path, bars, with_adj) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            DataError::Io {
                path: path.clone(),
                source,
            }
        })?;

        Ok(path)
    }

    /// Read a symbol's raw file.
    pub fn read(&self, symbol: &str) -> Result<RawFrame, DataError> {
        let path = self.raw_path(symbol);
        let file = fs::File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => DataError::MissingRawFile {
                symbol: symbol.to_string(),
                path: path.clone(),
            },
            _ => DataError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let csv_err = |source| DataError::Csv {
            path: path.clone(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers = rdr.headers().map_err(csv_err)?.clone();
        let columns: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();

        let mut dates = Vec::new();
        let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); columns.len()];

        for record in rdr.records() {
            let record = record.map_err(csv_err)?;
            let cell = record.get(0).unwrap_or("");
            // Rows without a date are dropped, so extra header rows (e.g.
            // a "Ticker" row under a multi-level header) load through the
            // first header row. Column names still come from that row only.
            let Some(date) = parse_date(cell) else {
                tracing::debug!(symbol, cell, "skipping row without a date");
                continue;
            };

            dates.push(date);
            for (c, col_values) in values.iter_mut().enumerate() {
                col_values.push(record.get(c + 1).and_then(parse_value));
            }
        }

        Ok(RawFrame {
            columns,
            dates,
            values,
        })
    }

    /// Report which symbols have raw files, with row counts and date ranges.
    pub fn status(&self, symbols: &[&str]) -> Vec<Result<RawFileStatus, DataError>> {
        symbols
            .iter()
            .map(|sym| {
                let frame = self.read(sym)?;
                Ok(RawFileStatus {
                    symbol: sym.to_string(),
                    path: self.raw_path(sym),
                    rows: frame.len(),
                    first_date: frame.dates.first().copied(),
                    last_date: frame.dates.last().copied(),
                })
            })
            .collect()
    }
}

fn write_csv(path: &Path, bars: &[RawBar], with_adj: bool) -> Result<(), DataError> {
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header = vec![DATE_HEADER, "Open", "High", "Low", "Close"];
    if with_adj {
        header.push("Adj Close");
    }
    header.push("Volume");
    wtr.write_record(&header).map_err(csv_err)?;

    for bar in bars {
        let mut row = vec![
            bar.date.format("%Y-%m-%d").to_string(),
            format_value(bar.open),
            format_value(bar.high),
            format_value(bar.low),
            format_value(bar.close),
        ];
        if with_adj {
            row.push(format_value(bar.adj_close));
        }
        row.push(bar.volume.map(|v| v.to_string()).unwrap_or_default());
        wtr.write_record(&row).map_err(csv_err)?;
    }

    wtr.flush().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse an ISO-8601 date cell, ignoring any time-of-day suffix.
fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    let day = cell.get(..10).unwrap_or(cell);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn bar(d: &str, close: f64, adj: Option<f64>) -> RawBar {
        RawBar {
            date: date(d),
            open: Some(close - 1.0),
            high: Some(close + 1.0),
            low: Some(close - 2.0),
            close: Some(close),
            adj_close: adj,
            volume: Some(1000),
        }
    }

    #[test]
    fn raw_path_lowercases_symbol() {
        let store = RawStore::new("data/raw");
        assert_eq!(store.raw_path("TSLA"), PathBuf::from("data/raw/tsla_raw.csv"));
    }

    #[test]
    fn write_then_read_keeps_all_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        let bars = vec![
            bar("2024-01-02", 100.25, Some(99.5)),
            bar("2024-01-03", 101.0, Some(100.125)),
        ];

        let path = store.write("SPY", &bars).unwrap();
        assert_eq!(path, dir.path().join("spy_raw.csv"));
        assert!(!path.with_extension("csv.tmp").exists());

        let frame = store.read("SPY").unwrap();
        assert_eq!(
            frame.columns,
            vec!["Open", "High", "Low", "Close", "Adj Close", "Volume"]
        );
        assert_eq!(frame.dates, vec![date("2024-01-02"), date("2024-01-03")]);
        assert_eq!(frame.values[3], vec![Some(100.25), Some(101.0)]);
        assert_eq!(frame.values[4], vec![Some(99.5), Some(100.125)]);
    }

    #[test]
    fn adj_close_column_omitted_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        store.write("BND", &[bar("2024-01-02", 72.0, None)]).unwrap();

        let frame = store.read("BND").unwrap();
        assert_eq!(frame.columns, vec!["Open", "High", "Low", "Close", "Volume"]);
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        match store.read("NONE") {
            Err(DataError::MissingRawFile { symbol, path }) => {
                assert_eq!(symbol, "NONE");
                assert_eq!(path, dir.path().join("none_raw.csv"));
            }
            other => panic!("expected MissingRawFile, got: {other:?}"),
        }
    }

    #[test]
    fn read_tolerates_blank_cells_and_non_date_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        fs::write(
            store.raw_path("X"),
            "Price,Close,Volume\nTicker,X,X\n2024-01-02 00:00:00,10.5,7\n2024-01-03,,8\n",
        )
        .unwrap();

        let frame = store.read("X").unwrap();
        assert_eq!(frame.columns, vec!["Close", "Volume"]);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.values[0], vec![Some(10.5), None]);
    }

    #[test]
    fn ensure_dir_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path().join("data/raw"));
        assert!(store.ensure_dir().unwrap());
        assert!(!store.ensure_dir().unwrap());
    }

    #[test]
    fn status_reports_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        store
            .write(
                "SPY",
                &[bar("2024-01-02", 1.0, None), bar("2024-01-05", 2.0, None)],
            )
            .unwrap();

        let status = store.status(&["SPY", "QQQ"]);
        let spy = status[0].as_ref().unwrap();
        assert_eq!(spy.rows, 2);
        assert_eq!(spy.first_date, Some(date("2024-01-02")));
        assert_eq!(spy.last_date, Some(date("2024-01-05")));
        assert!(matches!(status[1], Err(DataError::MissingRawFile { .. })));
    }
}
