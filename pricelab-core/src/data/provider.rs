//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over market-data sources so ingestion can
//! run against Yahoo Finance in production and a scripted provider in tests.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Raw daily bar exactly as the provider returned it.
///
/// Every price cell is optional: providers occasionally return nulls for a
/// single field while the rest of the row is populated.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} for {symbol}")]
    HttpStatus { symbol: String, status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("raw data file for {symbol} not found at {}", path.display())]
    MissingRawFile { symbol: String, path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single symbol.
///
/// An empty `bars` vector means the provider had nothing for the range.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
}

impl FetchResult {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Trait for market-data providers.
///
/// Implementations only fetch. Persisting the result is the raw store's job.
pub trait DataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over `[start, end)`.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}
