//! Ingestion orchestrator: fetches symbols one at a time and writes raw files.
//!
//! Symbols are processed strictly sequentially: concurrent requests against
//! the provider produce lock/contention errors. A symbol that fails or comes
//! back empty is logged and skipped; the batch always runs to the end.

use super::provider::{DataError, DataProvider};
use super::raw_store::RawStore;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Progress callback for multi-symbol ingestion.
pub trait IngestProgress {
    /// Called before requesting a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize, start: NaiveDate, end: NaiveDate);

    /// Called after a symbol's raw file was written.
    fn on_saved(&self, symbol: &str, path: &Path);

    /// Called when the provider returned no rows for a symbol.
    fn on_empty(&self, symbol: &str);

    /// Called when fetching or writing a symbol failed.
    fn on_error(&self, symbol: &str, error: &DataError);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, summary: &IngestSummary);
}

/// Progress reporter that emits `tracing` events.
pub struct TracingProgress;

impl IngestProgress for TracingProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize, start: NaiveDate, end: NaiveDate) {
        info!(
            "[{}/{}] Downloading data for {symbol} from {start} to {end}",
            index + 1,
            total
        );
    }

    fn on_saved(&self, symbol: &str, path: &Path) {
        info!("Saved raw data for {symbol} to {}", path.display());
    }

    fn on_empty(&self, symbol: &str) {
        warn!("No data fetched for {symbol}. Skipping.");
    }

    fn on_error(&self, symbol: &str, error: &DataError) {
        error!("An error occurred while fetching data for {symbol}: {error}");
    }

    fn on_batch_complete(&self, summary: &IngestSummary) {
        info!(
            "All downloads complete: {} saved, {} empty, {} failed",
            summary.saved.len(),
            summary.empty.len(),
            summary.failed.len()
        );
    }
}

/// Outcome of an ingestion batch.
#[derive(Debug, Default)]
pub struct IngestSummary {
    /// Symbols written, with their raw file paths.
    pub saved: Vec<(String, PathBuf)>,
    /// Symbols for which the provider returned no rows.
    pub empty: Vec<String>,
    /// Symbols that failed, with the error.
    pub failed: Vec<(String, DataError)>,
}

impl IngestSummary {
    pub fn total(&self) -> usize {
        self.saved.len() + self.empty.len() + self.failed.len()
    }

    pub fn all_saved(&self) -> bool {
        self.empty.is_empty() && self.failed.is_empty()
    }
}

/// Fetch every symbol over `[start, end)` and write its raw file.
///
/// Never returns an error. Each symbol's outcome is reported through
/// `progress` and collected in the returned summary.
pub fn fetch_and_save(
    provider: &dyn DataProvider,
    store: &RawStore,
    symbols: &[&str],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn IngestProgress,
) -> IngestSummary {
    let mut summary = IngestSummary::default();
    let total = symbols.len();

    info!(
        "Starting sequential download for {symbols:?} via {}",
        provider.name()
    );

    if start > end {
        error!("{}", DataError::InvalidRange { start, end });
        progress.on_batch_complete(&summary);
        return summary;
    }

    match store.ensure_dir() {
        Ok(true) => info!("Created directory: {}", store.raw_dir().display()),
        Ok(false) => {}
        Err(e) => {
            error!("Cannot prepare raw data directory: {e}");
            progress.on_batch_complete(&summary);
            return summary;
        }
    }

    for (i, symbol) in symbols.iter().enumerate() {
        progress.on_start(symbol, i, total, start, end);

        match fetch_single(provider, store, symbol, start, end) {
            Ok(Some(path)) => {
                progress.on_saved(symbol, &path);
                summary.saved.push((symbol.to_string(), path));
            }
            Ok(None) => {
                progress.on_empty(symbol);
                summary.empty.push(symbol.to_string());
            }
            Err(e) => {
                progress.on_error(symbol, &e);
                summary.failed.push((symbol.to_string(), e));
            }
        }
    }

    progress.on_batch_complete(&summary);
    summary
}

/// Fetch one symbol and write it. `Ok(None)` means the provider had no rows.
fn fetch_single(
    provider: &dyn DataProvider,
    store: &RawStore,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<PathBuf>, DataError> {
    let fetched = provider.fetch(symbol, start, end)?;
    if fetched.is_empty() {
        return Ok(None);
    }
    store.write(symbol, &fetched.bars).map(Some)
}
