//! Price-table loading from raw files.
//!
//! Reads each symbol's raw file, picks one price column per symbol and aligns
//! the result into a single [`DateFrame`]. Failures never escape: they are
//! logged and reported as an empty table.
//!
//! Policy:
//! 1. Any raw file missing or unreadable → empty table for the whole batch
//! 2. No usable price column in a file → skip that symbol, keep going
//! 3. Nothing usable at all → empty table

use super::align::{align_forward_filled, PriceSeries};
use super::frame::DateFrame;
use super::provider::DataError;
use super::raw_store::{RawFrame, RawStore};
use tracing::{error, info, warn};

/// Preferred price column names, lower-cased, in priority order.
pub const PRICE_COLUMN_PREFERENCE: [&str; 2] = ["adj close", "close"];

/// Load and combine one price column per symbol into a single table.
///
/// Output columns follow `symbols` order (minus skipped symbols) and are
/// named with each symbol's original casing.
pub fn load_price_table(store: &RawStore, symbols: &[&str]) -> DateFrame {
    let mut series = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let frame = match store.read(symbol) {
            Ok(frame) => frame,
            Err(DataError::MissingRawFile { path, .. }) => {
                error!(
                    "Raw data file for {symbol} not found at {}. Run ingestion first: pricelab download",
                    path.display()
                );
                return DateFrame::empty();
            }
            Err(e) => {
                error!("Could not read raw data for {symbol}: {e}");
                return DateFrame::empty();
            }
        };

        match extract_price_series(symbol, &frame) {
            Some(s) => series.push(s),
            None => {
                let available: Vec<String> =
                    frame.columns.iter().map(|c| c.to_lowercase()).collect();
                warn!(
                    "Neither 'Adj Close' nor 'Close' column found in {}. Available columns are: {available:?}",
                    store.raw_path(symbol).display()
                );
            }
        }
    }

    if series.is_empty() {
        error!("Could not load any data. Check the file paths and column names.");
        return DateFrame::empty();
    }

    let table = align_forward_filled(&series);
    info!(
        "Loaded {} of {} symbols, {} aligned rows",
        table.width(),
        symbols.len(),
        table.len()
    );
    table
}

/// Pick the price column for a symbol from its raw frame.
///
/// Column names are compared lower-cased. The returned series is named with
/// the symbol as given.
pub fn extract_price_series(symbol: &str, frame: &RawFrame) -> Option<PriceSeries> {
    let lowered: Vec<String> = frame.columns.iter().map(|c| c.trim().to_lowercase()).collect();

    let index = PRICE_COLUMN_PREFERENCE
        .iter()
        .find_map(|wanted| lowered.iter().position(|c| c == wanted))?;

    let values = frame.column(index)?;
    let points = frame
        .dates
        .iter()
        .copied()
        .zip(values.iter().copied())
        .collect();

    Some(PriceSeries::new(symbol, points))
}
