//! Data ingestion, raw-file storage and price-table loading

pub mod align;
pub mod frame;
pub mod ingest;
pub mod loader;
pub mod provider;
pub mod raw_store;
pub mod yahoo;

pub use align::{align_forward_filled, PriceSeries};
pub use frame::DateFrame;
pub use ingest::{fetch_and_save, IngestProgress, IngestSummary, TracingProgress};
pub use loader::load_price_table;
pub use provider::{DataError, DataProvider, FetchResult, RawBar};
pub use raw_store::{RawFileStatus, RawFrame, RawStore, DEFAULT_RAW_DIR};
pub use yahoo::YahooProvider;
