//! Shared helpers for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use pricelab_core::data::{
    DataError, DataProvider, FetchResult, IngestProgress, IngestSummary, RawBar,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Consecutive calendar days starting at `start`.
pub fn days(start: &str, n: usize) -> Vec<NaiveDate> {
    let base = date(start);
    (0..n)
        .map(|i| base + chrono::Duration::days(i as i64))
        .collect()
}

/// One bar per date with the given closes; adjusted close is close - 1.
pub fn bars(dates: &[NaiveDate], closes: &[f64], with_adj: bool) -> Vec<RawBar> {
    dates
        .iter()
        .zip(closes)
        .map(|(date, &close)| RawBar {
            date: *date,
            open: Some(close - 0.5),
            high: Some(close + 1.0),
            low: Some(close - 1.0),
            close: Some(close),
            adj_close: with_adj.then_some(close - 1.0),
            volume: Some(1_000),
        })
        .collect()
}

/// What the scripted provider answers for a symbol.
pub enum Reply {
    Bars(Vec<RawBar>),
    Empty,
    Fail(String),
}

/// In-memory provider that replays scripted replies and records every call.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: HashMap<String, Reply>,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, symbol: &str, reply: Reply) -> Self {
        self.replies.insert(symbol.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl DataProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        self.calls.borrow_mut().push(symbol.to_string());
        match self.replies.get(symbol) {
            Some(Reply::Bars(bars)) => Ok(FetchResult {
                symbol: symbol.to_string(),
                bars: bars.clone(),
            }),
            Some(Reply::Empty) => Ok(FetchResult {
                symbol: symbol.to_string(),
                bars: Vec::new(),
            }),
            Some(Reply::Fail(msg)) => Err(DataError::NetworkUnreachable(msg.clone())),
            None => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
        }
    }
}

/// Progress hook that records the order of callbacks.
#[derive(Default)]
pub struct RecordingProgress {
    pub events: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl IngestProgress for RecordingProgress {
    fn on_start(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        _start: NaiveDate,
        _end: NaiveDate,
    ) {
        self.events.borrow_mut().push(format!("start:{symbol}"));
    }

    fn on_saved(&self, symbol: &str, _path: &Path) {
        self.events.borrow_mut().push(format!("saved:{symbol}"));
    }

    fn on_empty(&self, symbol: &str) {
        self.events.borrow_mut().push(format!("empty:{symbol}"));
    }

    fn on_error(&self, symbol: &str, _error: &DataError) {
        self.events.borrow_mut().push(format!("error:{symbol}"));
    }

    fn on_batch_complete(&self, summary: &IngestSummary) {
        self.events
            .borrow_mut()
            .push(format!("done:{}", summary.total()));
    }
}
