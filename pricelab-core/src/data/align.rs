//! Multi-symbol time alignment.
//!
//! Given one price series per symbol, align them to a common timeline (the
//! union of all dates), forward-fill each column, then drop every row that
//! still has a gap. The result has a value for every symbol on every date.

use super::frame::DateFrame;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// A single named price series, as extracted from one raw file.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub name: String,
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

impl PriceSeries {
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDate, Option<f64>)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Align series on the union of their dates.
///
/// For each column, a missing value takes the last observed value before it
/// (no interpolation). Rows that remain incomplete after filling, which are
/// the ones before a symbol's first observation, are dropped. Column order
/// follows the input order.
pub fn align_forward_filled(series: &[PriceSeries]) -> DateFrame {
    if series.is_empty() {
        return DateFrame::empty();
    }

    // Collect the union of all dates
    let mut all_dates = BTreeSet::new();
    for s in series {
        for (date, _) in &s.points {
            all_dates.insert(*date);
        }
    }
    let dates: Vec<NaiveDate> = all_dates.into_iter().collect();

    let mut columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(series.len());
    for s in series {
        // First occurrence of a date wins
        let mut date_map: HashMap<NaiveDate, Option<f64>> = HashMap::new();
        for (date, value) in &s.points {
            date_map.entry(*date).or_insert(*value);
        }

        let mut last: Option<f64> = None;
        let filled: Vec<f64> = dates
            .iter()
            .map(|date| {
                if let Some(v) = date_map.get(date).copied().flatten() {
                    last = Some(v);
                }
                last.unwrap_or(f64::NAN)
            })
            .collect();

        columns.push((s.name.clone(), filled));
    }

    let mut frame = match DateFrame::new(dates, columns) {
        Some(frame) => frame,
        None => return DateFrame::empty(),
    };
    frame.drop_nan_rows();
    frame
}
