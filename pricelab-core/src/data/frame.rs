//! Date-indexed numeric table shared by prices, returns and rolling statistics.

use chrono::NaiveDate;

/// A table indexed by date with one `f64` column per symbol.
///
/// Invariants: `dates` ascend strictly, every column has `dates.len()`
/// values, and `names[i]` labels `columns[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateFrame {
    dates: Vec<NaiveDate>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl DateFrame {
    /// An empty table with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from a date axis and named columns.
    ///
    /// Returns `None` if any column length differs from the date axis or the
    /// dates are not strictly ascending.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<(String, Vec<f64>)>) -> Option<Self> {
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        if columns.iter().any(|(_, v)| v.len() != dates.len()) {
            return None;
        }
        let (names, columns) = columns.into_iter().unzip();
        Some(Self {
            dates,
            names,
            columns,
        })
    }

    /// True when the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column values by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Iterate `(name, values)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(&self.columns)
            .map(|(n, c)| (n.as_str(), c.as_slice()))
    }

    /// Keep only the rows for which `keep(row_index)` is true.
    pub(crate) fn retain_rows(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let mask: Vec<bool> = (0..self.len()).map(&mut keep).collect();
        let mut i = 0;
        self.dates.retain(|_| {
            i += 1;
            mask[i - 1]
        });
        for column in &mut self.columns {
            let mut i = 0;
            column.retain(|_| {
                i += 1;
                mask[i - 1]
            });
        }
    }

    /// Apply `f` to every column, keeping the output rows `offset..` of the
    /// date axis. `f` must return `len() - offset` values per column.
    pub(crate) fn map_columns(&self, offset: usize, f: impl Fn(&[f64]) -> Vec<f64>) -> Self {
        let dates = self.dates.get(offset..).unwrap_or(&[]).to_vec();
        let columns = self.columns.iter().map(|c| f(c.as_slice())).collect();
        Self {
            dates,
            names: self.names.clone(),
            columns,
        }
    }

    /// Drop every row that holds a NaN in any column.
    pub(crate) fn drop_nan_rows(&mut self) {
        let columns = &self.columns;
        let keep: Vec<bool> = (0..self.dates.len())
            .map(|r| columns.iter().all(|c| !c[r].is_nan()))
            .collect();
        self.retain_rows(|r| keep[r]);
    }
}
