//! Rolling volatility.

use super::sample_std;
use crate::data::DateFrame;

/// Default rolling window, in rows.
pub const DEFAULT_WINDOW: usize = 30;

/// Sample standard deviation over each full window of `window` values.
///
/// Output element `i` covers `values[i..i + window]`, so the result has
/// `len − window + 1` elements, or none when the series is shorter than the
/// window or `window` is zero. A window that contains a NaN yields NaN.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values.windows(window).map(sample_std).collect()
}

/// Rolling standard deviation of every column of a returns table.
///
/// Each output row is dated with the last date of its window. Rows before
/// the first full window are dropped, as are rows where any column is NaN
/// (every row, for a window of one).
pub fn rolling_volatility(daily_returns: &DateFrame, window: usize) -> DateFrame {
    if window == 0 || daily_returns.len() < window {
        return daily_returns.map_columns(daily_returns.len(), |_| Vec::new());
    }
    let mut vol = daily_returns.map_columns(window - 1, |c| rolling_std(c, window));
    vol.drop_nan_rows();
    vol
}
