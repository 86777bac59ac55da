//! Daily returns.

use crate::data::DateFrame;

/// Fractional change between consecutive values: `v[t] / v[t-1] - 1`.
///
/// The result is one element shorter than the input.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Daily returns of every column of a price table.
///
/// The first row has no predecessor and is dropped, as is any row where a
/// return is NaN (a zero price followed by a zero price).
pub fn daily_returns(prices: &DateFrame) -> DateFrame {
    let mut returns = prices.map_columns(1, pct_change);
    returns.drop_nan_rows();
    returns
}
