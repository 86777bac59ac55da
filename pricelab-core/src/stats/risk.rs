//! Sharpe ratio and Value at Risk.

use super::{mean, sample_std, without_nan, TRADING_DAYS_PER_YEAR};
use crate::data::DateFrame;

/// Default annual risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0;

/// Default VaR confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Annualized Sharpe ratio from daily returns.
///
/// Sharpe = (mean · 252 − rf) / (std · √252), with the sample standard
/// deviation. NaNs in the input are ignored. Zero variance divides by zero
/// and yields ±inf or NaN; callers should treat a non-finite result as
/// degenerate.
pub fn sharpe_ratio(daily_returns: &[f64], risk_free_rate: f64) -> f64 {
    let returns = without_nan(daily_returns);
    let annualized_return = mean(&returns) * TRADING_DAYS_PER_YEAR;
    let annualized_volatility = sample_std(&returns) * TRADING_DAYS_PER_YEAR.sqrt();
    (annualized_return - risk_free_rate) / annualized_volatility
}

/// Value at Risk: the `(1 − confidence_level)` quantile of daily returns.
///
/// The quantile interpolates linearly between the two nearest order
/// statistics at position `q · (n − 1)`. The result is a signed return, so a
/// loss threshold is typically negative. NaN for an empty sample or a
/// confidence level outside `[0, 1]`.
pub fn value_at_risk(daily_returns: &[f64], confidence_level: f64) -> f64 {
    quantile(daily_returns, 1.0 - confidence_level)
}

/// Sharpe ratio of every column, in column order.
pub fn sharpe_ratio_by_column(returns: &DateFrame, risk_free_rate: f64) -> Vec<(String, f64)> {
    returns
        .iter_columns()
        .map(|(name, values)| (name.to_string(), sharpe_ratio(values, risk_free_rate)))
        .collect()
}

/// Value at Risk of every column, in column order.
pub fn value_at_risk_by_column(returns: &DateFrame, confidence_level: f64) -> Vec<(String, f64)> {
    returns
        .iter_columns()
        .map(|(name, values)| (name.to_string(), value_at_risk(values, confidence_level)))
        .collect()
}

fn quantile(values: &[f64], q: f64) -> f64 {
    if !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let mut sorted = without_nan(values);
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
