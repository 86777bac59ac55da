//! Risk/return statistics: pure functions over price and return tables.
//!
//! Every statistic comes in two forms: a slice form for a single series and
//! a table form that applies it to each column of a [`DateFrame`]. Nothing
//! here does I/O or keeps state, and degenerate inputs produce non-finite
//! numbers rather than errors.
//!
//! [`DateFrame`]: crate::data::DateFrame

pub mod report;
pub mod returns;
pub mod risk;
pub mod volatility;

pub use report::{RiskParams, RiskReport, SymbolRisk};
pub use returns::{daily_returns, pct_change};
pub use risk::{
    sharpe_ratio, sharpe_ratio_by_column, value_at_risk, value_at_risk_by_column,
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RISK_FREE_RATE,
};
pub use volatility::{rolling_std, rolling_volatility, DEFAULT_WINDOW};

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// ─── Helpers ────────────────────────────────────────────────────────

/// Arithmetic mean. NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator). NaN below two values.
///
/// A constant finite series gives exactly 0.0.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let first = values[0];
    if first.is_finite() && values.iter().all(|v| *v == first) {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Copy of `values` without NaNs.
pub(crate) fn without_nan(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}
