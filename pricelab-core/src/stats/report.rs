//! Per-symbol risk summary built from a combined price table.

use super::{
    daily_returns, mean, rolling_volatility, sharpe_ratio, value_at_risk,
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RISK_FREE_RATE, DEFAULT_WINDOW,
};
use crate::data::DateFrame;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for the risk statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    pub risk_free_rate: f64,
    pub confidence_level: f64,
    pub window: usize,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Statistics for one symbol.
///
/// Non-finite values serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolRisk {
    pub symbol: String,
    pub mean_daily_return: f64,
    pub sharpe_ratio: f64,
    pub value_at_risk: f64,
    /// Rolling volatility on the last date, if any full window exists.
    pub latest_volatility: Option<f64>,
}

/// Risk report across all symbols of a price table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub params: RiskParams,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Number of daily return observations per symbol.
    pub observations: usize,
    pub symbols: Vec<SymbolRisk>,
}

impl RiskReport {
    /// Compute the report from prices. An empty table gives an empty report.
    pub fn compute(prices: &DateFrame, params: &RiskParams) -> Self {
        let returns = daily_returns(prices);
        let vol = rolling_volatility(&returns, params.window);

        let symbols = returns
            .iter_columns()
            .map(|(name, values)| SymbolRisk {
                symbol: name.to_string(),
                mean_daily_return: mean(values),
                sharpe_ratio: sharpe_ratio(values, params.risk_free_rate),
                value_at_risk: value_at_risk(values, params.confidence_level),
                latest_volatility: vol.column(name).and_then(|v| v.last().copied()),
            })
            .collect();

        Self {
            params: *params,
            start_date: prices.dates().first().copied(),
            end_date: prices.dates().last().copied(),
            observations: returns.len(),
            symbols,
        }
    }
}
