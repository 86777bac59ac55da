//! PriceLab Core: market-data ingestion and risk/return statistics.
//!
//! This crate contains:
//! - A data provider trait with a Yahoo Finance implementation
//! - Sequential ingestion that writes one raw CSV per symbol
//! - A loader that aligns raw files into a single forward-filled price table
//! - Pure statistics: daily returns, Sharpe ratio, Value at Risk, rolling volatility
//! - TOML run configuration

pub mod config;
pub mod data;
pub mod stats;

pub use config::{ConfigError, RunConfig};
