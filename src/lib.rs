//! crypto-ticker: query core for a crypto ticker's current and historical price
//!
//! This library provides the core components for:
//! - Live quote lookup against an external price feed (CoinGecko)
//! - A per-ticker append-only time series with descending paginated reads
//! - The two-stage resolver pipeline (fetch quote, then persist observation)
//! - Query routing for the `ticker` and `priceHistory` operations

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod router;
pub mod store;
pub mod telemetry;
