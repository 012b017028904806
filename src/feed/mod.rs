//! Price feed module
//!
//! Provides the current USD quote for a ticker from an external price source

mod coingecko;
mod types;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig, COINGECKO_API_URL};
pub use types::Quote;

use async_trait::async_trait;
use thiserror::Error;

/// Price feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Ticker absent from an otherwise well-formed feed response
    #[error("ticker not known to price feed: {0}")]
    NotFound(String),
    /// Network failure, timeout, or non-2xx status from the feed
    #[error("price feed unavailable: {0}")]
    Unavailable(String),
    /// Response body did not have the expected shape
    #[error("price feed response malformed: {0}")]
    Malformed(String),
}

/// Trait for price source implementations
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current USD quote for a ticker
    async fn fetch_price(&self, ticker: &str) -> Result<Quote, FeedError>;
}
