//! CoinGecko simple-price client
//!
//! Fetches spot prices from CoinGecko's `/api/v3/simple/price` endpoint.
//! The response is a map keyed by ticker id, e.g. `{"bitcoin": {"usd": 50000}}`;
//! we extract exactly the queried ticker's sub-object.

use super::{FeedError, PriceSource, Quote};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com";

/// Quote currency is fixed; multi-currency is out of scope
const QUOTE_CURRENCY: &str = "usd";

/// Configuration for the CoinGecko client
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for CoinGecko's simple price API
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    client: Client,
}

impl CoinGeckoClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(CoinGeckoConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: CoinGeckoConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Extract the queried ticker's quote from the response body
    ///
    /// An unknown ticker comes back as a 200 with the key simply missing,
    /// which is a distinct condition from a body we cannot read at all.
    fn extract_quote(ticker: &str, body: &HashMap<String, Value>) -> Result<Quote, FeedError> {
        let entry = body
            .get(ticker)
            .ok_or_else(|| FeedError::NotFound(ticker.to_string()))?;

        let usd: Decimal = entry
            .get(QUOTE_CURRENCY)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or_else(|| {
                FeedError::Malformed(format!("no {} quote for ticker {}", QUOTE_CURRENCY, ticker))
            })?;

        Ok(Quote { usd })
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_price(&self, ticker: &str) -> Result<Quote, FeedError> {
        let url = format!("{}/api/v3/simple/price", self.config.base_url);

        tracing::debug!(url = %url, ticker, "Fetching quote from CoinGecko");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ticker), ("vs_currencies", QUOTE_CURRENCY)])
            .send()
            .await
            .map_err(|e| FeedError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Unavailable(format!(
                "feed returned status {}",
                status
            )));
        }

        let body: HashMap<String, Value> = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        let quote = Self::extract_quote(ticker, &body)?;

        tracing::debug!(ticker, usd = %quote.usd, "Fetched quote");

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse_body(json: &str) -> HashMap<String, Value> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = CoinGeckoClient::new();
        assert_eq!(client.config.base_url, COINGECKO_API_URL);
        assert_eq!(client.config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_client_custom_config() {
        let config = CoinGeckoConfig {
            base_url: "https://test.example.com".to_string(),
            timeout: Duration::from_secs(3),
        };
        let client = CoinGeckoClient::with_config(config);
        assert_eq!(client.config.base_url, "https://test.example.com");
    }

    #[test]
    fn test_extract_quote() {
        let body = parse_body(r#"{"bitcoin": {"usd": 50000}}"#);
        let quote = CoinGeckoClient::extract_quote("bitcoin", &body).unwrap();
        assert_eq!(quote.usd, dec!(50000));
    }

    #[test]
    fn test_extract_quote_fractional() {
        let body = parse_body(r#"{"dogecoin": {"usd": 0.0812}}"#);
        let quote = CoinGeckoClient::extract_quote("dogecoin", &body).unwrap();
        assert_eq!(quote.usd, dec!(0.0812));
    }

    #[test]
    fn test_extract_quote_unknown_ticker() {
        let body = parse_body(r#"{}"#);
        let err = CoinGeckoClient::extract_quote("not-a-coin", &body).unwrap_err();
        assert!(matches!(err, FeedError::NotFound(_)));
    }

    #[test]
    fn test_extract_quote_ticker_case_sensitive() {
        let body = parse_body(r#"{"bitcoin": {"usd": 50000}}"#);
        let err = CoinGeckoClient::extract_quote("Bitcoin", &body).unwrap_err();
        assert!(matches!(err, FeedError::NotFound(_)));
    }

    #[test]
    fn test_extract_quote_missing_currency() {
        let body = parse_body(r#"{"bitcoin": {"eur": 42000}}"#);
        let err = CoinGeckoClient::extract_quote("bitcoin", &body).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }

    #[test]
    fn test_extract_quote_non_numeric_price() {
        let body = parse_body(r#"{"bitcoin": {"usd": "fifty grand"}}"#);
        let err = CoinGeckoClient::extract_quote("bitcoin", &body).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }
}
