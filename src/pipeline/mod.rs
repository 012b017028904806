//! Resolver pipeline for the current-price operation
//!
//! Two stages with an explicit typed context threaded from one to the next:
//! fetch the live quote, then persist it as an observation. Each stage either
//! produces the next context or fails the whole request with the originating
//! error kind; a feed failure never reaches the store, and a store failure
//! discards the fetched quote rather than reporting an unsaved price.

use crate::error::QueryError;
use crate::feed::{FeedError, PriceSource, Quote};
use crate::store::ObservationStore;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Stage-0 context: the validated inbound request
#[derive(Debug, Clone)]
struct TickerRequest {
    ticker: String,
}

impl TickerRequest {
    /// The only ticker validation this core performs: non-empty
    fn new(ticker: &str) -> Result<Self, FeedError> {
        if ticker.is_empty() {
            return Err(FeedError::NotFound(ticker.to_string()));
        }
        Ok(Self {
            ticker: ticker.to_string(),
        })
    }
}

/// Stage-1 context: the request plus the quote the feed returned
#[derive(Debug, Clone)]
struct QuotedTicker {
    ticker: String,
    quote: Quote,
}

/// Terminal payload of a successful current-price request
#[derive(Debug, Clone, Serialize)]
pub struct TickerInfo {
    pub ticker: String,
    #[serde(rename = "latestPrice")]
    pub latest_price: Quote,
}

/// The fetch-then-persist resolver
pub struct TickerPipeline {
    feed: Arc<dyn PriceSource>,
    store: Arc<dyn ObservationStore>,
}

impl TickerPipeline {
    pub fn new(feed: Arc<dyn PriceSource>, store: Arc<dyn ObservationStore>) -> Self {
        Self { feed, store }
    }

    /// Run the pipeline for one ticker
    ///
    /// The context is scoped to this invocation; nothing is shared across
    /// requests, nothing is retried, and no stage runs after a failure.
    pub async fn resolve(&self, ticker: &str) -> Result<TickerInfo, QueryError> {
        let request = TickerRequest::new(ticker)?;
        let quoted = self.fetch_stage(request).await?;
        self.persist_stage(quoted).await
    }

    /// Stage 1: ticker in, quote out
    async fn fetch_stage(&self, ctx: TickerRequest) -> Result<QuotedTicker, QueryError> {
        let quote = self.feed.fetch_price(&ctx.ticker).await?;

        tracing::debug!(ticker = %ctx.ticker, usd = %quote.usd, "Fetch stage complete");

        Ok(QuotedTicker {
            ticker: ctx.ticker,
            quote,
        })
    }

    /// Stage 2: persist the quote, stamped with the persist-time clock
    async fn persist_stage(&self, ctx: QuotedTicker) -> Result<TickerInfo, QueryError> {
        let observed_at = Utc::now();
        let r = self
            .store
            .append(&ctx.ticker, observed_at, ctx.quote.usd)
            .await?;

        tracing::info!(
            ticker = %r.ticker,
            sort_key = %r.sort_key,
            usd = %ctx.quote.usd,
            "Observation persisted"
        );

        Ok(TickerInfo {
            ticker: ctx.ticker,
            latest_price: ctx.quote,
        })
    }
}
