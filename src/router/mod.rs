//! Query router
//!
//! Dispatches the two boundary operations: `ticker` runs the resolver
//! pipeline, `priceHistory` reads the store directly and never touches the
//! feed. No business logic lives here beyond default-filling the page size.

use crate::error::QueryError;
use crate::feed::PriceSource;
use crate::pipeline::{TickerInfo, TickerPipeline};
use crate::store::{HistoryPage, ObservationStore};
use std::sync::Arc;

/// Page size used when the caller does not supply one
pub const DEFAULT_HISTORY_LIMIT: usize = 25;

/// Router over the two query operations
pub struct QueryRouter {
    pipeline: TickerPipeline,
    store: Arc<dyn ObservationStore>,
}

impl QueryRouter {
    pub fn new(feed: Arc<dyn PriceSource>, store: Arc<dyn ObservationStore>) -> Self {
        Self {
            pipeline: TickerPipeline::new(feed, store.clone()),
            store,
        }
    }

    /// Current price: fetch, persist, report
    pub async fn ticker(&self, ticker: &str) -> Result<TickerInfo, QueryError> {
        self.pipeline.resolve(ticker).await
    }

    /// Price history: direct descending range read, paginated
    pub async fn price_history(
        &self,
        ticker: &str,
        limit: Option<usize>,
        next_token: Option<&str>,
    ) -> Result<HistoryPage, QueryError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let page = self.store.query_history(ticker, limit, next_token).await?;
        Ok(page)
    }
}
