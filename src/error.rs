//! Query-level error taxonomy
//!
//! Every failure a query operation can surface. Feed and store errors pass
//! through unchanged so callers see the originating kind, never a masked one.

use crate::feed::FeedError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by the `ticker` and `priceHistory` operations
#[derive(Debug, Error)]
pub enum QueryError {
    /// Price feed failure (not found, unavailable, malformed)
    #[error(transparent)]
    Feed(#[from] FeedError),
    /// Time-series store failure (unavailable, invalid token)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    /// True if the failure is the feed not knowing the ticker
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::Feed(FeedError::NotFound(_)))
    }
}
