//! Time-series store module
//!
//! Append-only per-ticker price observations with descending paginated reads.
//! Layout is a composite key: partition = ticker, sort = `"price_" + ISO-8601
//! timestamp`. The timestamp encoding is fixed-width UTC so lexical order on
//! sort keys equals chronological order.

mod jsonl;
mod key;
mod memory;
mod types;

pub use jsonl::JsonlStore;
pub use key::{encode_sort_key, format_timestamp, validate_token, SORT_KEY_PREFIX};
pub use memory::MemoryStore;
pub use types::{HistoryPage, ObservationRef, PriceObservation};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::ops::Bound;
use thiserror::Error;

/// Page size ceiling imposed by the bundled engines
pub const MAX_PAGE_SIZE: usize = 100;

/// Time-series store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage unreachable or failing
    #[error("price store unavailable: {0}")]
    Unavailable(String),
    /// Continuation token did not decode as a scan position
    #[error("invalid continuation token: {0}")]
    InvalidToken(String),
}

/// Trait for time-series store implementations
///
/// `append` is the sole mutator. Identical `(ticker, timestamp)` pairs
/// overwrite the same slot; the store does not deduplicate.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Persist one observation under `(ticker, "price_" + timestamp)`
    async fn append(
        &self,
        ticker: &str,
        timestamp: DateTime<Utc>,
        price_usd: Decimal,
    ) -> Result<ObservationRef, StoreError>;

    /// Read up to `limit` observations for `ticker`, newest first,
    /// resuming strictly after `token` when present
    async fn query_history(
        &self,
        ticker: &str,
        limit: usize,
        token: Option<&str>,
    ) -> Result<HistoryPage, StoreError>;
}

/// One ticker's slice of the keyspace, ordered by sort key
pub(crate) type Partition = BTreeMap<String, PriceObservation>;

/// Clamp a caller-supplied limit to the engine's capabilities
///
/// A zero-item page could never terminate pagination, so the floor is 1.
pub(crate) fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Descending scan over one partition with look-ahead pagination
///
/// Scans one row past `limit`; the extra row's existence decides whether a
/// continuation token (the last returned sort key) is handed back.
pub(crate) fn scan_descending(
    partition: &Partition,
    limit: usize,
    resume_after: Option<&str>,
) -> HistoryPage {
    let upper = match resume_after {
        Some(key) => Bound::Excluded(key),
        None => Bound::Unbounded,
    };

    let mut items: Vec<PriceObservation> = partition
        .range::<str, _>((Bound::Unbounded, upper))
        .rev()
        .take(limit + 1)
        .map(|(_, obs)| obs.clone())
        .collect();

    let next_token = if items.len() > limit {
        items.truncate(limit);
        items.last().map(|obs| obs.sort_key())
    } else {
        None
    };

    HistoryPage {
        items,
        next_token,
        limit,
    }
}
