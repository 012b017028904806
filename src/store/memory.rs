//! In-memory store engine
//!
//! Reference engine: partitions held in a map of ordered sort-key trees.
//! Useful for tests and as the semantic baseline the durable engine mirrors.

use super::key::{encode_sort_key, format_timestamp, validate_token};
use super::{
    clamp_limit, scan_descending, HistoryPage, ObservationRef, ObservationStore, Partition,
    PriceObservation, StoreError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory observation store
#[derive(Debug, Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<String, Partition>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observations held for a ticker
    pub async fn len(&self, ticker: &str) -> usize {
        self.partitions
            .read()
            .await
            .get(ticker)
            .map_or(0, |p| p.len())
    }
}

#[async_trait]
impl ObservationStore for MemoryStore {
    async fn append(
        &self,
        ticker: &str,
        timestamp: DateTime<Utc>,
        price_usd: Decimal,
    ) -> Result<ObservationRef, StoreError> {
        let observation = PriceObservation {
            ticker: ticker.to_string(),
            timestamp: format_timestamp(timestamp),
            price_usd,
        };
        let sort_key = encode_sort_key(timestamp);

        let mut partitions = self.partitions.write().await;
        // Sort-key collision overwrites: last write wins
        partitions
            .entry(ticker.to_string())
            .or_default()
            .insert(sort_key.clone(), observation);

        Ok(ObservationRef {
            ticker: ticker.to_string(),
            sort_key,
        })
    }

    async fn query_history(
        &self,
        ticker: &str,
        limit: usize,
        token: Option<&str>,
    ) -> Result<HistoryPage, StoreError> {
        if let Some(token) = token {
            validate_token(token)?;
        }
        let limit = clamp_limit(limit);

        let partitions = self.partitions.read().await;
        let page = match partitions.get(ticker) {
            Some(partition) => scan_descending(partition, limit, token),
            None => HistoryPage {
                items: vec![],
                next_token: None,
                limit,
            },
        };

        Ok(page)
    }
}
