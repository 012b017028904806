//! Durable JSONL store engine
//!
//! One append-only `observations.jsonl` under the data directory, one JSON
//! observation per line. The file is replayed into an in-memory partition
//! index on open; appends hit the file before the index, so a failed write
//! never leaves a phantom observation visible to readers.

use super::key::{encode_sort_key, format_timestamp, validate_token};
use super::{
    clamp_limit, scan_descending, HistoryPage, ObservationRef, ObservationStore, Partition,
    PriceObservation, StoreError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// File name of the observation log within the data directory
const LOG_FILE_NAME: &str = "observations.jsonl";

/// Append-only JSONL observation store
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    log: File,
    partitions: HashMap<String, Partition>,
}

impl JsonlStore {
    /// Open (or create) the observation log under `data_dir` and replay it
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| StoreError::Unavailable(format!("create {:?}: {}", data_dir, e)))?;

        let path = data_dir.join(LOG_FILE_NAME);
        let partitions = Self::replay(&path)?;

        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::Unavailable(format!("open {:?}: {}", path, e)))?;

        tracing::info!(
            path = ?path,
            tickers = partitions.len(),
            "Opened observation log"
        );

        Ok(Self {
            path,
            inner: RwLock::new(Inner { log, partitions }),
        })
    }

    /// Path of the backing log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild the partition index from the log
    fn replay(path: &Path) -> Result<HashMap<String, Partition>, StoreError> {
        let mut partitions: HashMap<String, Partition> = HashMap::new();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(partitions),
            Err(e) => {
                return Err(StoreError::Unavailable(format!("open {:?}: {}", path, e)));
            }
        };

        for line in BufReader::new(file).lines() {
            let line = line
                .map_err(|e| StoreError::Unavailable(format!("read {:?}: {}", path, e)))?;
            if line.is_empty() {
                continue;
            }
            let observation: PriceObservation = serde_json::from_str(&line)
                .map_err(|e| StoreError::Unavailable(format!("corrupt log line: {}", e)))?;
            partitions
                .entry(observation.ticker.clone())
                .or_default()
                .insert(observation.sort_key(), observation);
        }

        Ok(partitions)
    }
}

#[async_trait]
impl ObservationStore for JsonlStore {
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

        let line = serde_json::to_string(&observation)
            .map_err(|e| StoreError::Unavailable(format!("encode observation: {}", e)))?;

        let mut inner = self.inner.write().await;

        // File first, index second: an I/O failure must not leave the
        // observation visible in memory
        writeln!(inner.log, "{}", line)
            .and_then(|_| inner.log.flush())
            .map_err(|e| StoreError::Unavailable(format!("append {:?}: {}", self.path, e)))?;

        inner
            .partitions
            .entry(ticker.to_string())
            .or_default()
            .insert(sort_key.clone(), observation);

        tracing::debug!(ticker, sort_key = %sort_key, "Appended observation");

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

        let inner = self.inner.read().await;
        let page = match inner.partitions.get(ticker) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn ts(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, secs).unwrap()
    }

    #[tokio::test]
    async fn test_append_and_query() {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();

        store.append("bitcoin", ts(0), dec!(50000)).await.unwrap();
        let page = store.query_history("bitcoin", 25, None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].price_usd, dec!(50000));
    }

    #[tokio::test]
    async fn test_observations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = JsonlStore::open(dir.path()).unwrap();
            store.append("bitcoin", ts(0), dec!(50000)).await.unwrap();
            store.append("bitcoin", ts(1), dec!(50500)).await.unwrap();
        }

        let store = JsonlStore::open(dir.path()).unwrap();
        let page = store.query_history("bitcoin", 25, None).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].timestamp, "2024-01-01T00:00:01.000Z");
    }

    #[tokio::test]
    async fn test_replay_keeps_last_write_on_collision() {
        let dir = TempDir::new().unwrap();
        {
            let store = JsonlStore::open(dir.path()).unwrap();
            store.append("bitcoin", ts(0), dec!(1)).await.unwrap();
            store.append("bitcoin", ts(0), dec!(2)).await.unwrap();
        }

        let store = JsonlStore::open(dir.path()).unwrap();
        let page = store.query_history("bitcoin", 25, None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].price_usd, dec!(2));
    }

    #[tokio::test]
    async fn test_corrupt_log_is_unavailable() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(LOG_FILE_NAME), "not json\n").unwrap();

        let err = JsonlStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_dir_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonlStore::open(dir.path()).unwrap();
        let page = store.query_history("bitcoin", 25, None).await.unwrap();
        assert!(page.items.is_empty());
    }
}
