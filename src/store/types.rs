//! Time-series store types

use super::key::SORT_KEY_PREFIX;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One persisted price reading for a ticker
///
/// `timestamp` holds the canonical fixed-width encoding produced by
/// [`super::format_timestamp`]; it doubles as the ordering component of the
/// storage key. Observations are immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub ticker: String,
    pub timestamp: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
}

impl PriceObservation {
    /// Sort key this observation is stored under
    pub fn sort_key(&self) -> String {
        format!("{}{}", SORT_KEY_PREFIX, self.timestamp)
    }
}

/// Composite key of a freshly appended observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRef {
    /// Partition key
    pub ticker: String,
    /// Sort key within the partition
    pub sort_key: String,
}

/// One page of a descending history scan
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    /// Observations, newest first
    pub items: Vec<PriceObservation>,
    /// Scan position to resume from, present iff more observations remain
    #[serde(rename = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Effective page size the scan ran with
    #[serde(skip_serializing)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_observation_sort_key() {
        let obs = PriceObservation {
            ticker: "bitcoin".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            price_usd: dec!(50000),
        };
        assert_eq!(obs.sort_key(), "price_2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_observation_wire_shape() {
        let obs = PriceObservation {
            ticker: "bitcoin".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            price_usd: dec!(50000),
        };
        let json = serde_json::to_value(&obs).unwrap();
        assert_eq!(json["ticker"], "bitcoin");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["priceUSD"], 50000.0);
    }

    #[test]
    fn test_history_page_omits_absent_token() {
        let page = HistoryPage {
            items: vec![],
            next_token: None,
            limit: 25,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("nextToken").is_none());
        assert!(json.get("limit").is_none());
    }
}
