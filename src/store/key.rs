//! Sort-key and continuation-token encoding
//!
//! The sort key is `"price_" + timestamp` where the timestamp is RFC 3339 UTC
//! with exactly millisecond precision. Keeping the encoding fixed-width and
//! zero-padded is load-bearing: string comparison on sort keys must equal
//! time comparison, or descending scans silently break.

use super::StoreError;
use chrono::{DateTime, SecondsFormat, Utc};

/// Prefix distinguishing price rows within a ticker partition
pub const SORT_KEY_PREFIX: &str = "price_";

/// Canonical timestamp encoding: `2024-01-01T00:00:00.000Z`
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sort key for an observation taken at `ts`
pub fn encode_sort_key(ts: DateTime<Utc>) -> String {
    format!("{}{}", SORT_KEY_PREFIX, format_timestamp(ts))
}

/// Check a continuation token decodes as a scan position
///
/// Tokens are opaque to callers but are sort keys internally; anything that
/// does not carry the prefix and a parseable timestamp is rejected.
pub fn validate_token(token: &str) -> Result<(), StoreError> {
    let timestamp = token
        .strip_prefix(SORT_KEY_PREFIX)
        .ok_or_else(|| StoreError::InvalidToken(token.to_string()))?;

    DateTime::parse_from_rfc3339(timestamp)
        .map_err(|_| StoreError::InvalidToken(token.to_string()))?;

    Ok(())
}
