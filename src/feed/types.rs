//! Price feed types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single quote from the feed, in the fixed quote currency (USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quoted price in US dollars
    pub usd: Decimal,
}
