use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_MARKER;

/// A spot-price snapshot. Every provider path (live fetch, cache hit,
/// fallback) produces a complete instance; there is no partially-filled
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Price per troy ounce in CAD
    #[serde(rename = "spotPriceCAD")]
    pub spot_price_cad: f64,

    /// Human-readable time the snapshot became effective
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,

    /// Provenance tag; contains the fallback marker when the value is a
    /// non-live estimate
    pub source: String,
}

impl MarketData {
    /// True when this snapshot came from the fallback path rather than a
    /// live fetch. The UI switches into "safety mode" on this.
    pub fn is_fallback(&self) -> bool {
        self.source.contains(FALLBACK_MARKER)
    }
}

/// The single cache slot: a snapshot plus the instant it was fetched.
/// Only genuine live fetches are ever written here; fallback snapshots
/// must not pollute the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedQuote {
    pub data: MarketData,
    pub fetched_at: DateTime<Utc>,
}
