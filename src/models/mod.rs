mod karat;
mod language;
mod lead;
mod market_data;
mod tier;

pub use karat::{Karat, KARATS};
pub use language::Language;
pub use lead::{BreakdownRow, Lead};
pub use market_data::{CachedQuote, MarketData};
pub use tier::Tier;

use std::collections::BTreeMap;

/// Per-tier weight inputs: karat value -> raw free-text entry.
/// Unconstrained at input time; parsed defensively at aggregation.
pub type WeightSheet = BTreeMap<u32, String>;
