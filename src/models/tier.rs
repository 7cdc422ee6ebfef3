use serde::{Deserialize, Serialize};

use crate::constants::{LUXURY_PAYOUT_PERCENTAGE, STANDARD_PAYOUT_PERCENTAGE};

/// Pricing tier an item falls into based on provenance/brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Authenticated pieces from major houses, vintage/antique items,
    /// stone-set jewelry
    Luxury,
    /// Base purchase rate
    Standard,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Luxury, Tier::Standard];

    /// Payout percentage applied on top of the melt value
    pub fn payout_percentage(&self) -> f64 {
        match self {
            Tier::Luxury => LUXURY_PAYOUT_PERCENTAGE,
            Tier::Standard => STANDARD_PAYOUT_PERCENTAGE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Luxury => "luxury",
            Tier::Standard => "standard",
        }
    }
}
