//! Pricing and market-feed constants
//!
//! All payout math flows through the constants defined here. The tier
//! percentages in particular must have exactly one definition: the rate
//! formula, the breakdown rows, and the CLI rate table all read them from
//! this module.

/// Grams per troy ounce. Spot prices are quoted per troy ounce; payout
/// rates are quoted per gram.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1034768;

/// Payout percentage for the luxury tier (authenticated pieces from major
/// houses, vintage/antique items, stone-set jewelry).
pub const LUXURY_PAYOUT_PERCENTAGE: f64 = 0.95;

/// Payout percentage for the standard tier (base purchase rate).
pub const STANDARD_PAYOUT_PERCENTAGE: f64 = 0.86;

/// How long a fetched quote stays fresh. Within this window repeated
/// requests are served from the cache slot without a network call.
pub const CACHE_DURATION_SECS: i64 = 60 * 60;

/// Lowest spot price (CAD per troy ounce) accepted from the live feed.
/// Anything below this is treated as a malformed response and routed
/// through the fallback path, even if the payload parsed cleanly.
pub const MIN_PLAUSIBLE_SPOT_CAD: f64 = 2500.0;

/// Hardcoded safety-floor price (CAD per troy ounce), used when the live
/// fetch fails and no last-known-good quote exists. Conservative on
/// purpose: a payout estimate must never be built on nothing.
pub const SAFETY_FLOOR_PRICE_CAD: f64 = 3850.00;

/// Provenance tag on a live snapshot.
pub const SOURCE_LIVE: &str = "Direct Gold Market Feed";

/// Provenance tag on a fallback snapshot. Contains [`FALLBACK_MARKER`],
/// which downstream consumers use to switch into the degraded visual state.
pub const SOURCE_FALLBACK: &str = "Estimation de Sécurité (Offline)";

/// Substring that marks a snapshot as a non-live estimate.
pub const FALLBACK_MARKER: &str = "Estimation";

/// `lastUpdated` shown on a fallback snapshot when there is no cached
/// timestamp to carry over.
pub const FALLBACK_TIMESTAMP_LABEL: &str = "Calcul Auto";

/// Default endpoint for the live gold price, one troy ounce in CAD.
pub const DEFAULT_GOLD_API_URL: &str = "https://www.goldapi.io/api/XAU/CAD";

/// Bound on the live price fetch. The transport default is far too long
/// for an interactive calculator; on expiry the fetch falls back like any
/// other network failure.
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Shared-secret header attached to forwarded leads.
pub const LEAD_SECRET_HEADER: &str = "X-AOM-SECRET";
