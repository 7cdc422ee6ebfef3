pub mod cache;
pub mod gold_api;
pub mod notifier;
pub mod price_provider;
pub mod pricing;

pub use cache::{CacheStore, FileStore, MemoryStore};
pub use gold_api::{GoldApiClient, SpotPriceSource};
pub use notifier::LeadNotifier;
pub use price_provider::{Clock, PriceProvider, SystemClock};
pub use pricing::{estimate, parse_grams, payout_rate, per_gram_spot, Estimate};
