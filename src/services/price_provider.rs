//! Price provider: three-tier read-through quote cache
//!
//! Resolution order: fresh cache slot, live fetch, fallback. The public
//! operation never fails outward; every failure mode collapses into a
//! fallback snapshot built from the last known good quote, or the safety
//! floor when there has never been one. The calculator must always have
//! a usable number to render.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::{
    CACHE_DURATION_SECS, FALLBACK_TIMESTAMP_LABEL, MIN_PLAUSIBLE_SPOT_CAD,
    SAFETY_FLOOR_PRICE_CAD, SOURCE_FALLBACK, SOURCE_LIVE,
};
use crate::models::{CachedQuote, MarketData};
use crate::services::cache::CacheStore;
use crate::services::gold_api::SpotPriceSource;
use crate::utils::format_clock_time;

/// Time source, injectable so tests can age the cache without sleeping
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct PriceProvider {
    source: Arc<dyn SpotPriceSource>,
    cache: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl PriceProvider {
    pub fn new(
        source: Arc<dyn SpotPriceSource>,
        cache: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { source, cache, clock }
    }

    /// Get the current snapshot. Serves the cache slot when it is fresh
    /// and no refresh was forced; otherwise fetches live. Never fails:
    /// fetch problems degrade into a fallback snapshot.
    pub async fn fetch_price(&self, force_refresh: bool) -> MarketData {
        let cached = self.cache.get().await;
        let last_known_good = cached.clone();

        if let Some(entry) = &cached {
            let age = self.clock.now() - entry.fetched_at;
            if !force_refresh && age < Duration::seconds(CACHE_DURATION_SECS) {
                debug!(
                    age_secs = age.num_seconds(),
                    price = entry.data.spot_price_cad,
                    "Serving cached quote"
                );
                return entry.data.clone();
            }
        }

        match self.source.fetch_spot().await {
            Ok(price) if price.is_finite() && price >= MIN_PLAUSIBLE_SPOT_CAD => {
                let now = self.clock.now();
                let data = MarketData {
                    spot_price_cad: price,
                    last_updated: format_clock_time(now),
                    source: SOURCE_LIVE.to_string(),
                };
                self.cache
                    .put(CachedQuote { data: data.clone(), fetched_at: now })
                    .await;
                info!(price, "Live spot price fetched");
                data
            }
            Ok(price) => {
                warn!(
                    price,
                    floor = MIN_PLAUSIBLE_SPOT_CAD,
                    "Implausible spot price from feed, falling back"
                );
                self.fallback(last_known_good)
            }
            Err(e) => {
                warn!("Spot price fetch failed, falling back: {}", e);
                self.fallback(last_known_good)
            }
        }
    }

    /// Build the degraded snapshot. Never written to the cache slot: a
    /// later successful fetch must not compete with a fallback, and a
    /// repeated failure keeps re-serving the last genuine quote rather
    /// than a fallback-on-fallback.
    fn fallback(&self, last_known_good: Option<CachedQuote>) -> MarketData {
        match last_known_good {
            Some(entry) => MarketData {
                spot_price_cad: entry.data.spot_price_cad,
                last_updated: entry.data.last_updated,
                source: SOURCE_FALLBACK.to_string(),
            },
            None => MarketData {
                spot_price_cad: SAFETY_FLOOR_PRICE_CAD,
                last_updated: FALLBACK_TIMESTAMP_LABEL.to_string(),
                source: SOURCE_FALLBACK.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::cache::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted source: pops the next result per call, counts calls
    struct ScriptedSource {
        results: Mutex<Vec<Result<f64, AppError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<f64, AppError>>) -> Self {
            Self { results: Mutex::new(results), calls: AtomicUsize::new(0) }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SpotPriceSource for ScriptedSource {
        async fn fetch_spot(&self) -> Result<f64, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                Err(AppError::Network("script exhausted".to_string()))
            } else {
                results.remove(0)
            }
        }
    }

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self { now: Mutex::new(Utc::now()) }
        }

        fn advance_secs(&self, secs: i64) {
            let mut now = self.now.lock().unwrap();
            *now += Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn provider_with(
        results: Vec<Result<f64, AppError>>,
    ) -> (PriceProvider, Arc<ScriptedSource>, Arc<MemoryStore>, Arc<ManualClock>) {
        let source = Arc::new(ScriptedSource::new(results));
        let cache = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new());
        let provider =
            PriceProvider::new(source.clone(), cache.clone(), clock.clone());
        (provider, source, cache, clock)
    }

    #[tokio::test]
    async fn test_live_fetch_produces_live_snapshot() {
        let (provider, source, cache, _) = provider_with(vec![Ok(4000.0)]);

        let data = provider.fetch_price(false).await;
        assert_eq!(data.spot_price_cad, 4000.0);
        assert_eq!(data.source, SOURCE_LIVE);
        assert!(!data.is_fallback());
        assert_eq!(source.call_count(), 1);

        // The slot now holds the live quote
        let cached = cache.get().await.unwrap();
        assert_eq!(cached.data, data);
    }

    #[tokio::test]
    async fn test_cache_round_trip_without_second_fetch() {
        let (provider, source, _, clock) = provider_with(vec![Ok(4000.0)]);

        let first = provider.fetch_price(false).await;
        clock.advance_secs(CACHE_DURATION_SECS - 60);
        let second = provider.fetch_price(false).await;

        assert_eq!(first, second);
        assert_eq!(source.call_count(), 1, "fresh cache must not hit the network");
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let (provider, source, _, clock) = provider_with(vec![Ok(4000.0), Ok(4050.0)]);

        provider.fetch_price(false).await;
        clock.advance_secs(CACHE_DURATION_SECS + 1);
        let second = provider.fetch_price(false).await;

        assert_eq!(second.spot_price_cad, 4050.0);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_fresh_cache() {
        let (provider, source, _, _) = provider_with(vec![Ok(4000.0), Ok(4100.0)]);

        provider.fetch_price(false).await;
        let refreshed = provider.fetch_price(true).await;

        assert_eq!(refreshed.spot_price_cad, 4100.0);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failure_without_cache_returns_safety_floor() {
        let (provider, _, cache, _) =
            provider_with(vec![Err(AppError::Network("down".to_string()))]);

        let data = provider.fetch_price(false).await;
        assert_eq!(data.spot_price_cad, SAFETY_FLOOR_PRICE_CAD);
        assert_eq!(data.source, SOURCE_FALLBACK);
        assert_eq!(data.last_updated, FALLBACK_TIMESTAMP_LABEL);
        assert!(data.is_fallback());

        // The fallback must not be written to the slot
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_with_cache_returns_last_known_good_price() {
        let (provider, _, _, clock) = provider_with(vec![
            Ok(4000.0),
            Err(AppError::Network("down".to_string())),
        ]);

        let live = provider.fetch_price(false).await;
        clock.advance_secs(CACHE_DURATION_SECS + 1);
        let degraded = provider.fetch_price(false).await;

        assert_eq!(degraded.spot_price_cad, live.spot_price_cad);
        assert_eq!(degraded.last_updated, live.last_updated);
        assert!(degraded.is_fallback());
    }

    #[tokio::test]
    async fn test_fallback_never_pollutes_cache() {
        // fail, recover, fail again: the second fallback must carry the
        // recovered price, not a fallback-of-fallback
        let (provider, _, _, clock) = provider_with(vec![
            Err(AppError::Network("down".to_string())),
            Ok(4200.0),
            Err(AppError::Network("down again".to_string())),
        ]);

        let first = provider.fetch_price(false).await;
        assert_eq!(first.spot_price_cad, SAFETY_FLOOR_PRICE_CAD);

        let recovered = provider.fetch_price(true).await;
        assert_eq!(recovered.spot_price_cad, 4200.0);
        assert!(!recovered.is_fallback());

        clock.advance_secs(CACHE_DURATION_SECS + 1);
        let degraded = provider.fetch_price(false).await;
        assert_eq!(degraded.spot_price_cad, 4200.0);
        assert!(degraded.is_fallback());
    }

    #[tokio::test]
    async fn test_implausible_price_treated_as_failure() {
        // Well-formed response below the plausibility floor
        let (provider, _, cache, _) = provider_with(vec![Ok(2000.0)]);

        let data = provider.fetch_price(false).await;
        assert_eq!(data.spot_price_cad, SAFETY_FLOOR_PRICE_CAD);
        assert!(data.is_fallback());
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_non_finite_price_treated_as_failure() {
        let (provider, _, _, _) = provider_with(vec![Ok(f64::NAN)]);
        let data = provider.fetch_price(false).await;
        assert!(data.is_fallback());
        assert_eq!(data.spot_price_cad, SAFETY_FLOOR_PRICE_CAD);
    }

    #[tokio::test]
    async fn test_price_at_plausibility_floor_is_accepted() {
        let (provider, _, _, _) = provider_with(vec![Ok(MIN_PLAUSIBLE_SPOT_CAD)]);
        let data = provider.fetch_price(false).await;
        assert!(!data.is_fallback());
        assert_eq!(data.spot_price_cad, MIN_PLAUSIBLE_SPOT_CAD);
    }
}
