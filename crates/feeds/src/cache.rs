//! Short-TTL memoized ticker fetch.

use crate::{FeedError, IndodaxClient, RequestRateLimiter};
use dashmap::DashMap;
use std::time::Duration;
use tickwatch_core::{Pair, Tick};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Default TTL, bounded by the shortest polling interval: each cycle's next
/// round still observes fresh data while bursts of lookups for the same pair
/// collapse into one network call.
const DEFAULT_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
struct CachedTick {
    tick: Tick,
    stored_at: Instant,
}

/// Memoizing fetch layer shared by all polling cycles.
///
/// Every cache miss goes through the rate limiter before hitting the network;
/// fetch failures are returned to the caller and never cached. At most one
/// entry per pair is held (last-write-wins).
pub struct TickerCache {
    client: IndodaxClient,
    limiter: Mutex<RequestRateLimiter>,
    entries: DashMap<Pair, CachedTick>,
    ttl: Duration,
}

impl TickerCache {
    pub fn new(client: IndodaxClient, limiter: RequestRateLimiter) -> Self {
        Self::with_ttl(client, limiter, DEFAULT_TTL)
    }

    pub fn with_ttl(client: IndodaxClient, limiter: RequestRateLimiter, ttl: Duration) -> Self {
        Self {
            client,
            limiter: Mutex::new(limiter),
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Latest tick for a pair, served from cache within the TTL.
    pub async fn get(&self, pair: &Pair) -> Result<Tick, FeedError> {
        if let Some(entry) = self.entries.get(pair) {
            if entry.stored_at.elapsed() < self.ttl {
                debug!(pair = %pair, "ticker cache hit");
                return Ok(entry.tick);
            }
        }

        // The lock is held only for the duration of the grant, not the fetch.
        self.limiter.lock().await.acquire().await;

        let tick = self.client.fetch_ticker(pair).await?;
        self.entries.insert(
            pair.clone(),
            CachedTick {
                tick,
                stored_at: Instant::now(),
            },
        );
        Ok(tick)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn seed(&self, pair: Pair, tick: Tick) {
        self.entries.insert(
            pair,
            CachedTick {
                tick,
                stored_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RateLimit;
    use pretty_assertions::assert_eq;

    fn dead_cache(ttl: Duration) -> TickerCache {
        // Points at a closed port, so any fetch attempt fails fast.
        TickerCache::with_ttl(
            IndodaxClient::with_base_url("http://127.0.0.1:9"),
            RequestRateLimiter::new(RateLimit::new(100, 1_000, 0)),
            ttl,
        )
    }

    #[tokio::test]
    async fn test_fresh_entry_served_without_network() {
        let cache = dead_cache(Duration::from_secs(60));
        let pair = Pair::new("btcidr");
        let tick = Tick::at(1_000_000.0, 5_000_000.0, 1_700_000_000_000);
        cache.seed(pair.clone(), tick);

        let got = cache.get(&pair).await.unwrap();
        assert_eq!(got, tick);
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_refetch() {
        let cache = dead_cache(Duration::ZERO);
        let pair = Pair::new("btcidr");
        cache.seed(pair.clone(), Tick::at(1.0, 2.0, 0));

        // TTL of zero forces a refetch, which fails against the dead endpoint.
        assert!(cache.get(&pair).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_pair_misses() {
        let cache = dead_cache(Duration::from_secs(60));
        assert!(cache.get(&Pair::new("ethidr")).await.is_err());
        assert!(cache.is_empty());
    }
}
