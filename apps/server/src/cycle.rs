//! Generic polling cycle.
//!
//! The price and volume monitors are two instances of one cycle type with
//! their own intervals, their own threshold rules and their own baseline
//! trackers, sharing the rate-limited ticker cache.

use std::sync::Arc;
use std::time::Duration;
use tickwatch_alerts::{format_alert, TelegramNotifier};
use tickwatch_core::{Alert, Pair, Tick};
use tickwatch_engine::{
    evaluate_price, evaluate_volume, BaselineTracker, DeltaReading, ThresholdConfig,
};
use tickwatch_feeds::{FeedError, TickerCache};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Which threshold rule a cycle applies to the tick stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleKind {
    Price,
    Volume,
}

impl CycleKind {
    pub fn name(self) -> &'static str {
        match self {
            CycleKind::Price => "price",
            CycleKind::Volume => "volume",
        }
    }
}

/// One self-pacing polling cycle over the full pair list.
pub struct PollCycle {
    kind: CycleKind,
    interval: Duration,
    pairs: Vec<Pair>,
    cache: Arc<TickerCache>,
    notifier: Arc<TelegramNotifier>,
    tracker: BaselineTracker,
    thresholds: ThresholdConfig,
}

impl PollCycle {
    pub fn new(
        kind: CycleKind,
        interval: Duration,
        pairs: Vec<Pair>,
        cache: Arc<TickerCache>,
        notifier: Arc<TelegramNotifier>,
        thresholds: ThresholdConfig,
    ) -> Self {
        Self {
            kind,
            interval,
            pairs,
            cache,
            notifier,
            tracker: BaselineTracker::new(),
            thresholds,
        }
    }

    fn evaluate(
        &self,
        pair: &Pair,
        tick: &Tick,
        reading: &DeltaReading,
        elapsed: Duration,
    ) -> Option<Alert> {
        match self.kind {
            CycleKind::Price => evaluate_price(pair, tick, reading, &self.thresholds),
            CycleKind::Volume => evaluate_volume(pair, tick, reading, elapsed, &self.thresholds),
        }
    }

    /// Walk every pair once, in pair-list order. A failed fetch skips the
    /// pair without touching its baseline; a failed delivery is logged and
    /// dropped. Returns how many fetches succeeded.
    async fn run_round(&mut self, started: Instant) -> usize {
        let mut fetched = 0usize;

        for i in 0..self.pairs.len() {
            let pair = self.pairs[i].clone();

            let tick = match self.cache.get(&pair).await {
                Ok(tick) => {
                    fetched += 1;
                    tick
                }
                Err(e) => {
                    // Transient failures are routine at this fan-out; a parse
                    // failure means the endpoint changed shape and is worth
                    // surfacing.
                    if e.is_transient() {
                        debug!(cycle = self.kind.name(), pair = %pair, "skipping pair: {}", e);
                    } else {
                        warn!(cycle = self.kind.name(), pair = %pair, "skipping pair: {}", e);
                    }
                    continue;
                }
            };

            let reading = self.tracker.update_and_diff(&pair, &tick);
            if let Some(alert) = self.evaluate(&pair, &tick, &reading, started.elapsed()) {
                let text = format_alert(&alert);
                match self.notifier.deliver(&text).await {
                    Ok(()) => info!(cycle = self.kind.name(), pair = %pair, "alert sent"),
                    // Best effort: never retried.
                    Err(e) => warn!(cycle = self.kind.name(), pair = %pair, "delivery failed: {}", e),
                }
            }
        }

        fetched
    }

    /// Run rounds forever, self-pacing to the configured interval: sleep the
    /// remainder when a round finishes early, start immediately when it
    /// overran (no further drift correction).
    ///
    /// Returns an error only when an entire round fails to fetch a single
    /// pair, which aborts the orchestration and sends the whole pipeline
    /// back through the connectivity check.
    pub async fn run(mut self) -> Result<(), FeedError> {
        info!(
            cycle = self.kind.name(),
            interval_secs = self.interval.as_secs(),
            pairs = self.pairs.len(),
            "cycle started"
        );

        loop {
            let started = Instant::now();
            let fetched = self.run_round(started).await;

            if fetched == 0 && !self.pairs.is_empty() {
                return Err(FeedError::ConnectionFailed(format!(
                    "{} cycle fetched none of {} pairs this round",
                    self.kind.name(),
                    self.pairs.len()
                )));
            }

            let elapsed = started.elapsed();
            if elapsed < self.interval {
                tokio::time::sleep(self.interval - elapsed).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tickwatch_feeds::{IndodaxClient, RateLimit, RequestRateLimiter};

    fn dead_cycle(kind: CycleKind, pairs: Vec<Pair>) -> PollCycle {
        let cache = TickerCache::new(
            IndodaxClient::with_base_url("http://127.0.0.1:9"),
            RequestRateLimiter::new(RateLimit::new(100, 1_000, 0)),
        );
        let notifier = TelegramNotifier::with_api_base(
            "token".to_string(),
            "chat".to_string(),
            "http://127.0.0.1:9",
        );
        PollCycle::new(
            kind,
            Duration::from_secs(15),
            pairs,
            Arc::new(cache),
            Arc::new(notifier),
            ThresholdConfig::default(),
        )
    }

    #[test]
    fn test_cycle_kind_names() {
        assert_eq!(CycleKind::Price.name(), "price");
        assert_eq!(CycleKind::Volume.name(), "volume");
    }

    #[tokio::test]
    async fn test_failed_fetches_leave_baselines_untouched() {
        let pairs = vec![Pair::new("btcidr"), Pair::new("ethidr")];
        let mut cycle = dead_cycle(CycleKind::Price, pairs);

        let fetched = cycle.run_round(Instant::now()).await;
        assert_eq!(fetched, 0);
        assert!(cycle.tracker.is_empty());
    }

    #[tokio::test]
    async fn test_all_pairs_failing_aborts_the_cycle() {
        let cycle = dead_cycle(CycleKind::Volume, vec![Pair::new("btcidr")]);
        assert!(cycle.run().await.is_err());
    }
}
