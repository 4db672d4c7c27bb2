//! Request rate limiting for the exchange API quota.

use std::time::Duration;
use tokio::time::Instant;

/// Rate limit configuration for outbound ticker requests.
///
/// `min_delay_ms` spaces grants evenly so that no sliding window of
/// `window_ms` ever sees more than `max_requests` completed fetches.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window in milliseconds
    pub window_ms: u64,
    /// Minimum delay between requests in milliseconds
    pub min_delay_ms: u64,
}

impl RateLimit {
    /// Create a new rate limit configuration.
    pub const fn new(max_requests: u32, window_ms: u64, min_delay_ms: u64) -> Self {
        Self {
            max_requests,
            window_ms,
            min_delay_ms,
        }
    }

    /// Quota for the Indodax public API: 120 requests per rolling minute,
    /// spaced 500ms apart.
    pub const fn indodax() -> Self {
        Self::new(120, 60_000, 500)
    }

    /// Minimum time to wait between requests.
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    /// The quota window duration.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Token bucket limiter gating every ticker fetch.
///
/// Tokens replenish over time and one is consumed per request. `acquire`
/// only delays, it never fails; the limiter is the single point of
/// serialization for outbound requests across all polling cycles.
#[derive(Debug)]
pub struct RequestRateLimiter {
    config: RateLimit,
    /// Tokens available (requests that may be sent)
    tokens: f64,
    /// Last time tokens were replenished
    last_update: Instant,
    /// Last time a request slot was granted
    last_grant: Option<Instant>,
}

impl RequestRateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimit) -> Self {
        Self {
            tokens: config.max_requests as f64,
            last_update: Instant::now(),
            last_grant: None,
            config,
        }
    }

    /// Replenish tokens based on elapsed time.
    fn replenish(&mut self) {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last_update).as_millis() as f64;
        let tokens_to_add =
            (elapsed_ms / self.config.window_ms as f64) * self.config.max_requests as f64;

        self.tokens = (self.tokens + tokens_to_add).min(self.config.max_requests as f64);
        self.last_update = now;
    }

    /// Try to acquire a request slot without waiting.
    pub fn try_acquire(&mut self) -> bool {
        self.replenish();

        if let Some(last) = self.last_grant {
            if last.elapsed() < self.config.min_delay() {
                return false;
            }
        }

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            self.last_grant = Some(Instant::now());
            true
        } else {
            false
        }
    }

    /// Time until a slot becomes available. `Duration::ZERO` if one is
    /// available now.
    pub fn time_until_available(&mut self) -> Duration {
        self.replenish();

        if let Some(last) = self.last_grant {
            let since_last = last.elapsed();
            let min_delay = self.config.min_delay();
            if since_last < min_delay {
                return min_delay - since_last;
            }
        }

        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            let tokens_needed = 1.0 - self.tokens;
            let time_per_token = self.config.window_ms as f64 / self.config.max_requests as f64;
            Duration::from_millis((tokens_needed * time_per_token).ceil() as u64)
        }
    }

    /// Suspend the caller until a request slot is granted. Never fails.
    pub async fn acquire(&mut self) {
        loop {
            let wait = self.time_until_available();
            if wait.is_zero() && self.try_acquire() {
                return;
            }
            tokio::time::sleep(wait.max(Duration::from_millis(1))).await;
        }
    }

    /// Current token count (for monitoring and tests).
    pub fn available_tokens(&mut self) -> f64 {
        self.replenish();
        self.tokens
    }

    /// The rate limit configuration.
    pub fn config(&self) -> &RateLimit {
        &self.config
    }
}
