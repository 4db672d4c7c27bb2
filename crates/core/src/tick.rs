//! Point-in-time market observations.

use serde::{Deserialize, Serialize};

/// One price + volume observation for a pair.
///
/// Ephemeral: produced by the ticker cache each round, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Last traded price, in the pair's quote currency. Always >= 0.
    pub price: f64,
    /// Quote-denominated 24h volume. Always >= 0.
    pub volume: f64,
    /// Timestamp in milliseconds when the tick was fetched.
    pub fetched_at_ms: u64,
}

impl Tick {
    /// Create a tick stamped with the current wall clock.
    pub fn new(price: f64, volume: f64) -> Self {
        Self {
            price,
            volume,
            fetched_at_ms: now_ms(),
        }
    }

    /// Create a tick with an explicit timestamp (tests, replays).
    pub fn at(price: f64, volume: f64, fetched_at_ms: u64) -> Self {
        Self {
            price,
            volume,
            fetched_at_ms,
        }
    }
}

/// Per-pair comparison point for delta computation.
///
/// Overwritten with the latest tick after every evaluation, so deltas are
/// always "since last round", not "since start".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub price: f64,
    pub volume: f64,
}

impl From<&Tick> for Baseline {
    fn from(tick: &Tick) -> Self {
        Self {
            price: tick.price,
            volume: tick.volume,
        }
    }
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
