//! Pure threshold evaluation.

use crate::DeltaReading;
use std::time::Duration;
use tickwatch_core::{Alert, AlertKind, Direction, Pair, Tick};

/// Alerting thresholds, loaded once at startup and immutable for the process
/// lifetime.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdConfig {
    /// Minimum absolute round-over-round price move, in percent.
    pub percent_change: f64,
    /// Pairs priced below this never produce price alerts (noise filter).
    pub min_price: f64,
    /// Pairs with volume below this never produce price alerts (liquidity
    /// filter).
    pub min_volume: f64,
    /// Minimum round-over-round volume increase, in quote currency.
    pub volume_delta: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            percent_change: 5.0,
            min_price: 25.0,
            min_volume: 400_000_000.0,
            volume_delta: 200_000_000.0,
        }
    }
}

/// Decide whether a price move crosses the threshold.
///
/// Pure and stateless: the same (tick, reading, config) tuple always yields
/// the same result. Crossing is inclusive, a move exactly at the threshold
/// alerts.
pub fn evaluate_price(
    pair: &Pair,
    tick: &Tick,
    reading: &DeltaReading,
    config: &ThresholdConfig,
) -> Option<Alert> {
    if reading.first_observation {
        return None;
    }
    if tick.price < config.min_price || tick.volume < config.min_volume {
        return None;
    }
    if reading.percent_change.abs() < config.percent_change {
        return None;
    }

    let direction = if reading.percent_change > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    Some(Alert {
        pair: pair.clone(),
        kind: AlertKind::Price {
            direction,
            magnitude_pct: reading.percent_change.abs(),
        },
        price: tick.price,
        volume: tick.volume,
    })
}

/// Decide whether a volume increase crosses the threshold.
///
/// `elapsed` is the wall-clock time of the monitoring round so far; it is
/// reported in the alert text. A zero baseline volume suppresses the alert:
/// the jump from an unknown or idle book to the first real reading is not a
/// round-over-round move.
pub fn evaluate_volume(
    pair: &Pair,
    tick: &Tick,
    reading: &DeltaReading,
    elapsed: Duration,
    config: &ThresholdConfig,
) -> Option<Alert> {
    if reading.first_observation || reading.zero_volume_baseline {
        return None;
    }
    if reading.volume_delta < config.volume_delta {
        return None;
    }

    Some(Alert {
        pair: pair.clone(),
        kind: AlertKind::Volume {
            delta: reading.volume_delta,
            elapsed,
        },
        price: tick.price,
        volume: tick.volume,
    })
}
