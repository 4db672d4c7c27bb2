//! Per-cycle rolling baseline state.

use std::collections::HashMap;
use tickwatch_core::{Baseline, Pair, Tick};

/// Deltas computed for one observation against the previous round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaReading {
    /// Round-over-round price change in percent. Exactly 0 when the stored
    /// baseline price is 0 (division guard) or on first observation.
    pub percent_change: f64,
    /// Round-over-round quote-volume change.
    pub volume_delta: f64,
    /// True the first time a pair is seen. First readings seed the baseline
    /// and must never produce an alert.
    pub first_observation: bool,
    /// True when the stored baseline volume is 0. Volume alerts are
    /// suppressed until a nonzero volume has been observed, mirroring the
    /// zero-price division guard.
    pub zero_volume_baseline: bool,
}

/// Rolling last-seen state for every pair in one polling cycle.
///
/// Each cycle owns its own tracker: the price and volume cycles observe the
/// same tick stream but must not share mutable baseline state. At most one
/// entry per pair is held (last-write-wins).
#[derive(Debug, Default)]
pub struct BaselineTracker {
    baselines: HashMap<Pair, Baseline>,
}

impl BaselineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff a tick against the stored baseline, then overwrite the baseline
    /// with the tick, so every round compares against the immediately
    /// preceding one.
    ///
    /// Callers must not invoke this for failed fetches: a skipped round keeps
    /// the old baseline, and the next successful fetch compares against it.
    /// The larger apparent jump that can produce is accepted behavior.
    pub fn update_and_diff(&mut self, pair: &Pair, tick: &Tick) -> DeltaReading {
        let reading = match self.baselines.get(pair) {
            None => DeltaReading {
                percent_change: 0.0,
                volume_delta: 0.0,
                first_observation: true,
                zero_volume_baseline: false,
            },
            Some(baseline) => {
                let percent_change = if baseline.price != 0.0 {
                    (tick.price - baseline.price) / baseline.price * 100.0
                } else {
                    0.0
                };
                DeltaReading {
                    percent_change,
                    volume_delta: tick.volume - baseline.volume,
                    first_observation: false,
                    zero_volume_baseline: baseline.volume == 0.0,
                }
            }
        };

        self.baselines.insert(pair.clone(), Baseline::from(tick));
        reading
    }

    /// Stored baseline for a pair, if it has been observed.
    pub fn baseline(&self, pair: &Pair) -> Option<&Baseline> {
        self.baselines.get(pair)
    }

    /// Number of pairs observed so far.
    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}
