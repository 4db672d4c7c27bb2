//! Alert types produced by threshold evaluation.

use crate::Pair;
use std::time::Duration;

/// Direction of a price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What crossed the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    /// Round-over-round percentage price move.
    Price {
        direction: Direction,
        /// Absolute magnitude of the move, in percent.
        magnitude_pct: f64,
    },
    /// Round-over-round quote-volume increase.
    Volume {
        /// Absolute volume delta, in quote currency.
        delta: f64,
        /// Wall-clock time elapsed in the monitoring round so far.
        elapsed: Duration,
    },
}

/// A threshold crossing for one pair.
///
/// Transient: constructed by the evaluator, rendered to text by the alerts
/// crate and consumed exactly once by the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub pair: Pair,
    pub kind: AlertKind,
    /// Price at the moment the threshold was crossed.
    pub price: f64,
    /// Volume at the moment the threshold was crossed.
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alert_carries_semantic_content() {
        let alert = Alert {
            pair: Pair::new("btcidr"),
            kind: AlertKind::Price {
                direction: Direction::Up,
                magnitude_pct: 6.0,
            },
            price: 106.0,
            volume: 500_000_000.0,
        };
        assert_eq!(alert.pair.as_str(), "btcidr");
        match alert.kind {
            AlertKind::Price {
                direction,
                magnitude_pct,
            } => {
                assert_eq!(direction, Direction::Up);
                assert_eq!(magnitude_pct, 6.0);
            }
            _ => panic!("expected price alert"),
        }
    }
}
