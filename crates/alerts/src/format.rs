//! Telegram HTML rendering for alerts.

use num_format::{Locale, ToFormattedString};
use std::time::Duration;
use tickwatch_core::{Alert, AlertKind, Direction, Pair};

const CHART_BASE_URL: &str = "https://indodax.com/chart";

/// Prices below this render in scientific notation, preserving significance
/// for micro-priced USDT assets.
const SCIENTIFIC_CUTOFF: f64 = 0.01;

/// Render an alert as a Telegram HTML message.
pub fn format_alert(alert: &Alert) -> String {
    match &alert.kind {
        AlertKind::Price {
            direction,
            magnitude_pct,
        } => {
            let (word, emoji, sign) = match direction {
                Direction::Up => ("up", "\u{1F680}", '+'),
                Direction::Down => ("down", "\u{1F525}", '-'),
            };
            format!(
                "{} Price {} {} <code>{}{:.2}%</code> (current price: {}) Volume {}",
                chart_link(&alert.pair),
                word,
                emoji,
                sign,
                magnitude_pct,
                price_text(&alert.pair, alert.price),
                volume_text(alert.volume),
            )
        }
        AlertKind::Volume { delta, elapsed } => format!(
            "Volume {} up \u{1F680} by {} IDR in {} (current volume: {})",
            alert.pair.display_symbol(),
            thousands(*delta),
            format_elapsed(*elapsed),
            volume_text(alert.volume),
        ),
    }
}

fn chart_link(pair: &Pair) -> String {
    let symbol = pair.display_symbol();
    format!("<a href=\"{}/{}\">{}</a>", CHART_BASE_URL, symbol, symbol)
}

/// Price rendering policy: USDT-quoted pairs keep 8 decimals (scientific
/// below the cutoff), IDR pairs render as whole amounts with thousands
/// separators.
pub fn price_text(pair: &Pair, price: f64) -> String {
    if pair.is_usdt_quoted() {
        if price >= SCIENTIFIC_CUTOFF {
            format!("USD ${:.8}", price)
        } else {
            format!("USD ${:.8e}", price)
        }
    } else {
        format!("Rp.{}", thousands(price))
    }
}

pub fn volume_text(volume: f64) -> String {
    format!("IDR {}", thousands(volume))
}

fn thousands(value: f64) -> String {
    (value.round() as i64).to_formatted_string(&Locale::en)
}

/// Whole-second H:MM:SS rendering of a round's elapsed time.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_idr_price_uses_separators_and_no_decimals() {
        let pair = Pair::new("btcidr");
        assert_eq!(price_text(&pair, 1_052_000_000.0), "Rp.1,052,000,000");
        assert_eq!(price_text(&pair, 25.4), "Rp.25");
    }

    #[test]
    fn test_usdt_price_keeps_eight_decimals() {
        let pair = Pair::new("btcusdt");
        assert_eq!(price_text(&pair, 0.5), "USD $0.50000000");
    }

    #[test]
    fn test_usdt_price_switches_to_scientific_below_cutoff() {
        let pair = Pair::new("shibusdt");
        assert_eq!(price_text(&pair, 0.0000081), "USD $8.10000000e-6");
        // The cutoff itself stays in fixed notation.
        assert_eq!(price_text(&pair, 0.01), "USD $0.01000000");
    }

    #[test]
    fn test_volume_text() {
        assert_eq!(volume_text(500_500_000.0), "IDR 500,500,000");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(250)), "0:04:10");
        assert_eq!(format_elapsed(Duration::from_secs(3_725)), "1:02:05");
    }

    #[test]
    fn test_price_alert_message() {
        let alert = Alert {
            pair: Pair::new("btcidr"),
            kind: AlertKind::Price {
                direction: Direction::Up,
                magnitude_pct: 6.0,
            },
            price: 1_052_000_000.0,
            volume: 500_000_000.0,
        };

        let text = format_alert(&alert);
        assert_eq!(
            text,
            "<a href=\"https://indodax.com/chart/BTCIDR\">BTCIDR</a> Price up \u{1F680} \
             <code>+6.00%</code> (current price: Rp.1,052,000,000) Volume IDR 500,000,000"
        );
    }

    #[test]
    fn test_down_alert_uses_minus_sign_and_fire_emoji() {
        let alert = Alert {
            pair: Pair::new("ethidr"),
            kind: AlertKind::Price {
                direction: Direction::Down,
                magnitude_pct: 7.5,
            },
            price: 40_000_000.0,
            volume: 450_000_000.0,
        };

        let text = format_alert(&alert);
        assert!(text.contains("Price down \u{1F525}"));
        assert!(text.contains("<code>-7.50%</code>"));
    }

    #[test]
    fn test_volume_alert_message() {
        let alert = Alert {
            pair: Pair::new("btcidr"),
            kind: AlertKind::Volume {
                delta: 300_500_000.0,
                elapsed: Duration::from_secs(250),
            },
            price: 1_000.0,
            volume: 500_500_000.0,
        };

        assert_eq!(
            format_alert(&alert),
            "Volume BTCIDR up \u{1F680} by 300,500,000 IDR in 0:04:10 \
             (current volume: IDR 500,500,000)"
        );
    }
}
