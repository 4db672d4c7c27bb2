//! Application configuration.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::Path;
use tickwatch_engine::ThresholdConfig;

/// Application configuration, persisted as JSON next to the binary.
///
/// Loaded once at startup, written once if absent (after an interactive
/// prompt), never hot-reloaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Telegram bot token. The TELEGRAM_BOT_TOKEN env var overrides this.
    pub bot_token: String,
    /// Telegram chat alerts are delivered to.
    pub chat_id: String,
    /// Minimum absolute price move, in percent.
    pub percent_change_threshold: f64,
    /// Price cycle interval, in seconds.
    pub price_poll_interval_secs: u64,
    /// Volume cycle interval, in seconds.
    pub volume_poll_interval_secs: u64,
    /// Minimum volume increase, in IDR.
    pub volume_delta_threshold: f64,
    /// Pairs priced below this never produce price alerts.
    pub min_price: f64,
    /// Pairs with volume below this never produce price alerts.
    pub min_volume: f64,
    /// Logging level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            percent_change_threshold: 5.0,
            price_poll_interval_secs: 15,
            volume_poll_interval_secs: 300,
            volume_delta_threshold: 200_000_000.0,
            min_price: 25.0,
            min_volume: 400_000_000.0,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the stored config, if present and parseable.
    pub fn load(path: &Path) -> Option<Self> {
        let raw = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
    }

    /// Load the stored config, or prompt interactively on first run and
    /// persist the answers.
    ///
    /// Runs before the tracing subscriber is installed, so progress goes to
    /// stdout alongside the prompts.
    pub fn load_or_prompt(path: &Path) -> io::Result<Self> {
        if let Some(config) = Self::load(path) {
            println!("Loaded configuration from {}", path.display());
            return Ok(config);
        }

        let config = Self::prompt()?;
        config.save(path)?;
        println!("Saved configuration to {}", path.display());
        Ok(config)
    }

    /// First-run interactive setup. Blank or unparseable answers fall back
    /// to the defaults.
    fn prompt() -> io::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bot_token: prompt_line("Bot token: ")?,
            chat_id: prompt_line("Chat ID: ")?,
            percent_change_threshold: prompt_parsed(
                "Price change threshold (%): ",
                defaults.percent_change_threshold,
            )?,
            price_poll_interval_secs: prompt_parsed(
                "Price poll interval (seconds): ",
                defaults.price_poll_interval_secs,
            )?,
            volume_delta_threshold: prompt_parsed(
                "Volume increase threshold (IDR): ",
                defaults.volume_delta_threshold,
            )?,
            volume_poll_interval_secs: prompt_parsed(
                "Volume poll interval (seconds): ",
                defaults.volume_poll_interval_secs,
            )?,
            ..defaults
        })
    }

    /// Evaluator thresholds derived from this config.
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            percent_change: self.percent_change_threshold,
            min_price: self.min_price,
            min_volume: self.min_volume,
            volume_delta: self.volume_delta_threshold,
        }
    }
}

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_parsed<T: std::str::FromStr>(label: &str, default: T) -> io::Result<T> {
    let line = prompt_line(label)?;
    Ok(line.parse().unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.percent_change_threshold, 5.0);
        assert_eq!(config.price_poll_interval_secs, 15);
        assert_eq!(config.volume_poll_interval_secs, 300);
        assert_eq!(config.min_price, 25.0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig {
            chat_id: "-1001234567890".to_string(),
            ..AppConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.chat_id, config.chat_id);
        assert_eq!(parsed.volume_delta_threshold, config.volume_delta_threshold);
    }

    #[test]
    fn test_thresholds_mapping() {
        let config = AppConfig {
            percent_change_threshold: 7.5,
            min_price: 100.0,
            min_volume: 1_000.0,
            volume_delta_threshold: 2_000.0,
            ..AppConfig::default()
        };
        let thresholds = config.thresholds();
        assert_eq!(thresholds.percent_change, 7.5);
        assert_eq!(thresholds.min_price, 100.0);
        assert_eq!(thresholds.min_volume, 1_000.0);
        assert_eq!(thresholds.volume_delta, 2_000.0);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        assert!(AppConfig::load(Path::new("/nonexistent/config.json")).is_none());
    }
}
