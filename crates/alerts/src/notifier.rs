//! Telegram delivery.

use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Bounded request timeout; a hung delivery must not stall the round.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced by message delivery.
///
/// Delivery is best effort: callers log these and carry on, nothing is
/// queued for retry.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Telegram returned HTTP {0}")]
    Status(u16),
}

/// Sends formatted HTML messages to one Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self::with_api_base(bot_token, chat_id, TELEGRAM_API_BASE)
    }

    pub fn with_api_base(bot_token: String, chat_id: String, api_base: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            bot_token,
            chat_id,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Deliver one message to the configured chat. HTML parse mode, link
    /// previews disabled so chart links stay compact.
    pub async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "true"),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::Status(response.status().as_u16()));
        }

        debug!(chat_id = %self.chat_id, "alert delivered");
        Ok(())
    }

    /// Reachability probe against the Bot API host, returning its latency.
    pub async fn ping(&self) -> Result<Duration, DeliveryError> {
        let started = std::time::Instant::now();
        let response = self.client.get(&self.api_base).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::Status(response.status().as_u16()));
        }
        Ok(started.elapsed())
    }
}
