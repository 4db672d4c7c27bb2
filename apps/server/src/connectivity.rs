//! Connectivity gating for the polling pipeline.
//!
//! Both the data source and the notification sink are probed before any
//! polling cycle starts. An unhealthy probe re-enters checking after a
//! constant backoff; there is no exponential backoff.

use std::time::Duration;
use tickwatch_alerts::TelegramNotifier;
use tickwatch_feeds::IndodaxClient;
use tracing::{info, warn};

const PROBE_BACKOFF: Duration = Duration::from_secs(10);

/// Health of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeState {
    #[default]
    Unknown,
    Checking,
    Healthy,
    Unhealthy,
}

impl ProbeState {
    pub fn is_healthy(self) -> bool {
        matches!(self, ProbeState::Healthy)
    }

    /// State after a probe attempt resolves.
    pub fn observe(self, ok: bool) -> ProbeState {
        if ok {
            ProbeState::Healthy
        } else {
            ProbeState::Unhealthy
        }
    }
}

/// Verifies reachability of the ticker API and the Telegram API, blocking
/// the scheduler until both are healthy at the same time.
pub struct ConnectivityMonitor<'a> {
    client: &'a IndodaxClient,
    notifier: &'a TelegramNotifier,
    source: ProbeState,
    sink: ProbeState,
    backoff: Duration,
}

impl<'a> ConnectivityMonitor<'a> {
    pub fn new(client: &'a IndodaxClient, notifier: &'a TelegramNotifier) -> Self {
        Self::with_backoff(client, notifier, PROBE_BACKOFF)
    }

    pub fn with_backoff(
        client: &'a IndodaxClient,
        notifier: &'a TelegramNotifier,
        backoff: Duration,
    ) -> Self {
        Self {
            client,
            notifier,
            source: ProbeState::Unknown,
            sink: ProbeState::Unknown,
            backoff,
        }
    }

    /// Healthy only when both probes are healthy simultaneously.
    pub fn is_healthy(&self) -> bool {
        self.source.is_healthy() && self.sink.is_healthy()
    }

    async fn probe_source(&mut self) {
        self.source = ProbeState::Checking;
        let ok = match self.client.ping().await {
            Ok(latency) => {
                info!("Indodax API > OK ({:.3}s)", latency.as_secs_f64());
                true
            }
            Err(e) => {
                warn!("Indodax API > FAIL: {}", e);
                false
            }
        };
        self.source = self.source.observe(ok);
    }

    async fn probe_sink(&mut self) {
        self.sink = ProbeState::Checking;
        let ok = match self.notifier.ping().await {
            Ok(latency) => {
                info!("Telegram API > OK ({:.3}s)", latency.as_secs_f64());
                true
            }
            Err(e) => {
                warn!("Telegram API > FAIL: {}", e);
                false
            }
        };
        self.sink = self.sink.observe(ok);
    }

    /// Block until both probes are healthy in the same pass.
    pub async fn wait_until_healthy(&mut self) {
        loop {
            self.probe_source().await;
            self.probe_sink().await;
            if self.is_healthy() {
                info!("Connectivity OK, polling cycles may start");
                return;
            }
            tokio::time::sleep(self.backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_probe_state_transitions() {
        assert_eq!(ProbeState::Unknown.observe(true), ProbeState::Healthy);
        assert_eq!(ProbeState::Unknown.observe(false), ProbeState::Unhealthy);
        // An unhealthy probe recovers on the next successful attempt.
        assert_eq!(ProbeState::Unhealthy.observe(true), ProbeState::Healthy);
        assert_eq!(ProbeState::Healthy.observe(false), ProbeState::Unhealthy);
    }

    #[test]
    fn test_joint_health_requires_both_probes() {
        let client = IndodaxClient::with_base_url("http://127.0.0.1:9");
        let notifier = TelegramNotifier::with_api_base(
            "token".to_string(),
            "chat".to_string(),
            "http://127.0.0.1:9",
        );
        let mut monitor = ConnectivityMonitor::new(&client, &notifier);

        assert!(!monitor.is_healthy());
        monitor.source = ProbeState::Healthy;
        assert!(!monitor.is_healthy());
        monitor.sink = ProbeState::Healthy;
        assert!(monitor.is_healthy());
    }
}
