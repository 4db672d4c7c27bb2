//! Tickwatch - Indodax price and volume alert daemon.
//!
//! Polls the public ticker API for every listed pair and pushes Telegram
//! alerts when round-over-round price or volume moves cross the configured
//! thresholds.

mod config;
mod connectivity;
mod cycle;

use clap::Parser;
use config::AppConfig;
use connectivity::ConnectivityMonitor;
use cycle::{CycleKind, PollCycle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tickwatch_alerts::TelegramNotifier;
use tickwatch_feeds::{FeedError, IndodaxClient, RateLimit, RequestRateLimiter, TickerCache};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Tickwatch CLI
#[derive(Parser, Debug)]
#[command(name = "tickwatch-bot")]
#[command(about = "Indodax price and volume alert bot", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Log level override: trace, debug, info, warn, error
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = match AppConfig::load_or_prompt(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
        if !token.is_empty() {
            config.bot_token = token;
        }
    }

    init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));
    info!("Starting tickwatch");

    let notifier = Arc::new(TelegramNotifier::new(
        config.bot_token.clone(),
        config.chat_id.clone(),
    ));

    // Crash-and-restart: any error escaping a cycle reboots the pipeline
    // from the connectivity check. Unbounded attempts, counter logged.
    let mut restarts: u64 = 0;
    loop {
        if restarts > 0 {
            warn!(restarts, "restarting pipeline");
        }
        if let Err(e) = run_pipeline(&config, Arc::clone(&notifier)).await {
            warn!("pipeline failed: {}", e);
            restarts += 1;
        }
    }
}

/// One pipeline incarnation: connectivity check, pair-list fetch, then the
/// price and volume cycles until one of them fails.
async fn run_pipeline(
    config: &AppConfig,
    notifier: Arc<TelegramNotifier>,
) -> Result<(), FeedError> {
    let client = IndodaxClient::new();

    let mut monitor = ConnectivityMonitor::new(&client, &notifier);
    monitor.wait_until_healthy().await;

    let pairs = client.fetch_pairs().await?;
    info!(pairs = pairs.len(), "monitoring universe fetched");

    let limiter = RequestRateLimiter::new(RateLimit::indodax());
    let cache = Arc::new(TickerCache::new(client, limiter));
    let thresholds = config.thresholds();

    let price_cycle = PollCycle::new(
        CycleKind::Price,
        Duration::from_secs(config.price_poll_interval_secs),
        pairs.clone(),
        Arc::clone(&cache),
        Arc::clone(&notifier),
        thresholds,
    );
    let volume_cycle = PollCycle::new(
        CycleKind::Volume,
        Duration::from_secs(config.volume_poll_interval_secs),
        pairs,
        cache,
        notifier,
        thresholds,
    );

    tokio::try_join!(price_cycle.run(), volume_cycle.run())?;
    Ok(())
}
