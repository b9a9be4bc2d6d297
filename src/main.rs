//! gag-weather-bot: special-weather chat alerts for Grow a Garden.
//!
//! Single-binary Tokio application that:
//! 1. Polls the Grow a Garden weather endpoint on a fixed interval
//! 2. Matches active weather against a curated special list
//! 3. Sends one chat alert per batch of new matches through a webhook
//! 4. Suppresses re-alerts per type for a 30-minute cooldown

mod config;
mod messenger;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use alerts::{new_announced_set, run_cycle, start_weather_alerts, AlertEngine};
use gag_client::GagWeatherClient;
use messenger::{LogMessenger, WebhookMessenger};

/// Grow a Garden special-weather alert bot
#[derive(Parser)]
#[command(name = "gag-weather-bot", about = "Grow a Garden special-weather alert bot")]
struct Cli {
    /// Fetch one snapshot, print the active weather types, then exit.
    #[arg(long)]
    check_fetch: bool,

    /// Run a single alert cycle without delivering anything, then exit.
    #[arg(long)]
    dry_run: bool,
}

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gag_weather_bot=info,gag_client=info,alerts=info".into()),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("🌦️  Weather alert bot starting up...");

    // Load configuration.
    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Endpoint: {}", cfg.weather_url);
    info!("Special weather types: {:?}", cfg.special_weather);
    info!(
        "Timing: poll every {}s, re-alert cooldown {}s",
        cfg.timing.poll_interval_secs, cfg.timing.realert_cooldown_secs
    );

    let client = GagWeatherClient::new(cfg.weather_url.clone(), cfg.referer.clone());
    let engine = Arc::new(AlertEngine::new(cfg.special_weather.clone()));

    // ── Check-fetch mode ─────────────────────────────────────────────
    if cli.check_fetch {
        info!("Running fetch check...");
        match client.fetch_weather().await {
            Ok(snapshot) => {
                let entries = snapshot.current_entries();
                info!("✅ Fetch successful! {} active weather entries", entries.len());
                for entry in &entries {
                    info!(
                        "  → {} (last seen: {})",
                        entry.name,
                        entry.last_seen.as_deref().unwrap_or("unknown")
                    );
                }
            }
            Err(e) => {
                error!("❌ Fetch check failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let cooldown = Duration::from_secs(cfg.timing.realert_cooldown_secs);

    // ── Dry-run mode ─────────────────────────────────────────────────
    if cli.dry_run {
        info!("Running single dry-run cycle...");
        let announced = new_announced_set();
        let fetched = client.fetch_weather().await;
        run_cycle(
            &engine,
            &LogMessenger,
            &announced,
            &cfg.destination,
            cooldown,
            fetched,
        )
        .await;

        let announced = announced.lock().await;
        info!(
            "Dry-run complete: {} type(s) would be suppressed: {:?}",
            announced.len(),
            announced
        );
        return;
    }

    // ── Live mode ────────────────────────────────────────────────────
    if cfg.webhook_url.trim().is_empty() {
        error!("GAG_WEBHOOK_URL is required for live mode (set in .env or environment)");
        std::process::exit(1);
    }
    if cfg.destination.trim().is_empty() {
        error!("GAG_DESTINATION is required for live mode (set in .env or environment)");
        std::process::exit(1);
    }

    let messenger = Arc::new(WebhookMessenger::new(cfg.webhook_url.clone()));
    let announced = new_announced_set();

    info!("Spawning tasks...");

    // Task 1: Alert loop
    let loop_engine = engine.clone();
    let loop_messenger = messenger.clone();
    let loop_announced = announced.clone();
    let loop_destination = cfg.destination.clone();
    let loop_timing = cfg.timing.clone();
    let alert_handle = tokio::spawn(async move {
        start_weather_alerts(
            client,
            loop_engine,
            loop_messenger,
            loop_destination,
            loop_timing,
            loop_announced,
        )
        .await;
    });

    // Task 2: Heartbeat
    let hb_announced = announced.clone();
    let hb_timing = cfg.timing.clone();
    let heartbeat_handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEARTBEAT_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let suppressed = hb_announced.lock().await.len();
            info!(
                "HEARTBEAT: suppressed={} poll={}s cooldown={}s",
                suppressed, hb_timing.poll_interval_secs, hb_timing.realert_cooldown_secs
            );
        }
    });

    // ── Wait for shutdown ────────────────────────────────────────────
    info!("🚀 Weather alert bot is running. Press Ctrl+C to stop.");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        r = alert_handle => {
            error!("Alert loop task exited: {:?}", r);
        }
        r = heartbeat_handle => {
            error!("Heartbeat task exited: {:?}", r);
        }
    }

    info!("Weather alert bot shut down.");
}
