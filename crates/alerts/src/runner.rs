//! The poll/announce/suppress loop.
//!
//! Every poll tick spawns an independent cycle task, so a slow fetch delays
//! only its own cycle — later ticks and pending suppression expiries keep
//! firing. The announced set is the only shared state; it is locked briefly
//! around reads and writes, never across the network.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use common::config::TimingConfig;
use common::{Error, WeatherSnapshot};
use gag_client::GagWeatherClient;
use tokio::sync::Mutex;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::engine::AlertEngine;
use crate::messenger::Messenger;

/// Weather types currently suppressed from re-alerting.
pub type AnnouncedSet = Arc<Mutex<HashSet<String>>>;

/// Create a new empty AnnouncedSet.
pub fn new_announced_set() -> AnnouncedSet {
    Arc::new(Mutex::new(HashSet::new()))
}

/// Start the alert loop. Runs until the process exits.
///
/// The Rust rendition of `startWeatherAlerts(api, destination)`: `messenger`
/// is the chat API, `destination` is passed through to it unchanged. The
/// announced set is handed in so other tasks (heartbeat) can observe it; the
/// loop and its expiry tasks are its only writers.
pub async fn start_weather_alerts<M>(
    client: GagWeatherClient,
    engine: Arc<AlertEngine>,
    messenger: Arc<M>,
    destination: String,
    timing: TimingConfig,
    announced: AnnouncedSet,
) where
    M: Messenger + 'static,
{
    let cooldown = Duration::from_secs(timing.realert_cooldown_secs);

    let mut ticker = interval(Duration::from_secs(timing.poll_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let client = client.clone();
        let engine = engine.clone();
        let messenger = messenger.clone();
        let announced = announced.clone();
        let destination = destination.clone();

        tokio::spawn(async move {
            let fetched = client.fetch_weather().await;
            run_cycle(
                &engine,
                messenger.as_ref(),
                &announced,
                &destination,
                cooldown,
                fetched,
            )
            .await;
        });
    }
}

/// One poll cycle: filter, announce, schedule suppression expiry.
///
/// A fetch failure is logged and aborts the cycle without touching any
/// state; the next tick is the only retry.
pub async fn run_cycle<M>(
    engine: &AlertEngine,
    messenger: &M,
    announced: &AnnouncedSet,
    destination: &str,
    cooldown: Duration,
    fetched: Result<WeatherSnapshot, Error>,
) where
    M: Messenger + ?Sized,
{
    let snapshot = match fetched {
        Ok(s) => s,
        Err(e) => {
            error!("Weather fetch failed: {}", e);
            return;
        }
    };

    let active = snapshot.active_weather();
    let matched = {
        let announced = announced.lock().await;
        engine.matched(&active, &announced)
    };

    if matched.is_empty() {
        debug!("No new special weather ({} active types)", active.len());
        return;
    }

    info!("Special weather matched: {:?}", matched);

    let text = AlertEngine::format_alert(&matched);
    // A failed send still marks the types announced; re-sending every poll
    // until the cooldown would flood the chat once delivery recovers.
    if let Err(e) = messenger.send_message(&text, destination).await {
        error!("Alert send failed: {}", e);
    }

    {
        let mut announced = announced.lock().await;
        for name in &matched {
            announced.insert(name.clone());
        }
    }

    // Each cycle's matches expire on their own one-shot timer, independent
    // of any other cycle's.
    tokio::spawn(expire_after(announced.clone(), matched, cooldown));
}

async fn expire_after(announced: AnnouncedSet, matched: Vec<String>, cooldown: Duration) {
    sleep(cooldown).await;
    let mut set = announced.lock().await;
    for name in &matched {
        set.remove(name);
    }
    debug!("Suppression expired for {:?}", matched);
}
