//! Grow a Garden weather API client.
//!
//! Fetches the live weather snapshot from `growagarden.gg` and normalizes
//! embedded timestamp fields for the alert loop.

pub mod normalize;

use common::{Error, WeatherSnapshot};
use tracing::debug;

pub use normalize::{normalize_timestamps, parse_snapshot};

/// Async client for the Grow a Garden weather endpoint.
#[derive(Debug, Clone)]
pub struct GagWeatherClient {
    client: reqwest::Client,
    weather_url: String,
    referer: String,
}

impl GagWeatherClient {
    /// Create a new client for the given endpoint.
    ///
    /// The underlying HTTP client deliberately carries no request timeout:
    /// a hung poll delays only its own cycle, never subsequent ticks.
    pub fn new(weather_url: impl Into<String>, referer: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build weather HTTP client");

        Self {
            client,
            weather_url: weather_url.into(),
            referer: referer.into(),
        }
    }

    /// Perform one poll: GET the endpoint, read the full body, parse and
    /// normalize it into a [`WeatherSnapshot`].
    pub async fn fetch_weather(&self) -> Result<WeatherSnapshot, Error> {
        debug!("Fetching weather snapshot: {}", self.weather_url);

        let resp = self
            .client
            .get(&self.weather_url)
            .header("accept", "*/*")
            .header("accept-language", "en-US,en;q=0.9")
            .header("priority", "u=1, i")
            .header("referer", &self.referer)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(500).collect();
            return Err(Error::Transport(format!(
                "weather endpoint returned {}: {}",
                status, excerpt
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let snapshot = parse_snapshot(&body)?;
        debug!(
            "Snapshot has {} active weather entries",
            snapshot.active_weather().len()
        );

        Ok(snapshot)
    }
}
