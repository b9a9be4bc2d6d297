//! Bot configuration types.

use serde::{Deserialize, Serialize};

/// Top-level bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Webhook endpoint alert messages are POSTed to.
    #[serde(default)]
    pub webhook_url: String,

    /// Opaque chat destination (thread/channel id), passed through unchanged.
    #[serde(default)]
    pub destination: String,

    /// Weather endpoint polled every cycle.
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// Referer header sent with every poll request.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Weather types considered alert-worthy. Fixed after startup.
    #[serde(default = "default_special_weather")]
    pub special_weather: Vec<String>,

    /// Timing parameters (seconds).
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Timing configuration (all values in seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Poll interval for the alert loop.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Per-type suppression window before a type may re-alert.
    #[serde(default = "default_realert_cooldown")]
    pub realert_cooldown_secs: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_weather_url() -> String {
    "https://growagarden.gg/api/v1/weather/gag".into()
}

fn default_referer() -> String {
    "https://growagarden.gg/weather".into()
}

fn default_special_weather() -> Vec<String> {
    [
        "Rain",
        "Thunderstorm",
        "Frost",
        "Night",
        "Blood Moon",
        "Meteor Shower",
        "Disco",
        "Jandel Storm",
        "Sheckle Rain",
        "Chocolate Rain",
        "Lazer Storm",
        "Tornado",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_poll_interval() -> u64 {
    120
}

fn default_realert_cooldown() -> u64 {
    1800
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            realert_cooldown_secs: default_realert_cooldown(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            destination: String::new(),
            weather_url: default_weather_url(),
            referer: default_referer(),
            special_weather: default_special_weather(),
            timing: TimingConfig::default(),
        }
    }
}
