//! Configuration loader — merges env vars, .env file, and config.toml.

use common::{BotConfig, Error};
use std::path::Path;

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn validate_config(config: &BotConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.weather_url.trim().is_empty() {
        issues.push("weather_url must not be empty".into());
    }
    if config.referer.trim().is_empty() {
        issues.push("referer must not be empty".into());
    }
    if config.special_weather.is_empty() {
        issues.push("special_weather must contain at least one type".into());
    }
    if config.timing.poll_interval_secs == 0 {
        issues.push("timing.poll_interval_secs must be > 0".into());
    }
    if config.timing.realert_cooldown_secs == 0 {
        issues.push("timing.realert_cooldown_secs must be > 0".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load bot configuration from environment and optional config file.
///
/// Webhook URL and destination stay optional here — the probe modes run
/// without them; live mode enforces both at startup.
pub fn load_config() -> Result<BotConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = BotConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    if let Ok(url) = std::env::var("GAG_WEBHOOK_URL") {
        config.webhook_url = url;
    }
    if let Ok(dest) = std::env::var("GAG_DESTINATION") {
        config.destination = dest;
    }
    if let Ok(url) = std::env::var("GAG_WEATHER_URL") {
        config.weather_url = url;
    }
    if let Ok(referer) = std::env::var("GAG_REFERER") {
        config.referer = referer;
    }
    if let Ok(raw) = std::env::var("GAG_POLL_INTERVAL_SECS") {
        config.timing.poll_interval_secs = parse_positive_u64(&raw, "GAG_POLL_INTERVAL_SECS")?;
    }
    if let Ok(raw) = std::env::var("GAG_REALERT_COOLDOWN_SECS") {
        config.timing.realert_cooldown_secs =
            parse_positive_u64(&raw, "GAG_REALERT_COOLDOWN_SECS")?;
    }

    validate_config(&config)?;

    Ok(config)
}
