//! Domain types shared across the bot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One weather entry as it appears in a snapshot category slot.
///
/// After normalization, `timestamp` holds the derived epoch-millisecond value
/// and `LastSeen` keeps the upstream timestamp text verbatim. Entries that
/// never carried a timestamp leave both unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub name: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(rename = "LastSeen", default)]
    pub last_seen: Option<String>,
}

/// A parsed, timestamp-normalized weather snapshot.
///
/// The upstream schema is dynamic — categories come and go and nest freely —
/// so the body is kept as a JSON tree and typed accessors pull out what the
/// alert loop needs. Recreated on every poll, never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSnapshot {
    pub raw: Value,
}

impl WeatherSnapshot {
    /// Names of every entry in the `current` category, in slot order.
    ///
    /// A snapshot without a `current` category yields an empty list.
    /// Duplicate names are preserved — the upstream can repeat a type across
    /// slots.
    pub fn active_weather(&self) -> Vec<String> {
        match self.raw.get("current") {
            Some(Value::Object(slots)) => slots
                .values()
                .filter_map(|entry| entry.get("name"))
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Typed view of the `current` category's entries.
    pub fn current_entries(&self) -> Vec<WeatherEntry> {
        match self.raw.get("current") {
            Some(Value::Object(slots)) => slots
                .values()
                .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}
