//! Snapshot parsing and timestamp normalization.
//!
//! The upstream API timestamps entries with ISO strings. Downstream code
//! wants epoch milliseconds, so every nested object carrying a string
//! `timestamp` field is rewritten in place: `timestamp` becomes the numeric
//! equivalent and the original text moves to a `LastSeen` field.

use chrono::{DateTime, NaiveDateTime};
use common::{Error, WeatherSnapshot};
use serde_json::Value;

/// Parse a raw response body into a normalized [`WeatherSnapshot`].
pub fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, Error> {
    let mut raw: Value = serde_json::from_str(body)?;
    normalize_timestamps(&mut raw);
    Ok(WeatherSnapshot { raw })
}

/// Recursively rewrite string `timestamp` fields below `value`.
///
/// Every nested object is visited, whether it sits in an object slot or an
/// array element, and whether or not its parent matched — siblings and
/// children of a rewritten node are both walked. Scalars and objects without
/// a string `timestamp` are left untouched. A timestamp that fails to parse
/// is also left untouched, so the walk is idempotent.
pub fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for child in map.values_mut() {
                rewrite_timestamp(child);
                normalize_timestamps(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                rewrite_timestamp(item);
                normalize_timestamps(item);
            }
        }
        _ => {}
    }
}

/// Rewrite `node` in place if it is an object carrying a string `timestamp`.
fn rewrite_timestamp(node: &mut Value) {
    if let Value::Object(inner) = node {
        if let Some(Value::String(raw)) = inner.get("timestamp") {
            if let Some(millis) = parse_epoch_millis(raw) {
                let original = raw.clone();
                inner.insert("timestamp".into(), Value::from(millis));
                inner.insert("LastSeen".into(), Value::String(original));
            }
        }
    }
}

/// Epoch milliseconds for the timestamp formats the API emits.
///
/// RFC 3339 first, then a naive `YYYY-MM-DD hh:mm:ss` treated as UTC.
fn parse_epoch_millis(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rewrites_string_timestamp_and_keeps_original() {
        let mut v = json!({
            "current": {
                "slot0": {
                    "name": "Rain",
                    "timestamp": "2024-06-10T06:13:20.000Z",
                    "duration": 300
                }
            }
        });
        normalize_timestamps(&mut v);

        let entry = &v["current"]["slot0"];
        assert_eq!(entry["timestamp"], json!(1718000000000i64));
        assert_eq!(entry["LastSeen"], json!("2024-06-10T06:13:20.000Z"));
        // Sibling fields survive unchanged.
        assert_eq!(entry["name"], json!("Rain"));
        assert_eq!(entry["duration"], json!(300));
    }

    #[test]
    fn walks_children_of_matched_nodes_and_all_siblings() {
        let mut v = json!({
            "outer": {
                "timestamp": "2024-06-10T06:13:20Z",
                "nested": {
                    "deep": { "timestamp": "2024-06-10T07:13:20Z" }
                }
            },
            "sibling": {
                "leaf": { "timestamp": "2024-06-10T08:13:20Z" }
            }
        });
        normalize_timestamps(&mut v);

        assert!(v["outer"]["timestamp"].is_i64());
        assert!(v["outer"]["nested"]["deep"]["timestamp"].is_i64());
        assert!(v["sibling"]["leaf"]["timestamp"].is_i64());
    }

    #[test]
    fn descends_arrays() {
        let mut v = json!({
            "history": [
                { "timestamp": "2024-06-10T06:13:20Z" },
                { "timestamp": "2024-06-10T06:15:20Z" }
            ]
        });
        normalize_timestamps(&mut v);

        assert!(v["history"][0]["timestamp"].is_i64());
        assert!(v["history"][1]["timestamp"].is_i64());
        assert_eq!(v["history"][0]["LastSeen"], json!("2024-06-10T06:13:20Z"));
    }

    #[test]
    fn leaves_non_matching_values_untouched() {
        let original = json!({
            "numeric": { "timestamp": 1718000000000i64 },
            "no_timestamp": { "name": "Clear" },
            "scalar": 42,
            "text": "timestamp"
        });
        let mut v = original.clone();
        normalize_timestamps(&mut v);
        assert_eq!(v, original);
    }

    #[test]
    fn unparseable_timestamp_is_left_alone() {
        let original = json!({ "entry": { "timestamp": "not a date" } });
        let mut v = original.clone();
        normalize_timestamps(&mut v);
        assert_eq!(v, original);
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut v = json!({
            "current": {
                "slot0": { "name": "Frost", "timestamp": "2024-06-10T06:13:20Z" }
            }
        });
        normalize_timestamps(&mut v);
        let once = v.clone();
        normalize_timestamps(&mut v);
        assert_eq!(v, once);
    }

    #[test]
    fn parse_snapshot_round_trip_preserves_non_timestamp_fields() {
        let body = r#"{
            "current": {
                "slot0": {
                    "name": "Blood Moon",
                    "timestamp": "2024-06-10T06:13:20.000Z",
                    "intensity": "high",
                    "mutations": ["Bloodlit"]
                }
            },
            "lastUpdated": "irrelevant"
        }"#;
        let snapshot = parse_snapshot(body).unwrap();
        let entry = &snapshot.raw["current"]["slot0"];

        assert_eq!(entry["name"], json!("Blood Moon"));
        assert_eq!(entry["intensity"], json!("high"));
        assert_eq!(entry["mutations"], json!(["Bloodlit"]));
        assert_eq!(entry["timestamp"], json!(1718000000000i64));
        assert_eq!(entry["LastSeen"], json!("2024-06-10T06:13:20.000Z"));
        // Top-level scalar strings are not timestamp containers.
        assert_eq!(snapshot.raw["lastUpdated"], json!("irrelevant"));
    }

    #[test]
    fn parse_snapshot_rejects_malformed_body() {
        let err = parse_snapshot("<html>down for maintenance</html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn space_separated_timestamps_parse_as_utc() {
        assert_eq!(
            parse_epoch_millis("2024-06-10 06:13:20"),
            Some(1718000000000)
        );
    }
}
