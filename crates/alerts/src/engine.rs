//! Special-weather matching and alert formatting.
//!
//! Pure logic, evaluated once per poll cycle: which active weather types are
//! alert-worthy and not currently suppressed, and what the chat message for
//! them looks like.

use std::collections::HashSet;

/// Matches active weather types against the configured special list.
pub struct AlertEngine {
    special_weather: Vec<String>,
}

impl AlertEngine {
    pub fn new(special_weather: Vec<String>) -> Self {
        Self { special_weather }
    }

    /// Active types that are special and not currently announced, in
    /// active-list order.
    ///
    /// Duplicates in `active` are preserved — suppression only kicks in once
    /// a type has actually been announced.
    pub fn matched(&self, active: &[String], announced: &HashSet<String>) -> Vec<String> {
        active
            .iter()
            .filter(|name| {
                self.special_weather.contains(*name) && !announced.contains(name.as_str())
            })
            .cloned()
            .collect()
    }

    /// The chat message body for a non-empty set of matched types.
    pub fn format_alert(matched: &[String]) -> String {
        let bullets: Vec<String> = matched.iter().map(|name| format!("• {}", name)).collect();
        format!(
            "🌦️ **Special Weather Alert in Grow a Garden**:\n\n{}",
            bullets.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AlertEngine {
        AlertEngine::new(vec!["Rain".into(), "Frost".into(), "Tornado".into()])
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_special_types_in_active_order() {
        let active = names(&["Rain", "Clear", "Frost"]);
        let matched = engine().matched(&active, &HashSet::new());
        assert_eq!(matched, vec!["Rain", "Frost"]);
    }

    #[test]
    fn announced_types_are_excluded() {
        let active = names(&["Rain", "Clear", "Frost"]);
        let announced: HashSet<String> = ["Rain".to_string()].into();
        let matched = engine().matched(&active, &announced);
        assert_eq!(matched, vec!["Frost"]);
    }

    #[test]
    fn fully_announced_cycle_matches_nothing() {
        let active = names(&["Rain", "Frost"]);
        let announced: HashSet<String> = ["Rain".to_string(), "Frost".to_string()].into();
        assert!(engine().matched(&active, &announced).is_empty());
    }

    #[test]
    fn non_special_types_never_match() {
        let active = names(&["Clear", "Breezy"]);
        assert!(engine().matched(&active, &HashSet::new()).is_empty());
    }

    #[test]
    fn repeated_active_names_survive_into_matched() {
        let active = names(&["Rain", "Rain"]);
        let matched = engine().matched(&active, &HashSet::new());
        assert_eq!(matched, vec!["Rain", "Rain"]);
    }

    #[test]
    fn alert_message_has_header_blank_line_and_bullets() {
        let msg = AlertEngine::format_alert(&names(&["Rain", "Frost"]));
        assert_eq!(
            msg,
            "🌦️ **Special Weather Alert in Grow a Garden**:\n\n• Rain\n• Frost"
        );
    }
}
