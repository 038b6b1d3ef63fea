//! Calendar content configuration.
//!
//! Parses the per-week content JSON: a `"normal"` baseline week plus
//! override weeks keyed by relative offset from a release week, each
//! holding entry lists for the five workdays. Parsing is total in the
//! same spirit as constraint normalization: malformed keys and entries
//! are dropped, not reported.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Weekday;
use serde_json::Value;

use crate::week::coerce_int;

/// Weekdays a release week spans, in calendar order. Weekend days never
/// carry content.
pub const WORK_WEEK: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// One configured entry for a single weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEntry {
    /// A summary template rendered into its own event.
    Literal(String),
    /// Directive extending an already-present literal entry during a
    /// merge. Never rendered on its own.
    Append {
        /// Index of the target entry in the day's merged list.
        position: usize,
        /// Text appended to the target literal.
        text: String,
    },
}

impl ContentEntry {
    /// Parse one raw entry. Strings become literals; an object of the
    /// form `{"action": "append", "position": N, "string": "…"}` becomes
    /// a directive. Anything else is dropped.
    fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(text) => Some(Self::Literal(text.clone())),
            Value::Object(map) => {
                if map.get("action").and_then(Value::as_str) != Some("append") {
                    return None;
                }
                let position = usize::try_from(coerce_int(map.get("position")?)).ok()?;
                let text = map.get("string")?.as_str()?.to_string();
                Some(Self::Append { position, text })
            }
            _ => None,
        }
    }
}

/// Entries for one template week, one list per workday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekContent {
    days: [Vec<ContentEntry>; WORK_WEEK.len()],
}

impl WeekContent {
    /// Parse a raw week object, reading the lowercase day-name keys.
    /// Weekend keys and non-list day values are ignored.
    fn from_value(raw: &Value) -> Self {
        let mut content = Self::default();
        let Some(map) = raw.as_object() else {
            return content;
        };
        for (slot, day) in WORK_WEEK.iter().enumerate() {
            if let Some(list) = map.get(day_name(*day)).and_then(Value::as_array) {
                content.days[slot] = list.iter().filter_map(ContentEntry::from_value).collect();
            }
        }
        content
    }

    /// Entries configured for a day; always empty on weekends.
    #[must_use]
    pub fn entries(&self, day: Weekday) -> &[ContentEntry] {
        match WORK_WEEK.iter().position(|&d| d == day) {
            Some(slot) => &self.days[slot],
            None => &[],
        }
    }

    /// Overlay another week on top of this one, functionally.
    ///
    /// Overlay literals are appended after the baseline entries; append
    /// directives extend the literal at their target position. A
    /// directive addressing a missing or non-literal target is skipped.
    /// The baseline itself is never touched.
    #[must_use]
    pub fn merged_with(&self, overlay: &Self) -> Self {
        let mut merged = self.clone();
        for (slot, overlay_day) in overlay.days.iter().enumerate() {
            for entry in overlay_day {
                match entry {
                    ContentEntry::Literal(text) => {
                        merged.days[slot].push(ContentEntry::Literal(text.clone()));
                    }
                    ContentEntry::Append { position, text } => {
                        if let Some(ContentEntry::Literal(target)) =
                            merged.days[slot].get_mut(*position)
                        {
                            target.push_str(text);
                        }
                    }
                }
            }
        }
        merged
    }
}

/// Full content configuration for calendar generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentConfig {
    /// Baseline content applied to every unexceptional week.
    pub normal: WeekContent,
    /// Override weeks keyed by relative offset from a release week.
    pub offsets: BTreeMap<i32, WeekContent>,
}

impl ContentConfig {
    /// Load a content configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;
        let raw: Value = serde_json::from_str(&content)
            .with_context(|| format!("Content file is not valid JSON: {}", path.display()))?;
        Ok(Self::from_value(&raw))
    }

    /// Build a configuration from a raw JSON value.
    ///
    /// The `"normal"` key holds the baseline; every other key is a
    /// string-encoded relative week offset. Keys that do not parse as an
    /// integer are dropped, as is a non-object input.
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            return Self::default();
        };
        let mut config = Self::default();
        for (key, value) in map {
            if key == "normal" {
                config.normal = WeekContent::from_value(value);
            } else if let Ok(offset) = key.parse::<i32>() {
                config.offsets.insert(offset, WeekContent::from_value(value));
            }
        }
        config
    }
}

/// Lowercase config key for a weekday.
fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn literal(text: &str) -> ContentEntry {
        ContentEntry::Literal(text.to_string())
    }

    #[test]
    fn test_non_object_input_is_empty_config() {
        assert_eq!(ContentConfig::from_value(&json!(null)), ContentConfig::default());
        assert_eq!(ContentConfig::from_value(&json!([1])), ContentConfig::default());
    }

    #[test]
    fn test_normal_week_parsed_per_day() {
        let config = ContentConfig::from_value(&json!({
            "normal": {
                "monday": ["A"],
                "friday": ["B", "C"]
            }
        }));
        assert_eq!(config.normal.entries(Weekday::Mon), &[literal("A")]);
        assert_eq!(
            config.normal.entries(Weekday::Fri),
            &[literal("B"), literal("C")]
        );
        assert!(config.normal.entries(Weekday::Tue).is_empty());
    }

    #[test]
    fn test_weekend_days_carry_no_content() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"saturday": ["X"], "sunday": ["Y"], "monday": ["A"]}
        }));
        assert!(config.normal.entries(Weekday::Sat).is_empty());
        assert!(config.normal.entries(Weekday::Sun).is_empty());
        assert_eq!(config.normal.entries(Weekday::Mon), &[literal("A")]);
    }

    #[test]
    fn test_offset_keys_parse_as_integers() {
        let config = ContentConfig::from_value(&json!({
            "-1": {"monday": ["F"]},
            "0": {"monday": ["R"]},
            "5": {"monday": ["M"]},
            "x": {"monday": ["dropped"]},
            "2.5": {"monday": ["dropped"]}
        }));
        let keys: Vec<i32> = config.offsets.keys().copied().collect();
        assert_eq!(keys, vec![-1, 0, 5]);
    }

    #[test]
    fn test_append_directive_parsed() {
        let config = ContentConfig::from_value(&json!({
            "normal": {
                "monday": [{"action": "append", "position": 0, "string": "!"}]
            }
        }));
        assert_eq!(
            config.normal.entries(Weekday::Mon),
            &[ContentEntry::Append {
                position: 0,
                text: "!".to_string()
            }]
        );
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let config = ContentConfig::from_value(&json!({
            "normal": {
                "monday": [
                    42,
                    {"action": "prepend", "position": 0, "string": "!"},
                    {"action": "append", "string": "!"},
                    {"action": "append", "position": -1, "string": "!"},
                    {"action": "append", "position": 0},
                    "kept"
                ]
            }
        }));
        assert_eq!(config.normal.entries(Weekday::Mon), &[literal("kept")]);
    }

    #[test]
    fn test_append_directive_negative_position_dropped() {
        // No end-relative indexing: a directive can only address entries
        // by their forward position, so a negative one never parses.
        let config = ContentConfig::from_value(&json!({
            "normal": {
                "monday": ["A", {"action": "append", "position": -1, "string": "!"}]
            }
        }));
        assert_eq!(config.normal.entries(Weekday::Mon), &[literal("A")]);
    }

    #[test]
    fn test_non_list_day_value_ignored() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"monday": "A"}
        }));
        assert!(config.normal.entries(Weekday::Mon).is_empty());
    }

    #[test]
    fn test_merge_appends_literals_after_baseline() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"monday": ["A"]},
            "5": {"monday": ["B"]}
        }));
        let merged = config.normal.merged_with(&config.offsets[&5]);
        assert_eq!(merged.entries(Weekday::Mon), &[literal("A"), literal("B")]);
    }

    #[test]
    fn test_merge_append_directive_extends_target() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"monday": ["A"]},
            "5": {"monday": [{"action": "append", "position": 0, "string": "!"}]}
        }));
        let merged = config.normal.merged_with(&config.offsets[&5]);
        assert_eq!(merged.entries(Weekday::Mon), &[literal("A!")]);
        // The baseline keeps its original text for other offsets.
        assert_eq!(config.normal.entries(Weekday::Mon), &[literal("A")]);
    }

    #[test]
    fn test_merge_directive_can_target_overlay_literal() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"monday": ["A"]},
            "5": {"monday": ["B", {"action": "append", "position": 1, "string": "!"}]}
        }));
        let merged = config.normal.merged_with(&config.offsets[&5]);
        assert_eq!(merged.entries(Weekday::Mon), &[literal("A"), literal("B!")]);
    }

    #[test]
    fn test_merge_directive_out_of_range_skipped() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"monday": ["A"]},
            "5": {"monday": [{"action": "append", "position": 7, "string": "!"}]}
        }));
        let merged = config.normal.merged_with(&config.offsets[&5]);
        assert_eq!(merged.entries(Weekday::Mon), &[literal("A")]);
    }

    #[test]
    fn test_merge_directive_on_directive_target_skipped() {
        let config = ContentConfig::from_value(&json!({
            "normal": {"monday": [{"action": "append", "position": 9, "string": "x"}]},
            "5": {"monday": [{"action": "append", "position": 0, "string": "!"}]}
        }));
        let merged = config.normal.merged_with(&config.offsets[&5]);
        assert_eq!(merged.entries(Weekday::Mon), config.normal.entries(Weekday::Mon));
    }

    #[test]
    fn test_from_path_valid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, r#"{"normal": {"monday": ["A"]}}"#).unwrap();
        let config = ContentConfig::from_path(&path).unwrap();
        assert_eq!(config.normal.entries(Weekday::Mon), &[literal("A")]);
    }

    #[test]
    fn test_from_path_invalid_json_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(&path, "not json").unwrap();
        let err = ContentConfig::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_from_path_missing_file_errors() {
        let err = ContentConfig::from_path("/nonexistent/content.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
