//! Activity log record types.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Timestamp format used by the Marketing API (e.g. `2024-03-01T09:30:00+0000`).
const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A single entry from the ad account activity log.
///
/// Every field tolerates absence: the audit log schema has grown over time
/// and older entries can miss fields newer ones carry. Records are ephemeral,
/// fetched per run and never persisted locally.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdActivity {
    /// Source-native event timestamp string.
    #[serde(default)]
    pub event_time: Option<String>,
    /// Event type tag (e.g. `update_ad_set_budget`).
    #[serde(default)]
    pub event_type: Option<String>,
    /// Object type tag (e.g. `CAMPAIGN`, `AD_SET`).
    #[serde(default)]
    pub object_type: Option<String>,
    /// Id of the affected object.
    #[serde(default)]
    pub object_id: Option<String>,
    /// Display name of the affected object.
    #[serde(default)]
    pub object_name: Option<String>,
    /// Name of the user or system that performed the action.
    #[serde(default)]
    pub actor_name: Option<String>,
    /// Opaque structured payload, serialized as a JSON string by the source.
    #[serde(default)]
    pub extra_data: Option<String>,
}

impl AdActivity {
    /// Parse the event time into Unix seconds.
    ///
    /// Accepts the Marketing API's native `+0000`-style offset as well as
    /// strict RFC 3339. Returns None for absent or unparseable timestamps;
    /// such events cannot be ordered against the watermark and are excluded
    /// from processing by the orchestrator.
    pub fn event_unix_time(&self) -> Option<i64> {
        let raw = self.event_time.as_deref()?;
        Self::parse_event_time(raw).map(|dt| dt.timestamp())
    }

    /// Re-emit the event time as an RFC 3339 string for annotation creation.
    pub fn event_time_rfc3339(&self) -> Option<String> {
        let raw = self.event_time.as_deref()?;
        Self::parse_event_time(raw).map(|dt| dt.to_rfc3339())
    }

    fn parse_event_time(raw: &str) -> Option<DateTime<chrono::FixedOffset>> {
        DateTime::parse_from_str(raw, EVENT_TIME_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
    }

    /// Parse `extra_data` into structured JSON.
    ///
    /// The payload is duck-typed and frequently malformed; any absence or
    /// parse failure yields an empty object so downstream formatting never
    /// aborts the run.
    pub fn parsed_extra_data(&self) -> Value {
        let Some(raw) = self.extra_data.as_deref() else {
            return Value::Object(serde_json::Map::new());
        };
        match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    error = %err,
                    object_id = self.object_id.as_deref().unwrap_or("<none>"),
                    "Malformed extra_data payload, continuing with empty object"
                );
                Value::Object(serde_json::Map::new())
            }
        }
    }
}

/// Explicit `(since, until)` query window in Unix seconds for historical runs.
///
/// Incremental runs carry no window and rely on per-event watermark
/// comparison instead of a server-side time filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    /// Start of the window (inclusive), Unix seconds.
    pub since: i64,
    /// End of the window, Unix seconds.
    pub until: i64,
}

impl SyncWindow {
    /// Build a window covering the last `days` days, ending at `until`.
    pub fn lookback_days(days: u32, until: i64) -> Self {
        Self {
            since: until - i64::from(days) * 86_400,
            until,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity_with_time(raw: &str) -> AdActivity {
        AdActivity {
            event_time: Some(raw.to_string()),
            ..AdActivity::default()
        }
    }

    #[test]
    fn event_unix_time_parses_native_offset_format() {
        let activity = activity_with_time("2024-03-01T09:30:00+0000");
        assert_eq!(activity.event_unix_time(), Some(1_709_285_400));
    }

    #[test]
    fn event_unix_time_parses_rfc3339() {
        let activity = activity_with_time("2024-03-01T09:30:00+00:00");
        assert_eq!(activity.event_unix_time(), Some(1_709_285_400));
    }

    #[test]
    fn event_unix_time_none_for_garbage() {
        assert!(activity_with_time("yesterday").event_unix_time().is_none());
        assert!(AdActivity::default().event_unix_time().is_none());
    }

    #[test]
    fn event_time_rfc3339_normalizes() {
        let activity = activity_with_time("2024-03-01T09:30:00+0000");
        assert_eq!(
            activity.event_time_rfc3339().as_deref(),
            Some("2024-03-01T09:30:00+00:00")
        );
    }

    #[test]
    fn parsed_extra_data_roundtrips_valid_json() {
        let activity = AdActivity {
            extra_data: Some(r#"{"old_value":{"old_value":100}}"#.to_string()),
            ..AdActivity::default()
        };
        let extra = activity.parsed_extra_data();
        assert_eq!(extra["old_value"]["old_value"], 100);
    }

    #[test]
    fn parsed_extra_data_defaults_on_malformed_payload() {
        let activity = AdActivity {
            extra_data: Some("{not json".to_string()),
            ..AdActivity::default()
        };
        assert_eq!(
            activity.parsed_extra_data(),
            Value::Object(serde_json::Map::new())
        );
    }

    #[test]
    fn parsed_extra_data_defaults_when_absent() {
        assert_eq!(
            AdActivity::default().parsed_extra_data(),
            Value::Object(serde_json::Map::new())
        );
    }

    #[test]
    fn sync_window_lookback_days() {
        let window = SyncWindow::lookback_days(7, 1_700_000_000);
        assert_eq!(window.until, 1_700_000_000);
        assert_eq!(window.since, 1_700_000_000 - 7 * 86_400);
    }

    #[test]
    fn activity_deserializes_with_missing_fields() {
        let activity: AdActivity =
            serde_json::from_str(r#"{"event_type":"create_ad"}"#).unwrap();
        assert_eq!(activity.event_type.as_deref(), Some("create_ad"));
        assert!(activity.event_time.is_none());
        assert!(activity.object_name.is_none());
    }
}
