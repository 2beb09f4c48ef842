//! Human-readable annotation text for admitted events.
//!
//! Formatting is total: malformed or missing input degrades to placeholders,
//! never to an error.

use ads_activity_client::AdActivity;
use serde_json::Value;

/// Placeholder rendered when the object name is absent.
const UNKNOWN_NAME: &str = "Unknown";

/// Placeholder rendered when a budget value is absent or malformed.
const MISSING_VALUE: &str = "?";

/// Resolve the display name for a source object type tag.
///
/// Unmapped tags pass through unchanged.
pub fn display_object_type(raw: &str) -> &str {
    match raw {
        "CAMPAIGN" => "Campaign",
        "AD_SET" => "Ad Set",
        "AD" => "Ad",
        "AUDIENCE" => "Audience",
        other => other,
    }
}

/// Build the annotation message for an event, or None when there is nothing
/// to say (no event type tag at all).
///
/// Budget-style events (`budget` or `spend_cap` in the type identifier)
/// render the old and new values from the nested extra payload; everything
/// else falls back to `"<event_type> on <object name>"`.
pub fn format_message(event: &AdActivity, extra: &Value) -> Option<String> {
    let event_type = event.event_type.as_deref()?;
    let object_name = event.object_name.as_deref().unwrap_or(UNKNOWN_NAME);

    if event_type.contains("budget") || event_type.contains("spend_cap") {
        let display_type =
            display_object_type(event.object_type.as_deref().unwrap_or(UNKNOWN_NAME));
        let old = nested_value(extra, "old_value");
        let new = nested_value(extra, "new_value");
        return Some(format!(
            "Budget updated on {}: {} (${} -> ${})",
            display_type, object_name, old, new
        ));
    }

    Some(format!("{} on {}", event_type, object_name))
}

/// Extract `extra[key][key]` as display text, defaulting to a placeholder.
///
/// The source doubles the key for budget payloads: the old value sits at
/// `old_value.old_value` and the new at `new_value.new_value`.
fn nested_value(extra: &Value, key: &str) -> String {
    match extra.get(key).and_then(|outer| outer.get(key)) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => MISSING_VALUE.to_string(),
    }
}
