//! Admission filtering for fetched activity events.
//!
//! Pure set-membership and watermark checks; no side effects. Rules apply in
//! a fixed order and the first match wins.

/// Object types eligible for annotation. Case-sensitive source-native tags.
pub const ALLOWED_OBJECT_TYPES: [&str; 4] = ["CAMPAIGN", "AD_SET", "AD", "AUDIENCE"];

/// Event types eligible for annotation unless the global override is set.
///
/// Closed vocabulary grouped by what changed; not configurable at runtime.
pub const ALLOWED_EVENT_TYPES: [&str; 20] = [
    // Budget and spend caps
    "update_campaign_budget",
    "update_ad_set_budget",
    "update_campaign_spend_cap",
    "update_ad_set_spend_cap",
    "update_campaign_schedule",
    // Run status
    "update_campaign_run_status",
    "update_ad_set_run_status",
    "update_ad_run_status",
    // Ad review outcomes
    "ad_review_approved",
    "ad_review_declined",
    // Targeting and audiences
    "update_ad_set_target_spec",
    "update_ad_targets_spec",
    "create_audience",
    "update_audience",
    "delete_audience",
    // Billing
    "add_funding_source",
    "remove_funding_source",
    "billing_charge_failed",
    // Creatives
    "create_ad",
    "update_ad_creative",
];

/// Why an event was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Incremental run and the event time is at or before the watermark.
    BeforeWatermark,
    /// Object type outside the allowed set.
    ObjectType,
    /// Event type outside the allowlist and the override flag is off.
    EventType,
}

/// Admission decision for one fetched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Forward the event.
    Admit,
    /// Drop the event for the given reason.
    Skip(SkipReason),
}

/// Decide whether an event is forwarded.
///
/// Rules short-circuit in order: watermark (incremental runs only), then
/// object type, then event type. Absent tags never match an allowlist.
///
/// # Arguments
///
/// * `event_ts` - Event time in Unix seconds
/// * `object_type` - Source-native object type tag, if present
/// * `event_type` - Source-native event type tag, if present
/// * `watermark` - Latest already-forwarded event time in Unix seconds
/// * `historical` - True when the run carries an explicit lookback window
/// * `allow_all_event_types` - Global override bypassing the event-type list
pub fn admit(
    event_ts: i64,
    object_type: Option<&str>,
    event_type: Option<&str>,
    watermark: i64,
    historical: bool,
    allow_all_event_types: bool,
) -> Admission {
    if !historical && event_ts <= watermark {
        return Admission::Skip(SkipReason::BeforeWatermark);
    }

    let object_allowed =
        object_type.is_some_and(|tag| ALLOWED_OBJECT_TYPES.contains(&tag));
    if !object_allowed {
        return Admission::Skip(SkipReason::ObjectType);
    }

    if !allow_all_event_types {
        let event_allowed =
            event_type.is_some_and(|tag| ALLOWED_EVENT_TYPES.contains(&tag));
        if !event_allowed {
            return Admission::Skip(SkipReason::EventType);
        }
    }

    Admission::Admit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_allowed_event_past_watermark() {
        let decision = admit(
            100,
            Some("CAMPAIGN"),
            Some("update_campaign_budget"),
            50,
            false,
            false,
        );
        assert_eq!(decision, Admission::Admit);
    }

    #[test]
    fn watermark_skip_applies_at_or_before_boundary() {
        let decision = admit(
            50,
            Some("CAMPAIGN"),
            Some("update_campaign_budget"),
            50,
            false,
            false,
        );
        assert_eq!(decision, Admission::Skip(SkipReason::BeforeWatermark));

        let decision = admit(
            49,
            Some("CAMPAIGN"),
            Some("update_campaign_budget"),
            50,
            false,
            false,
        );
        assert_eq!(decision, Admission::Skip(SkipReason::BeforeWatermark));
    }

    #[test]
    fn watermark_skip_has_precedence_over_type_checks() {
        // Would fail the object-type check too, but the watermark rule wins.
        let decision = admit(10, Some("PAGE_POST"), Some("unknown"), 50, false, true);
        assert_eq!(decision, Admission::Skip(SkipReason::BeforeWatermark));
    }

    #[test]
    fn historical_runs_ignore_the_watermark() {
        let decision = admit(
            10,
            Some("AD_SET"),
            Some("update_ad_set_budget"),
            50,
            true,
            false,
        );
        assert_eq!(decision, Admission::Admit);
    }

    #[test]
    fn object_type_outside_set_is_skipped_even_with_override() {
        let decision = admit(100, Some("PAGE_POST"), Some("create_ad"), 0, false, true);
        assert_eq!(decision, Admission::Skip(SkipReason::ObjectType));
    }

    #[test]
    fn object_type_match_is_case_sensitive() {
        let decision = admit(100, Some("campaign"), Some("create_ad"), 0, false, false);
        assert_eq!(decision, Admission::Skip(SkipReason::ObjectType));
    }

    #[test]
    fn missing_object_type_is_skipped() {
        let decision = admit(100, None, Some("create_ad"), 0, false, false);
        assert_eq!(decision, Admission::Skip(SkipReason::ObjectType));
    }

    #[test]
    fn event_type_outside_allowlist_is_skipped() {
        let decision = admit(100, Some("AD"), Some("ad_account_update_spend_limit"), 0, false, false);
        assert_eq!(decision, Admission::Skip(SkipReason::EventType));
    }

    #[test]
    fn override_admits_unlisted_event_type_on_allowed_object() {
        let decision = admit(100, Some("AD"), Some("ad_account_update_spend_limit"), 0, false, true);
        assert_eq!(decision, Admission::Admit);
    }

    #[test]
    fn missing_event_type_is_skipped_without_override() {
        let decision = admit(100, Some("AD"), None, 0, false, false);
        assert_eq!(decision, Admission::Skip(SkipReason::EventType));
    }

    #[test]
    fn every_allowlisted_event_type_admits_on_campaign() {
        for event_type in ALLOWED_EVENT_TYPES {
            let decision = admit(100, Some("CAMPAIGN"), Some(event_type), 0, false, false);
            assert_eq!(decision, Admission::Admit, "event_type {event_type}");
        }
    }
}
