//! End-to-end sync pass: fetch, filter, format, deliver, advance watermark.

use crate::filter::{admit, Admission};
use crate::format::format_message;
use ads_activity_client::{
    ActivityClient, ActivityClientResult, AdActivity, SyncWindow,
};
use annotation_sink::{Annotation, AnnotationSink};
use annotator_config::Config;
use annotator_state::{StateStore, LAST_SYNC_TIME_KEY};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Trait for fetching one page of activity log entries.
///
/// The production implementation is [`ActivityClient`]; tests substitute a
/// canned fetcher.
#[async_trait]
pub trait ActivityFetcher: Send + Sync {
    /// Fetch the newest-first activity page for an ad account.
    async fn fetch_activities(
        &self,
        ad_account_id: &str,
        access_token: &str,
        window: Option<SyncWindow>,
    ) -> ActivityClientResult<Vec<AdActivity>>;
}

#[async_trait]
impl ActivityFetcher for ActivityClient {
    async fn fetch_activities(
        &self,
        ad_account_id: &str,
        access_token: &str,
        window: Option<SyncWindow>,
    ) -> ActivityClientResult<Vec<AdActivity>> {
        ActivityClient::fetch_activities(self, ad_account_id, access_token, window).await
    }
}

/// Owns one sync pass end to end.
///
/// # Contract
///
/// [`run`](Self::run) never propagates errors: every failure is terminal for
/// the current run (or the current event) and logged. Side effects per run:
/// one durable-state read, at most one durable-state write, one source fetch,
/// zero or more sequential annotation deliveries.
///
/// # Concurrency
///
/// The watermark read-modify-write is not coordinated across overlapping
/// invocations. Two concurrent runs can both read the same watermark and
/// reprocess overlapping events; the last writer's maximum wins. Admission is
/// driven by watermark comparison rather than an offset cursor, so events are
/// reprocessed, never lost.
pub struct SyncOrchestrator {
    config: Config,
    fetcher: Arc<dyn ActivityFetcher>,
    sink: Arc<dyn AnnotationSink>,
    state: Arc<dyn StateStore>,
}

impl SyncOrchestrator {
    /// Create a new orchestrator over injected collaborators.
    pub fn new(
        config: Config,
        fetcher: Arc<dyn ActivityFetcher>,
        sink: Arc<dyn AnnotationSink>,
        state: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
            state,
        }
    }

    /// Execute one sync pass.
    ///
    /// `lookback_days` selects a historical run over an explicit
    /// `[now - days*86400, now]` window; historical runs never mutate the
    /// watermark. `None` selects an incremental run driven by per-event
    /// watermark comparison.
    pub async fn run(&self, lookback_days: Option<u32>) {
        let Some(credentials) = self.config.source_credentials() else {
            warn!("Skipping sync (missing source API credentials)");
            return;
        };

        let watermark = self.read_watermark();
        let historical = lookback_days.is_some();
        let window =
            lookback_days.map(|days| SyncWindow::lookback_days(days, Utc::now().timestamp()));

        let mut events = match self
            .fetcher
            .fetch_activities(&credentials.ad_account_id, &credentials.access_token, window)
            .await
        {
            Ok(events) => events,
            Err(err) => {
                error!(error = %err, "Activity fetch failed, aborting run");
                return;
            }
        };

        // The source returns newest-first; process oldest-to-newest.
        events.reverse();

        info!(
            count = events.len(),
            watermark,
            historical,
            "Processing activity events"
        );

        let mut max_seen = watermark;
        let mut delivered = 0usize;

        for event in &events {
            let Some(event_ts) = event.event_unix_time() else {
                warn!(
                    event_type = event.event_type.as_deref().unwrap_or("<none>"),
                    raw_time = event.event_time.as_deref().unwrap_or("<none>"),
                    "Skipping event with unparseable timestamp"
                );
                continue;
            };

            // Filtered events still push the watermark forward: the source
            // query can keep returning events at or before the boundary, and
            // without this the same page would be refetched forever.
            max_seen = max_seen.max(event_ts);

            match admit(
                event_ts,
                event.object_type.as_deref(),
                event.event_type.as_deref(),
                watermark,
                historical,
                self.config.annotate_all_event_types,
            ) {
                Admission::Admit => {}
                Admission::Skip(reason) => {
                    debug!(
                        ?reason,
                        event_type = event.event_type.as_deref().unwrap_or("<none>"),
                        event_ts,
                        "Event skipped"
                    );
                    continue;
                }
            }

            let extra = event.parsed_extra_data();
            let Some(message) = format_message(event, &extra) else {
                debug!(event_ts, "Event produced no message, skipping");
                continue;
            };
            if message.is_empty() {
                continue;
            }

            // event_unix_time parsed above, so the RFC 3339 form exists too.
            let Some(date_created) = event.event_time_rfc3339() else {
                continue;
            };

            let annotation = Annotation::organization(message, date_created);
            match self.sink.create_annotation(&annotation).await {
                Ok(()) => {
                    delivered += 1;
                    info!(content = %annotation.content, event_ts, "Annotation delivered");
                }
                Err(err) => {
                    // Non-fatal: the remaining events still get attempted.
                    warn!(
                        error = %err,
                        content = %annotation.content,
                        "Annotation delivery failed"
                    );
                }
            }
        }

        if !historical {
            self.write_watermark(watermark, max_seen);
        }

        info!(delivered, max_seen, historical, "Sync pass complete");
    }

    /// Read the stored watermark, defaulting to 0 when absent or malformed.
    fn read_watermark(&self) -> i64 {
        match self.state.get(LAST_SYNC_TIME_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(raw = %raw, "Malformed stored watermark, treating as 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "Watermark read failed, treating as 0");
                0
            }
        }
    }

    /// Persist the advanced watermark after a successful incremental pass.
    fn write_watermark(&self, previous: i64, max_seen: i64) {
        if max_seen <= previous {
            debug!(previous, "Watermark unchanged");
            return;
        }
        if let Err(err) = self
            .state
            .put(LAST_SYNC_TIME_KEY, &max_seen.to_string())
        {
            error!(error = %err, max_seen, "Watermark write failed");
        } else {
            debug!(previous, max_seen, "Watermark advanced");
        }
    }
}

impl std::fmt::Debug for SyncOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncOrchestrator").finish_non_exhaustive()
    }
}
