//! Watermark-based sync engine turning ad activity events into annotations.
//!
//! ## Overview
//!
//! One [`SyncOrchestrator::run`] invocation performs a single pass:
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Activity Log │────▶│ SyncOrchestrator  │────▶│  Annotations │
//! │ (one fetch)  │     │ filter → format   │     │  (per event) │
//! └──────────────┘     └─────────┬─────────┘     └──────────────┘
//!                                │
//!                        ┌───────▼────────┐
//!                        │   StateStore   │
//!                        │  (watermark)   │
//!                        └────────────────┘
//! ```
//!
//! - **Incremental runs** admit only events newer than the stored watermark
//!   and advance it to the newest event time seen, filtered events included.
//! - **Historical runs** carry an explicit lookback window and never touch
//!   the watermark.
//!
//! Failures never propagate to the invoker: credential gaps and fetch errors
//! end the run, per-event parse and delivery failures are logged and skipped.

mod filter;
mod format;
mod orchestrator;

pub use filter::{admit, Admission, SkipReason, ALLOWED_EVENT_TYPES, ALLOWED_OBJECT_TYPES};
pub use format::{display_object_type, format_message};
pub use orchestrator::{ActivityFetcher, SyncOrchestrator};
