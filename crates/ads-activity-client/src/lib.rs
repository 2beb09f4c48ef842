//! Read-only Marketing API client for the ad account activity log.
//!
//! Wraps `GET <base>/<api_version>/<ad_account_id>/activities` and
//! deserializes the newest-first `data` array into [`AdActivity`] records.

mod client;
mod error;
mod types;

pub use client::{ActivityClient, ACTIVITY_FIELDS, ACTIVITY_PAGE_SIZE};
pub use error::{ActivityClientError, ActivityClientResult};
pub use types::{AdActivity, SyncWindow};
