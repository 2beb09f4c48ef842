//! Write-only annotations client for the analytics platform.
//!
//! Exposes the [`AnnotationSink`] trait as the delivery seam: the sync engine
//! awaits one [`AnnotationSink::create_annotation`] call per admitted event,
//! and tests substitute a recording implementation.

mod client;
mod error;

pub use client::AnnotationClient;
pub use error::{AnnotationSinkError, AnnotationSinkResult};

use async_trait::async_trait;
use serde::Serialize;

/// Delivery scope applied to every annotation.
pub const ANNOTATION_SCOPE_ORGANIZATION: &str = "organization";

/// A timestamped, human-readable marker delivered to the analytics platform.
///
/// Constructed once per admitted activity event and sent exactly once; there
/// is no retry or local persistence for failed deliveries.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Annotation {
    /// Human-readable annotation text.
    pub content: String,
    /// Creation timestamp as an RFC 3339 string (the source event's time).
    pub date_created: String,
    /// Delivery scope; always organization-level.
    pub scope: String,
}

impl Annotation {
    /// Build an organization-scoped annotation.
    pub fn organization(content: impl Into<String>, date_created: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            date_created: date_created.into(),
            scope: ANNOTATION_SCOPE_ORGANIZATION.to_string(),
        }
    }
}

/// Trait for annotation delivery backends.
#[async_trait]
pub trait AnnotationSink: Send + Sync {
    /// Deliver a single annotation.
    ///
    /// A non-success response surfaces as an error; callers log it and move
    /// on to the next event.
    async fn create_annotation(&self, annotation: &Annotation) -> AnnotationSinkResult<()>;
}
