//! Audit entry point used by the HTTP layer.
//!
//! The `Auditor` trait is the seam between the handlers and the pipeline, so
//! API tests can swap in a stub without any network access.

mod seo;

pub use seo::SeoAuditor;

use async_trait::async_trait;
use url::Url;

use crate::domain::models::AuditReport;
use crate::error::Result;

/// A page to audit: the normalized address echoed back in the report and its
/// parsed form used for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTarget {
    /// Trimmed input with the scheme defaulted to https (`https://example.com`).
    pub website: String,
    pub url: Url,
}

#[async_trait]
pub trait Auditor: Send + Sync {
    /// Run a full audit of an already-normalized target.
    async fn audit(&self, target: &AuditTarget) -> Result<AuditReport>;

    /// Human-readable name for this auditor.
    fn name(&self) -> &'static str;
}
