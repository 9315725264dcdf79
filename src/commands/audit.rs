use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppState;
use crate::domain::models::AuditReport;
use crate::error::{ApiError, AppError, Result};
use crate::service::auditor::AuditTarget;

pub const URL_REQUIRED: &str = "Website URL is required";
pub const INVALID_URL: &str = "Invalid URL format";
const AUDIT_FAILED: &str = "Failed to perform SEO audit. Please try again.";

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub success: bool,
    pub report: AuditReport,
}

/// Trim, default the scheme to https and require a host.
pub fn normalize_url(raw: &str) -> Result<AuditTarget> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidUrl(URL_REQUIRED.into()));
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = url::Url::parse(&candidate).map_err(|_| AppError::InvalidUrl(INVALID_URL.into()))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(AppError::InvalidUrl(INVALID_URL.into()));
    }
    Ok(AuditTarget { website: candidate, url })
}

pub async fn run_audit(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AuditRequest>, JsonRejection>,
) -> std::result::Result<Json<AuditResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let raw = request.url.unwrap_or_default();
    let target = normalize_url(&raw).map_err(|e| ApiError::new(e, AUDIT_FAILED))?;

    tracing::info!("[AUDIT] {} requested for {}", state.auditor.name(), target.website);
    let report = state
        .auditor
        .audit(&target)
        .await
        .map_err(|e| ApiError::new(e, AUDIT_FAILED))?;

    Ok(Json(AuditResponse { success: true, report }))
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed. Use POST with a URL." })),
    )
}
