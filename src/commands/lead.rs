use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppState;
use crate::domain::models::{AuditReport, LeadData};
use crate::error::ApiError;

const SUBMIT_FAILED: &str = "Failed to submit lead. Please try again.";

#[derive(Debug, Deserialize)]
pub struct SubmitLeadRequest {
    pub lead: LeadData,
    pub report: AuditReport,
}

#[derive(Debug, Serialize)]
pub struct SubmitLeadResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitLeadRequest>, JsonRejection>,
) -> Result<Json<SubmitLeadResponse>, ApiError> {
    let Json(SubmitLeadRequest { lead, report }) =
        payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state
        .leads
        .submit(&lead, &report)
        .await
        .map_err(|e| ApiError::new(e, SUBMIT_FAILED))?;

    Ok(Json(SubmitLeadResponse {
        success: true,
        message: "Lead submitted successfully",
    }))
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed. Use POST to submit lead data." })),
    )
}
