//! HTTP surface: JSON handlers and the router that mounts them.

pub mod audit;
pub mod lead;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::service::{Auditor, LeadService};

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub auditor: Arc<dyn Auditor>,
    pub leads: LeadService,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/seo-audit",
            get(audit::method_not_allowed).post(audit::run_audit),
        )
        .route(
            "/api/submit-lead",
            get(lead::method_not_allowed).post(lead::submit_lead),
        )
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
