//! Health endpoints.
//!
//! `GET /health` is a bare liveness probe for load balancers; `GET /api/health`
//! reports version, uptime and the active OCR provider.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ocr_provider: String,
    pub uptime_seconds: u64,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /health`
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    let now = Utc::now();
    let uptime = (now - state.started_at).num_seconds().max(0) as u64;

    Json(HealthReport {
        status: "ok",
        service: "nutrilens",
        version: env!("CARGO_PKG_VERSION"),
        ocr_provider: state.ocr.name().to_string(),
        uptime_seconds: uptime,
        timestamp: now,
    })
}
