//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub graph: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: citegraph_common::VERSION.to_string(),
    })
}

/// Readiness probe - reports whether a graph is loaded
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let graph_check = match state.session.current().await {
        Ok(snapshot) => CheckResult {
            status: "loaded".to_string(),
            fingerprint: Some(snapshot.fingerprint.clone()),
        },
        Err(_) => CheckResult {
            status: "empty".to_string(),
            fingerprint: None,
        },
    };

    let ready = graph_check.status == "loaded";

    Json(ReadyResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            graph: graph_check,
        },
    })
}
