//! Graph loading and whole-graph analysis handlers

use axum::{
    body::Bytes,
    extract::{rejection::{BytesRejection, JsonRejection}, State},
    http::StatusCode,
    Json,
};
use citegraph_common::{
    errors::{AppError, Result},
    metrics,
};
use citegraph_search::{
    filter::{evaluate, rank_results},
    Cycle, FilterCriteria, GraphStats, SnapshotSummary,
};
use serde::Serialize;
use std::time::Instant;
use validator::Validate;

use super::NodeSummary;
use crate::AppState;

/// Cycle listing
#[derive(Serialize)]
pub struct CyclesResponse {
    pub count: usize,
    pub cycles: Vec<Cycle>,
}

/// Filter evaluation result
#[derive(Serialize)]
pub struct FilterResponse {
    /// Criteria as applied, after defaults
    pub criteria: FilterCriteria,
    /// Matching node ids in document order
    pub highlighted: Vec<String>,
    pub total_nodes: usize,
    /// Listing order for result panels
    pub results: Vec<NodeSummary>,
    /// Nothing matched, so `results` lists every node
    pub showing_all: bool,
}

/// Load a graph document, replacing the current graph
pub async fn load_graph(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SnapshotSummary>)> {
    let limit = state.config.graph.max_document_bytes;

    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            metrics::record_graph_load_failure("too_large");
            AppError::PayloadTooLarge { limit }
        } else {
            AppError::Validation {
                message: rejection.body_text(),
                field: None,
            }
        }
    })?;

    let snapshot = state.session.load(body.to_vec()).await?;

    Ok((StatusCode::CREATED, Json(snapshot.summary())))
}

/// Summary of the current graph
pub async fn get_graph(State(state): State<AppState>) -> Result<Json<SnapshotSummary>> {
    let snapshot = state.session.current().await?;
    Ok(Json(snapshot.summary()))
}

/// Counts for the current graph
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<GraphStats>> {
    let snapshot = state.session.current().await?;
    Ok(Json(snapshot.stats.clone()))
}

/// Citation cycles found at load time
pub async fn get_cycles(State(state): State<AppState>) -> Result<Json<CyclesResponse>> {
    let snapshot = state.session.current().await?;
    Ok(Json(CyclesResponse {
        count: snapshot.cycles.len(),
        cycles: snapshot.cycles.clone(),
    }))
}

/// Evaluate filter criteria against the current graph
pub async fn filter_graph(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FilterCriteria>, JsonRejection>,
) -> Result<Json<FilterResponse>> {
    let Json(criteria) = payload.map_err(|rejection| AppError::Validation {
        message: rejection.body_text(),
        field: None,
    })?;

    criteria.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let snapshot = state.session.current().await?;
    let start = Instant::now();

    let highlighted = evaluate(&snapshot.graph, &criteria);
    let results = rank_results(&snapshot.graph, &highlighted)
        .into_iter()
        .map(NodeSummary::from)
        .collect();

    metrics::record_filter(start.elapsed().as_secs_f64(), highlighted.len());

    Ok(Json(FilterResponse {
        showing_all: highlighted.is_empty(),
        criteria,
        highlighted: highlighted.iter().map(str::to_string).collect(),
        total_nodes: snapshot.graph.node_count(),
        results,
    }))
}
