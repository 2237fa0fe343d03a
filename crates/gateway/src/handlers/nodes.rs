//! Per-node handlers: lookup, neighbors, paper details

use axum::{
    extract::{Path, State},
    Json,
};
use citegraph_common::{
    errors::{AppError, Result},
    metrics,
    models::Node,
};
use citegraph_search::citation::{
    authors_of, citation_contexts, group_neighbors, neighbors, Direction, Neighbor, Relationship,
};
use serde::Serialize;

use super::NodeSummary;
use crate::AppState;

#[derive(Serialize)]
pub struct NeighborEntry {
    pub node: NodeSummary,
    pub relationship: Relationship,
    pub direction: Direction,
}

#[derive(Serialize)]
pub struct NeighborGroupEntry {
    pub relationship: Relationship,
    pub neighbors: Vec<NeighborEntry>,
}

/// Connected nodes, flat and grouped by relationship
#[derive(Serialize)]
pub struct NeighborsResponse {
    pub node_id: String,
    pub count: usize,
    pub neighbors: Vec<NeighborEntry>,
    pub groups: Vec<NeighborGroupEntry>,
}

#[derive(Serialize)]
pub struct ContextEntry {
    pub paper: NodeSummary,
    pub contexts: Vec<String>,
}

/// Full node record with its authors and incoming citation contexts
#[derive(Serialize)]
pub struct NodeDetailsResponse {
    pub node: Node,
    pub authors: Vec<NodeSummary>,
    pub citation_contexts: Vec<ContextEntry>,
    /// Citation cycles passing through this node
    pub cycle_count: usize,
}

impl From<&Neighbor<'_>> for NeighborEntry {
    fn from(neighbor: &Neighbor<'_>) -> Self {
        Self {
            node: NodeSummary::from(neighbor.node),
            relationship: neighbor.relationship,
            direction: neighbor.direction,
        }
    }
}

/// Get a normalized node
pub async fn get_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> Result<Json<Node>> {
    let snapshot = state.session.current().await?;

    let node = snapshot
        .graph
        .get(&node_id)
        .ok_or_else(|| AppError::NodeNotFound { id: node_id.clone() })?;

    Ok(Json(node.clone()))
}

/// Get nodes connected to a node
pub async fn get_neighbors(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> Result<Json<NeighborsResponse>> {
    let snapshot = state.session.current().await?;

    if !snapshot.graph.contains(&node_id) {
        return Err(AppError::NodeNotFound { id: node_id });
    }

    let found = neighbors(&snapshot.graph, &node_id);
    let groups = group_neighbors(&found)
        .iter()
        .map(|group| NeighborGroupEntry {
            relationship: group.relationship,
            neighbors: group.neighbors.iter().map(NeighborEntry::from).collect(),
        })
        .collect();

    metrics::record_neighbor_lookup(found.len());
    tracing::debug!(node_id = %node_id, count = found.len(), "Neighbors resolved");

    Ok(Json(NeighborsResponse {
        count: found.len(),
        neighbors: found.iter().map(NeighborEntry::from).collect(),
        groups,
        node_id,
    }))
}

/// Get a node with its authors and citation contexts
pub async fn get_node_details(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> Result<Json<NodeDetailsResponse>> {
    let snapshot = state.session.current().await?;
    let graph = &snapshot.graph;

    let node = graph
        .get(&node_id)
        .ok_or_else(|| AppError::NodeNotFound { id: node_id.clone() })?;

    let authors = authors_of(graph, &node_id)
        .into_iter()
        .map(NodeSummary::from)
        .collect();

    let citation_contexts = citation_contexts(graph, &node_id)
        .into_iter()
        .map(|context| ContextEntry {
            paper: NodeSummary::from(context.paper),
            contexts: context.contexts.to_vec(),
        })
        .collect();

    let cycle_count = snapshot.cycles.iter().filter(|c| c.contains(&node_id)).count();

    Ok(Json(NodeDetailsResponse {
        node: node.clone(),
        authors,
        citation_contexts,
        cycle_count,
    }))
}
