//! Citation graph representation
//!
//! Provides the in-memory graph built from an uploaded document

use citegraph_common::errors::{AppError, Result};
use citegraph_common::models::{Edge, Node, RawEdge, RawNode};
use serde_json::Value;
use std::collections::HashMap;

/// In-memory citation graph, immutable once built
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    /// Nodes in document order, duplicates included
    nodes: Vec<Node>,

    /// Edges in document order
    edges: Vec<Edge>,

    /// Node id -> position in `nodes`; the last record with an id wins
    index: HashMap<String, usize>,
}

impl CitationGraph {
    /// Build from already-normalized records
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id.clone(), position))
            .collect();

        Self { nodes, edges, index }
    }

    /// Parse and normalize a raw JSON document
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| AppError::parse(format!("document is not valid JSON: {}", e)))?;

        Self::from_value(document)
    }

    /// Normalize a parsed document with top-level `nodes` and `edges` arrays
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(mut document) = document else {
            return Err(AppError::parse("document must be a JSON object"));
        };

        let Some(Value::Array(raw_nodes)) = document.remove("nodes") else {
            return Err(AppError::parse("document has no `nodes` array"));
        };
        let Some(Value::Array(raw_edges)) = document.remove("edges") else {
            return Err(AppError::parse("document has no `edges` array"));
        };

        let nodes = raw_nodes
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                serde_json::from_value::<RawNode>(value)
                    .map_err(|e| AppError::parse(format!("node at index {} is malformed: {}", position, e)))?
                    .normalize(position)
            })
            .collect::<Result<Vec<_>>>()?;

        let edges = raw_edges
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                serde_json::from_value::<RawEdge>(value)
                    .map_err(|e| AppError::parse(format!("edge at index {} is malformed: {}", position, e)))?
                    .normalize(position)
            })
            .collect::<Result<Vec<_>>>()?;

        let graph = Self::from_parts(nodes, edges);

        if graph.index.len() < graph.nodes.len() {
            tracing::debug!(
                duplicates = graph.nodes.len() - graph.index.len(),
                "Duplicate node ids, later records win"
            );
        }

        Ok(graph)
    }

    /// Look up a node by id
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All node records in document order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node records that win the id lookup, in document order
    pub fn unique_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(position, node)| self.index.get(node.id.as_str()) == Some(position))
            .map(|(_, node)| node)
    }

    /// All edges in document order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get node count (distinct ids)
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
