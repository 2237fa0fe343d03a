//! API handlers module

pub mod graph;
pub mod health;
pub mod nodes;

use citegraph_common::models::{Node, NodeKind};
use serde::Serialize;

/// Compact node listing entry shared by result, neighbor and detail responses
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            label: node.label.clone(),
            year: node.year,
            citation_count: node.is_paper().then_some(node.citation_count),
            affiliations: node.affiliations.clone(),
        }
    }
}
