//! Summary statistics for a loaded graph

use super::{CitationGraph, Cycle};
use citegraph_common::models::NodeKind;
use serde::{Deserialize, Serialize};

/// Counts shown next to the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Distinct node ids
    pub node_count: usize,

    pub edge_count: usize,

    pub paper_count: usize,

    pub author_count: usize,

    /// Number of `cites` edges
    pub citation_count: usize,

    /// Mean of the papers' own `citation_count`, two decimals
    pub avg_citations: f64,

    pub cycle_count: usize,
}

impl GraphStats {
    pub fn compute(graph: &CitationGraph, cycles: &[Cycle]) -> Self {
        let mut papers = 0usize;
        let mut authors = 0usize;
        // Per-paper counts span the full u64 range
        let mut total_citations = 0u128;

        for node in graph.nodes() {
            match node.kind {
                NodeKind::Paper => {
                    papers += 1;
                    total_citations += u128::from(node.citation_count);
                }
                NodeKind::Author => authors += 1,
                NodeKind::Unknown => {}
            }
        }

        let avg_citations = if papers > 0 {
            (total_citations as f64 / papers as f64 * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            paper_count: papers,
            author_count: authors,
            citation_count: graph.edges().iter().filter(|e| e.is_citation()).count(),
            avg_citations,
            cycle_count: cycles.len(),
        }
    }
}
