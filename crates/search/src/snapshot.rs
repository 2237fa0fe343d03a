//! Loaded graph snapshot
//!
//! One successful load produces one immutable snapshot: the graph plus every
//! analysis that depends only on the graph. A new load builds a fresh snapshot
//! and replaces the old one wholesale.

use crate::citation::{find_cycles, CitationGraph, Cycle, GraphStats};
use chrono::{DateTime, Utc};
use citegraph_common::errors::Result;
use citegraph_common::metrics;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Instant;

/// A graph together with its cycles and statistics
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    pub graph: CitationGraph,

    pub cycles: Vec<Cycle>,

    pub stats: GraphStats,

    /// SHA-256 of the document bytes, hex encoded
    pub fingerprint: String,

    pub loaded_at: DateTime<Utc>,
}

/// What a client needs to know about a snapshot without the full graph
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub stats: GraphStats,
}

impl GraphSnapshot {
    /// Parse, normalize and analyse a raw document
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let start = Instant::now();

        let graph = match CitationGraph::from_slice(bytes) {
            Ok(graph) => graph,
            Err(e) => {
                metrics::record_graph_load_failure("parse");
                return Err(e);
            }
        };

        let snapshot = Self::from_graph(graph, fingerprint(bytes));

        metrics::record_graph_load(
            start.elapsed().as_secs_f64(),
            snapshot.stats.node_count,
            snapshot.stats.edge_count,
            snapshot.stats.cycle_count,
        );

        tracing::info!(
            fingerprint = %snapshot.fingerprint,
            nodes = snapshot.stats.node_count,
            edges = snapshot.stats.edge_count,
            cycles = snapshot.stats.cycle_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Graph loaded"
        );

        Ok(snapshot)
    }

    /// Analyse an already-built graph
    pub fn from_graph(graph: CitationGraph, fingerprint: String) -> Self {
        let cycles = find_cycles(&graph);
        let stats = GraphStats::compute(&graph, &cycles);

        Self {
            graph,
            cycles,
            stats,
            fingerprint,
            loaded_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            fingerprint: self.fingerprint.clone(),
            loaded_at: self.loaded_at,
            stats: self.stats.clone(),
        }
    }
}

/// Hex SHA-256 of a document
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
