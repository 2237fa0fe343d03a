//! Citation graph analysis
//!
//! Builds the in-memory graph and answers structural questions about it:
//! cycles, neighbors, per-paper details and summary counts

mod cycles;
mod graph;
mod neighbors;
mod stats;

pub use cycles::{find_cycles, Cycle};
pub use graph::CitationGraph;
pub use neighbors::{
    authors_of, citation_contexts, group_neighbors, neighbors, CitationContext, Direction, Neighbor,
    NeighborGroup, Relationship,
};
pub use stats::GraphStats;
