//! CiteGraph analysis core
//!
//! Pure, synchronous analysis over an immutable citation graph:
//! - Graph construction from an uploaded JSON document
//! - Citation cycle detection
//! - Multi-criteria filtering into a highlight set
//! - Neighbor resolution, per-paper details and summary statistics

pub mod citation;
pub mod filter;
pub mod snapshot;

pub use citation::{CitationGraph, Cycle, GraphStats};
pub use filter::{evaluate, FilterCriteria, HighlightSet, NodeTypeFilter};
pub use snapshot::{GraphSnapshot, SnapshotSummary};
