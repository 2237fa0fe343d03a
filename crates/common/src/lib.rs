//! CiteGraph Common Library
//!
//! Shared code for the CiteGraph crates including:
//! - Graph document records and lenient field decoding
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use models::{Edge, EdgeKind, Node, NodeKind};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
