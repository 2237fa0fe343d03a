//! Graph document records
//!
//! `Raw*` types mirror the uploaded JSON; `normalize` turns them into the
//! typed [`Node`] and [`Edge`] records the analysis core works on.

pub mod decode;
pub mod edge;
pub mod node;

pub use decode::ListField;
pub use edge::{Edge, EdgeKind, RawEdge};
pub use node::{Node, NodeKind, RawNode};
