//! Edge records: citation and authorship relationships

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decode::{self, lenient_text, ListField};
use crate::errors::{AppError, Result};

/// Relationship carried by an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeKind {
    /// Source paper cites target paper
    Cites,
    /// Source author wrote target paper
    Authored,
    /// Any other label, kept verbatim
    Other(String),
}

impl EdgeKind {
    pub fn as_str(&self) -> &str {
        match self {
            EdgeKind::Cites => "cites",
            EdgeKind::Authored => "authored",
            EdgeKind::Other(label) => label,
        }
    }
}

impl From<String> for EdgeKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "cites" => EdgeKind::Cites,
            "authored" => EdgeKind::Authored,
            _ => EdgeKind::Other(label),
        }
    }
}

impl From<EdgeKind> for String {
    fn from(kind: EdgeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Edge entry exactly as it appears in the `edges` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEdge {
    #[serde(default)]
    pub source: Option<Value>,

    #[serde(default)]
    pub target: Option<Value>,

    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,

    #[serde(default)]
    pub is_influential: Option<Value>,

    #[serde(default)]
    pub contexts: Option<ListField>,
}

/// A directed, typed edge. Endpoints need not exist in the node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,

    pub target: String,

    #[serde(rename = "type")]
    pub kind: EdgeKind,

    /// Only meaningful on `cites` edges
    #[serde(default)]
    pub is_influential: bool,

    /// Citing sentences, only meaningful on `cites` edges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,
}

impl Edge {
    pub fn is_citation(&self) -> bool {
        self.kind == EdgeKind::Cites
    }
}

impl RawEdge {
    /// Normalize into an [`Edge`]. `position` is only used in error messages.
    pub fn normalize(self, position: usize) -> Result<Edge> {
        let endpoint = |value: &Option<Value>, field: &str| {
            value
                .as_ref()
                .and_then(decode::identifier)
                .ok_or_else(|| AppError::parse(format!("edge at index {} has no usable `{}`", position, field)))
        };

        let source = endpoint(&self.source, "source")?;
        let target = endpoint(&self.target, "target")?;

        Ok(Edge {
            source,
            target,
            kind: EdgeKind::from(self.kind.unwrap_or_default()),
            is_influential: decode::flag(self.is_influential.as_ref()),
            contexts: decode::decode_strings(self.contexts),
        })
    }
}
