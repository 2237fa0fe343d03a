//! Node records: papers and authors

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decode::{self, lenient_text, ListField};
use crate::errors::{AppError, Result};

/// Kind of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Paper,
    Author,
    #[default]
    Unknown,
}

impl NodeKind {
    /// Parse the document's `type` field; unrecognised kinds are `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label {
            "paper" => NodeKind::Paper,
            "author" => NodeKind::Author,
            _ => NodeKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Paper => "paper",
            NodeKind::Author => "author",
            NodeKind::Unknown => "unknown",
        }
    }
}

/// Node entry exactly as it appears in the `nodes` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(default, rename = "abstract", deserialize_with = "lenient_text")]
    pub abstract_text: Option<String>,

    #[serde(default)]
    pub year: Option<Value>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub venue: Option<String>,

    #[serde(default)]
    pub citation_count: Option<Value>,

    #[serde(default)]
    pub reference_count: Option<Value>,

    #[serde(default)]
    pub is_open_access: Option<Value>,

    #[serde(default)]
    pub fields_of_study: Option<ListField>,

    #[serde(default)]
    pub authors: Option<ListField>,

    #[serde(default)]
    pub affiliations: Option<ListField>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

/// A normalized paper, author, or unknown node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, non-empty identifier
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// `title`, else `name`, else the identifier
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    #[serde(default)]
    pub citation_count: u64,

    #[serde(default)]
    pub reference_count: u64,

    #[serde(default)]
    pub is_open_access: bool,

    /// `None` when the record carried no field list at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_of_study: Option<Vec<String>>,

    /// Author names carried on the paper record itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Node {
    pub fn is_paper(&self) -> bool {
        self.kind == NodeKind::Paper
    }

    pub fn is_author(&self) -> bool {
        self.kind == NodeKind::Author
    }

    /// Title used for text search: `title`, else `name`
    pub fn search_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }
}

impl RawNode {
    /// Normalize into a [`Node`]. `position` is only used in error messages.
    pub fn normalize(self, position: usize) -> Result<Node> {
        let id = self
            .id
            .as_ref()
            .and_then(decode::identifier)
            .ok_or_else(|| AppError::parse(format!("node at index {} has no usable `id`", position)))?;

        let kind = self
            .kind
            .as_deref()
            .map(NodeKind::from_label)
            .unwrap_or_default();

        let label = self
            .title
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| id.clone());

        Ok(Node {
            kind,
            label,
            year: decode::year(self.year.as_ref()),
            citation_count: decode::count(self.citation_count.as_ref()),
            reference_count: decode::count(self.reference_count.as_ref()),
            is_open_access: decode::flag(self.is_open_access.as_ref()),
            fields_of_study: decode::decode_present_strings(self.fields_of_study),
            authors: decode::decode_names(self.authors),
            affiliations: decode::decode_strings(self.affiliations),
            title: self.title,
            name: self.name,
            abstract_text: self.abstract_text,
            venue: self.venue,
            url: self.url,
            id,
        })
    }
}
