//! Filter criteria and highlight evaluation
//!
//! Criteria are plain values owned by the caller: build one, evaluate it
//! against a graph, replace it wholesale when the user applies new options,
//! and fall back to `FilterCriteria::default()` on reset.

mod engine;

pub use engine::{evaluate, rank_results, HighlightSet};

use citegraph_common::models::{decode, NodeKind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Node kind restriction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTypeFilter {
    #[default]
    All,
    Paper,
    Author,
}

impl NodeTypeFilter {
    pub fn admits(&self, kind: NodeKind) -> bool {
        match self {
            NodeTypeFilter::All => true,
            NodeTypeFilter::Paper => kind == NodeKind::Paper,
            NodeTypeFilter::Author => kind == NodeKind::Author,
        }
    }
}

/// Highlight criteria. Empty strings, `None` and `false` are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of title, abstract or venue
    #[validate(length(max = 512))]
    pub search_term: String,

    pub node_type: NodeTypeFilter,

    /// Lower bound on paper year; accepts numbers, numeric strings and ""
    #[serde(deserialize_with = "lenient_year")]
    #[validate(range(min = 0, max = 9999))]
    pub min_year: Option<i32>,

    /// Case-insensitive substring of an author's name
    #[validate(length(max = 512))]
    pub author_name: String,

    /// Comma-separated field-of-study substrings, any may match
    #[validate(length(max = 1024))]
    pub fields_of_study: String,

    /// Only open-access papers
    pub is_open_access: bool,
}

impl FilterCriteria {
    /// True when every filter is a no-op
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(decode::year(value.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_empty() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.node_type, NodeTypeFilter::All);
    }

    #[test]
    fn test_wire_format() {
        let criteria: FilterCriteria = serde_json::from_value(json!({
            "searchTerm": "graph",
            "nodeType": "paper",
            "minYear": "2020",
            "fieldsOfStudy": "AI, NLP",
            "isOpenAccess": true
        }))
        .unwrap();

        assert_eq!(criteria.search_term, "graph");
        assert_eq!(criteria.node_type, NodeTypeFilter::Paper);
        assert_eq!(criteria.min_year, Some(2020));
        assert_eq!(criteria.author_name, "");
        assert!(criteria.is_open_access);
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_blank_min_year_is_unset() {
        let criteria: FilterCriteria = serde_json::from_value(json!({"minYear": ""})).unwrap();
        assert_eq!(criteria.min_year, None);

        let criteria: FilterCriteria = serde_json::from_value(json!({"minYear": 1999})).unwrap();
        assert_eq!(criteria.min_year, Some(1999));
    }

    #[test]
    fn test_unknown_node_type_rejected() {
        let result = serde_json::from_value::<FilterCriteria>(json!({"nodeType": "venue"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_limits() {
        let criteria = FilterCriteria {
            search_term: "x".repeat(600),
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
        assert!(FilterCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_node_type_admits() {
        assert!(NodeTypeFilter::All.admits(NodeKind::Unknown));
        assert!(NodeTypeFilter::Paper.admits(NodeKind::Paper));
        assert!(!NodeTypeFilter::Paper.admits(NodeKind::Author));
        assert!(!NodeTypeFilter::Author.admits(NodeKind::Unknown));
    }
}
