//! Highlight evaluation and result ranking

use super::FilterCriteria;
use crate::citation::CitationGraph;
use citegraph_common::models::{Node, NodeKind};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Node ids matching a filter, kept in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl HighlightSet {
    fn insert(&mut self, id: &str) {
        if self.members.insert(id.to_string()) {
            self.ordered.push(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Ids in document order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }
}

impl Serialize for HighlightSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.ordered.serialize(serializer)
    }
}

/// Lower-cased criteria, computed once per evaluation
struct Prepared<'c> {
    criteria: &'c FilterCriteria,
    search_term: String,
    author_name: String,
    field_terms: Vec<String>,
}

impl<'c> Prepared<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        let field_terms = if criteria.fields_of_study.is_empty() {
            Vec::new()
        } else {
            criteria
                .fields_of_study
                .to_lowercase()
                .split(',')
                .map(|term| term.trim().to_string())
                .collect()
        };

        Self {
            criteria,
            search_term: criteria.search_term.to_lowercase(),
            author_name: criteria.author_name.to_lowercase(),
            field_terms,
        }
    }

    /// Filters run in a fixed order and stop at the first failure. An author
    /// whose name matches `authorName` is accepted without the later checks.
    fn matches(&self, node: &Node) -> bool {
        let criteria = self.criteria;
        let is_paper = node.kind == NodeKind::Paper;

        if !criteria.node_type.admits(node.kind) {
            return false;
        }

        if let (Some(min_year), true) = (criteria.min_year, is_paper) {
            if node.year.map_or(true, |year| year < min_year) {
                return false;
            }
        }

        if criteria.is_open_access && is_paper && !node.is_open_access {
            return false;
        }

        if let (false, true, Some(fields)) =
            (self.field_terms.is_empty(), is_paper, node.fields_of_study.as_ref())
        {
            let any_field = fields.iter().any(|field| {
                let field = field.to_lowercase();
                self.field_terms.iter().any(|term| field.contains(term.as_str()))
            });
            if !any_field {
                return false;
            }
        }

        if !self.author_name.is_empty() {
            match node.kind {
                NodeKind::Author => {
                    let name = node.name.as_deref().unwrap_or_default().to_lowercase();
                    return name.contains(&self.author_name);
                }
                NodeKind::Paper => {
                    let any_author = node
                        .authors
                        .iter()
                        .any(|author| author.to_lowercase().contains(&self.author_name));
                    if !any_author {
                        return false;
                    }
                }
                NodeKind::Unknown => {}
            }
        }

        if !self.search_term.is_empty() {
            let term = self.search_term.as_str();
            let hit = [node.search_title(), node.abstract_text.as_deref(), node.venue.as_deref()]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Evaluate criteria against every node; default criteria select all nodes
pub fn evaluate(graph: &CitationGraph, criteria: &FilterCriteria) -> HighlightSet {
    let prepared = Prepared::new(criteria);
    let mut highlighted = HighlightSet::default();

    for node in graph.nodes() {
        if prepared.matches(node) {
            highlighted.insert(&node.id);
        }
    }

    tracing::debug!(
        matched = highlighted.len(),
        total = graph.node_count(),
        "Filter evaluated"
    );
    highlighted
}

fn kind_rank(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Paper => 0,
        NodeKind::Author => 1,
        NodeKind::Unknown => 2,
    }
}

fn result_order(a: &Node, b: &Node) -> Ordering {
    kind_rank(a.kind)
        .cmp(&kind_rank(b.kind))
        .then_with(|| match a.kind {
            // Newest first, undated papers last
            NodeKind::Paper => match (a.year, b.year) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            NodeKind::Author => {
                let x = a.name.as_deref().unwrap_or_default().to_lowercase();
                let y = b.name.as_deref().unwrap_or_default().to_lowercase();
                x.cmp(&y)
            }
            NodeKind::Unknown => Ordering::Equal,
        })
}

/// Nodes for a result listing: highlighted nodes, or every node when nothing
/// is highlighted. Papers come first (newest first), then authors by name,
/// then everything else; ties keep document order.
pub fn rank_results<'a>(graph: &'a CitationGraph, highlighted: &HighlightSet) -> Vec<&'a Node> {
    let mut results: Vec<&Node> = graph
        .unique_nodes()
        .filter(|node| highlighted.is_empty() || highlighted.contains(&node.id))
        .collect();

    results.sort_by(|a, b| result_order(a, b));
    results
}
