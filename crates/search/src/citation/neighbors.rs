//! Neighbor resolution and per-paper details
//!
//! Answers "what is connected to this node and how" by scanning the edge
//! list. Endpoints that resolve to no known node are skipped.

use super::CitationGraph;
use citegraph_common::models::{Edge, EdgeKind, Node};
use serde::Serialize;

/// How a neighbor relates to the queried node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relationship {
    /// Queried paper cites the neighbor
    #[serde(rename = "cites")]
    Cites,
    /// Neighbor cites the queried paper
    #[serde(rename = "cited by")]
    CitedBy,
    /// Outgoing non-citation edge
    #[serde(rename = "authored by")]
    AuthoredBy,
    /// Incoming non-citation edge
    #[serde(rename = "author of")]
    AuthorOf,
}

impl Relationship {
    /// Display order for grouped listings
    pub const ORDER: [Relationship; 4] = [
        Relationship::Cites,
        Relationship::CitedBy,
        Relationship::AuthoredBy,
        Relationship::AuthorOf,
    ];

    fn for_edge(edge: &Edge, direction: Direction) -> Self {
        match (edge.kind == EdgeKind::Cites, direction) {
            (true, Direction::Outgoing) => Relationship::Cites,
            (true, Direction::Incoming) => Relationship::CitedBy,
            (false, Direction::Outgoing) => Relationship::AuthoredBy,
            (false, Direction::Incoming) => Relationship::AuthorOf,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Relationship::Cites => "cites",
            Relationship::CitedBy => "cited by",
            Relationship::AuthoredBy => "authored by",
            Relationship::AuthorOf => "author of",
        }
    }
}

/// Edge direction relative to the queried node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// A node connected to the queried node
#[derive(Debug, Clone, Serialize)]
pub struct Neighbor<'a> {
    pub node: &'a Node,
    pub relationship: Relationship,
    pub direction: Direction,
}

/// Neighbors sharing one relationship
#[derive(Debug, Clone, Serialize)]
pub struct NeighborGroup<'a> {
    pub relationship: Relationship,
    pub neighbors: Vec<Neighbor<'a>>,
}

/// Citing paper and the sentences in which it cites the queried paper
#[derive(Debug, Clone, Serialize)]
pub struct CitationContext<'a> {
    pub paper: &'a Node,
    pub contexts: &'a [String],
}

/// Connected nodes in edge order
///
/// An edge leaving the node yields its target (`cites` / `authored by`), an
/// edge arriving at it yields its source (`cited by` / `author of`). A
/// self-loop counts once, as outgoing.
pub fn neighbors<'a>(graph: &'a CitationGraph, node_id: &str) -> Vec<Neighbor<'a>> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let (other, direction) = if edge.source == node_id {
                (edge.target.as_str(), Direction::Outgoing)
            } else if edge.target == node_id {
                (edge.source.as_str(), Direction::Incoming)
            } else {
                return None;
            };

            graph.get(other).map(|node| Neighbor {
                node,
                relationship: Relationship::for_edge(edge, direction),
                direction,
            })
        })
        .collect()
}

/// Group neighbors by relationship in [`Relationship::ORDER`], dropping empty groups
pub fn group_neighbors<'a>(neighbors: &[Neighbor<'a>]) -> Vec<NeighborGroup<'a>> {
    Relationship::ORDER
        .iter()
        .filter_map(|&relationship| {
            let members: Vec<Neighbor<'a>> = neighbors
                .iter()
                .filter(|n| n.relationship == relationship)
                .cloned()
                .collect();

            (!members.is_empty()).then_some(NeighborGroup {
                relationship,
                neighbors: members,
            })
        })
        .collect()
}

/// Authors of a paper: sources of `authored` edges targeting it
pub fn authors_of<'a>(graph: &'a CitationGraph, paper_id: &str) -> Vec<&'a Node> {
    if !graph.get(paper_id).is_some_and(Node::is_paper) {
        return Vec::new();
    }

    graph
        .edges()
        .iter()
        .filter(|e| e.kind == EdgeKind::Authored && e.target == paper_id)
        .filter_map(|e| graph.get(&e.source))
        .collect()
}

/// Citation contexts attached to `cites` edges targeting a paper
pub fn citation_contexts<'a>(graph: &'a CitationGraph, paper_id: &str) -> Vec<CitationContext<'a>> {
    if !graph.get(paper_id).is_some_and(Node::is_paper) {
        return Vec::new();
    }

    graph
        .edges()
        .iter()
        .filter(|e| e.is_citation() && e.target == paper_id && !e.contexts.is_empty())
        .filter_map(|e| {
            graph.get(&e.source).map(|paper| CitationContext {
                paper,
                contexts: &e.contexts,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CitationGraph {
        CitationGraph::from_slice(
            br#"{
                "nodes": [
                    {"id": "p1", "type": "paper", "title": "Graph Neural Networks"},
                    {"id": "p2", "type": "paper", "title": "Spectral Methods"},
                    {"id": "p3", "type": "paper", "title": "Message Passing"},
                    {"id": "a1", "type": "author", "name": "Ada"},
                    {"id": "a2", "type": "author", "name": "Grace"}
                ],
                "edges": [
                    {"source": "a1", "target": "p1", "type": "authored"},
                    {"source": "p1", "target": "p2", "type": "cites"},
                    {"source": "a2", "target": "p1", "type": "authored"},
                    {"source": "p3", "target": "p1", "type": "cites", "contexts": "[\"builds on [1]\"]"},
                    {"source": "p2", "target": "p1", "type": "cites"},
                    {"source": "p1", "target": "ghost", "type": "cites"},
                    {"source": "p1", "target": "p1", "type": "cites"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn summary<'a>(found: &'a [Neighbor<'a>]) -> Vec<(&'a str, &'a str, Direction)> {
        found
            .iter()
            .map(|n| (n.node.id.as_str(), n.relationship.label(), n.direction))
            .collect()
    }

    #[test]
    fn test_paper_with_authors_and_citation() {
        let graph = CitationGraph::from_slice(
            br#"{
                "nodes": [
                    {"id": "p1", "type": "paper"},
                    {"id": "p2", "type": "paper"},
                    {"id": "a1", "type": "author"},
                    {"id": "a2", "type": "author"}
                ],
                "edges": [
                    {"source": "a1", "target": "p1", "type": "authored"},
                    {"source": "a2", "target": "p1", "type": "authored"},
                    {"source": "p1", "target": "p2", "type": "cites"}
                ]
            }"#,
        )
        .unwrap();

        let found = neighbors(&graph, "p1");
        assert_eq!(
            summary(&found),
            vec![
                ("a1", "author of", Direction::Incoming),
                ("a2", "author of", Direction::Incoming),
                ("p2", "cites", Direction::Outgoing),
            ]
        );
    }

    #[test]
    fn test_edge_order_dangling_and_self_loop() {
        let graph = sample();
        let found = neighbors(&graph, "p1");
        assert_eq!(
            summary(&found),
            vec![
                ("a1", "author of", Direction::Incoming),
                ("p2", "cites", Direction::Outgoing),
                ("a2", "author of", Direction::Incoming),
                ("p3", "cited by", Direction::Incoming),
                ("p2", "cited by", Direction::Incoming),
                ("p1", "cites", Direction::Outgoing),
            ]
        );
    }

    #[test]
    fn test_author_perspective() {
        let graph = sample();
        let found = neighbors(&graph, "a1");
        assert_eq!(summary(&found), vec![("p1", "authored by", Direction::Outgoing)]);
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        assert!(neighbors(&sample(), "nope").is_empty());
    }

    #[test]
    fn test_grouping_order() {
        let graph = sample();
        let groups = group_neighbors(&neighbors(&graph, "p1"));
        let layout: Vec<(Relationship, usize)> = groups
            .iter()
            .map(|g| (g.relationship, g.neighbors.len()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (Relationship::Cites, 2),
                (Relationship::CitedBy, 2),
                (Relationship::AuthorOf, 2),
            ]
        );
    }

    #[test]
    fn test_relationship_serializes_as_label() {
        let json = serde_json::to_string(&Relationship::CitedBy).unwrap();
        assert_eq!(json, "\"cited by\"");
    }

    #[test]
    fn test_authors_and_contexts() {
        let graph = sample();

        let authors: Vec<&str> = authors_of(&graph, "p1").iter().map(|n| n.label.as_str()).collect();
        assert_eq!(authors, vec!["Ada", "Grace"]);

        let contexts = citation_contexts(&graph, "p1");
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].paper.id, "p3");
        assert_eq!(contexts[0].contexts, ["builds on [1]".to_string()]);

        assert!(authors_of(&graph, "a1").is_empty());
        assert!(citation_contexts(&graph, "a1").is_empty());
    }
}
