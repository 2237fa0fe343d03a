//! Citation cycle detection
//!
//! Depth-first search over `cites` edges. A node that has been fully explored
//! is never entered again, so each cycle is reported at most once per closing
//! back-edge and the run stays linear in nodes plus edges. Graphs where several
//! cycles share nodes can report fewer cycles than the number of simple cycles.

use super::CitationGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A closed citation path `[n0, n1, ..., nk, n0]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(Vec<String>);

impl Cycle {
    /// Node ids along the cycle, the first id repeated at the end
    pub fn path(&self) -> &[String] {
        &self.0
    }

    /// Number of citation edges in the cycle
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|n| n == id)
    }

    /// Consecutive `(citing, cited)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.windows(2).map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// One entry on the explicit DFS stack
struct Frame<'a> {
    node: &'a str,
    next_successor: usize,
}

/// Find citation cycles. Traversal follows node order, then edge order, so the
/// result is stable for a given document.
pub fn find_cycles(graph: &CitationGraph) -> Vec<Cycle> {
    // Adjacency restricted to `cites` edges leaving known nodes
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::with_capacity(graph.node_count());
    for node in graph.nodes() {
        adjacency.entry(node.id.as_str()).or_default();
    }
    for edge in graph.edges().iter().filter(|e| e.is_citation()) {
        if let Some(successors) = adjacency.get_mut(edge.source.as_str()) {
            successors.push(edge.target.as_str());
        }
    }

    let mut cycles = Vec::new();
    let mut visited: HashSet<&str> = HashSet::with_capacity(adjacency.len());
    let mut on_stack: HashSet<&str> = HashSet::new();
    // The frame stack doubles as the current DFS path
    let mut stack: Vec<Frame> = Vec::new();

    for root in graph.nodes().iter().map(|n| n.id.as_str()) {
        if !visited.insert(root) {
            continue;
        }
        on_stack.insert(root);
        stack.push(Frame { node: root, next_successor: 0 });

        while let Some(frame) = stack.last_mut() {
            let successor = adjacency
                .get(frame.node)
                .and_then(|successors| successors.get(frame.next_successor))
                .copied();

            let Some(successor) = successor else {
                on_stack.remove(frame.node);
                stack.pop();
                continue;
            };
            frame.next_successor += 1;

            if on_stack.contains(successor) {
                let start = stack
                    .iter()
                    .rposition(|f| f.node == successor)
                    .unwrap_or(0);
                let mut path: Vec<String> = stack[start..].iter().map(|f| f.node.to_string()).collect();
                path.push(successor.to_string());
                cycles.push(Cycle(path));
            } else if visited.insert(successor) {
                on_stack.insert(successor);
                stack.push(Frame { node: successor, next_successor: 0 });
            }
        }
    }

    tracing::debug!(cycles = cycles.len(), "Cycle detection finished");
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use citegraph_common::models::{Edge, EdgeKind, Node, RawNode};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn node(id: &str) -> Node {
        RawNode {
            id: Some(id.into()),
            kind: Some("paper".into()),
            ..Default::default()
        }
        .normalize(0)
        .unwrap()
    }

    fn edge(source: &str, target: &str, kind: EdgeKind) -> Edge {
        Edge {
            source: source.into(),
            target: target.into(),
            kind,
            is_influential: false,
            contexts: Vec::new(),
        }
    }

    fn graph(ids: &[&str], cites: &[(&str, &str)]) -> CitationGraph {
        CitationGraph::from_parts(
            ids.iter().map(|id| node(id)).collect(),
            cites.iter().map(|(s, t)| edge(s, t, EdgeKind::Cites)).collect(),
        )
    }

    fn paths(cycles: &[Cycle]) -> Vec<Vec<&str>> {
        cycles
            .iter()
            .map(|c| c.path().iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_no_citations_no_cycles() {
        let g = CitationGraph::from_parts(
            vec![node("a"), node("p")],
            vec![edge("a", "p", EdgeKind::Authored), edge("p", "a", EdgeKind::Authored)],
        );
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_two_cycle() {
        let g = graph(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let cycles = find_cycles(&g);
        assert_eq!(paths(&cycles), vec![vec!["A", "B", "A"]]);
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn test_start_follows_node_order() {
        let g = graph(&["B", "A"], &[("A", "B"), ("B", "A")]);
        assert_eq!(paths(&find_cycles(&g)), vec![vec!["B", "A", "B"]]);
    }

    #[test]
    fn test_self_citation() {
        let g = graph(&["A"], &[("A", "A")]);
        let cycles = find_cycles(&g);
        assert_eq!(paths(&cycles), vec![vec!["A", "A"]]);
        assert_eq!(cycles[0].edges().collect::<Vec<_>>(), vec![("A", "A")]);
    }

    #[test]
    fn test_cycle_suffix_of_path() {
        // R -> A -> B -> C -> A: the cycle excludes the R prefix
        let g = graph(&["R", "A", "B", "C"], &[("R", "A"), ("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(paths(&find_cycles(&g)), vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn test_visited_pruning_is_lower_bound() {
        // Three back-edges inside one DFS tree, three cycles
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "B"), ("C", "D"), ("D", "A")],
        );
        let cycles = find_cycles(&g);
        let found = paths(&cycles);
        assert_eq!(
            found,
            vec![vec!["A", "B", "A"], vec!["B", "C", "B"], vec!["A", "B", "C", "D", "A"]]
        );

        // Reaching an already finished node never reports through it again
        let g = graph(&["A", "B", "X"], &[("A", "B"), ("B", "A"), ("X", "A")]);
        assert_eq!(paths(&find_cycles(&g)), vec![vec!["A", "B", "A"]]);

        // A -> C -> A is a simple cycle, but C is finished before A's second edge
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("A", "C"), ("B", "C"), ("C", "A")]);
        assert_eq!(paths(&find_cycles(&g)), vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn test_dangling_targets_ignored() {
        let g = graph(&["A"], &[("A", "ghost"), ("ghost", "A")]);
        assert!(find_cycles(&g).is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let ids: Vec<String> = (0..100_000).map(|i| format!("p{}", i)).collect();
        let nodes = ids.iter().map(|id| node(id)).collect();
        let mut edges: Vec<Edge> = ids
            .windows(2)
            .map(|w| edge(&w[0], &w[1], EdgeKind::Cites))
            .collect();
        edges.push(edge("p99999", "p0", EdgeKind::Cites));

        let cycles = find_cycles(&CitationGraph::from_parts(nodes, edges));
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 100_000);
    }

    #[test]
    fn test_random_graphs_are_deterministic_and_valid() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let n = rng.gen_range(1..30);
            let ids: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
            let edges: Vec<Edge> = (0..rng.gen_range(0..n * 3))
                .map(|_| {
                    let s = &ids[rng.gen_range(0..n)];
                    let t = &ids[rng.gen_range(0..n)];
                    edge(s, t, EdgeKind::Cites)
                })
                .collect();
            let g = CitationGraph::from_parts(ids.iter().map(|id| node(id)).collect(), edges);

            let first = find_cycles(&g);
            assert_eq!(first, find_cycles(&g));

            for cycle in &first {
                assert_eq!(cycle.path().first(), cycle.path().last());
                assert!(cycle.path().len() >= 2);
                for (citing, cited) in cycle.edges() {
                    assert!(g
                        .edges()
                        .iter()
                        .any(|e| e.is_citation() && e.source == citing && e.target == cited));
                }
            }
        }
    }
}
