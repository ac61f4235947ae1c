//! Directed call graph with degree bookkeeping
//!
//! Uses `petgraph::StableGraph` so node and edge indices stay valid when a
//! node is removed. On top of it the graph keeps:
//!
//! - a key → index map, so every function name maps to exactly one node
//! - a (from, to) → edge map, so a repeated call is a no-op instead of a
//!   second edge
//! - the order in which edges were first collected, which is the tie-break
//!   for the degree ordering applied before rendering
//!
//! Degree counters always equal the number of distinct edges touching a node.

use std::collections::HashMap;

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use crate::error::{Error, Result};

/// A function identity in the call graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Function name (e.g., "handleRequest")
    pub key: String,
    /// Number of distinct callers
    pub in_degree: usize,
    /// Number of distinct callees
    pub out_degree: usize,
}

impl Node {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            in_degree: 0,
            out_degree: 0,
        }
    }
}

/// A borrowed view of one `caller → callee` edge
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'g> {
    pub from: &'g Node,
    pub to: &'g Node,
}

impl<'g> EdgeRef<'g> {
    /// The (caller, callee) identity of this edge
    pub fn key(&self) -> (&'g str, &'g str) {
        (self.from.key.as_str(), self.to.key.as_str())
    }
}

/// The call graph for one analysis run
#[derive(Debug, Default)]
pub struct Graph {
    /// The underlying stable graph (private to keep the indexes in sync)
    inner: StableGraph<Node, ()>,
    node_index: HashMap<String, NodeIndex>,
    edge_index: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    /// Edges in first-collected order
    order: Vec<EdgeIndex>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new node with zero degrees
    ///
    /// Returns `Error::DuplicateNode` if the key is already present; use
    /// [`Graph::contains_node`] first when unsure.
    pub fn add_node(&mut self, key: &str) -> Result<NodeIndex> {
        if self.node_index.contains_key(key) {
            return Err(Error::DuplicateNode(key.to_string()));
        }
        Ok(self.insert_node(key))
    }

    /// Add a `from → to` edge, creating missing endpoints on the fly
    ///
    /// Returns `true` when a new edge was created and `false` when the edge
    /// already existed. Degrees only change in the first case.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let from_idx = self.lookup_or_insert(from);
        let to_idx = self.lookup_or_insert(to);

        if self.edge_index.contains_key(&(from_idx, to_idx)) {
            return false;
        }

        let edge = self.inner.add_edge(from_idx, to_idx, ());
        self.edge_index.insert((from_idx, to_idx), edge);
        self.order.push(edge);
        self.inner[from_idx].out_degree += 1;
        self.inner[to_idx].in_degree += 1;
        true
    }

    /// Remove a node and every edge touching it
    ///
    /// The edge order is rebuilt from the surviving edges and degree counters
    /// are recomputed from that set, so they stay exact for the remaining
    /// nodes. Returns the removed node, or `None` if the key was unknown.
    pub fn remove_node(&mut self, key: &str) -> Option<Node> {
        let idx = self.node_index.remove(key)?;
        let removed = self.inner.remove_node(idx)?;

        self.edge_index.retain(|&(from, to), _| from != idx && to != idx);
        let surviving: Vec<EdgeIndex> = self
            .order
            .iter()
            .copied()
            .filter(|&edge| self.inner.edge_endpoints(edge).is_some())
            .collect();
        self.order = surviving;
        self.recompute_degrees();

        Some(removed)
    }

    /// Look up a node by key
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.node_index.get(key).map(|&idx| &self.inner[idx])
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.node_index.contains_key(key)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index.get(from), self.node_index.get(to)) {
            (Some(&f), Some(&t)) => self.edge_index.contains_key(&(f, t)),
            _ => false,
        }
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.order.len()
    }

    /// Iterate over all nodes in index order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.node_weights()
    }

    /// Iterate over all edges in the order they were first collected
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> + '_ {
        self.order.iter().filter_map(move |&edge| {
            let (from, to) = self.inner.edge_endpoints(edge)?;
            Some(EdgeRef {
                from: &self.inner[from],
                to: &self.inner[to],
            })
        })
    }

    fn lookup_or_insert(&mut self, key: &str) -> NodeIndex {
        match self.node_index.get(key) {
            Some(&idx) => idx,
            None => self.insert_node(key),
        }
    }

    fn insert_node(&mut self, key: &str) -> NodeIndex {
        let idx = self.inner.add_node(Node::new(key));
        self.node_index.insert(key.to_string(), idx);
        idx
    }

    fn recompute_degrees(&mut self) {
        for node in self.inner.node_weights_mut() {
            node.in_degree = 0;
            node.out_degree = 0;
        }
        let endpoints: Vec<(NodeIndex, NodeIndex)> = self
            .order
            .iter()
            .filter_map(|&edge| self.inner.edge_endpoints(edge))
            .collect();
        for (from, to) in endpoints {
            self.inner[from].out_degree += 1;
            self.inner[to].in_degree += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Degrees must match a fresh count over the edge list
    fn assert_degrees_consistent(graph: &Graph) {
        for node in graph.nodes() {
            let ins = graph.edges().filter(|e| e.to.key == node.key).count();
            let outs = graph.edges().filter(|e| e.from.key == node.key).count();
            assert_eq!(node.in_degree, ins, "in_degree of {}", node.key);
            assert_eq!(node.out_degree, outs, "out_degree of {}", node.key);
        }
    }

    #[test]
    fn test_new_graph_is_empty() {
        let graph = Graph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edges().count(), 0);
    }

    #[test]
    fn test_add_node_rejects_duplicates() {
        let mut graph = Graph::new();
        graph.add_node("main").unwrap();

        let err = graph.add_node("main").unwrap_err();
        assert!(matches!(err, Error::DuplicateNode(ref key) if key == "main"));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_missing_nodes() {
        let mut graph = Graph::new();
        assert!(graph.add_edge("main", "Println"));

        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains_node("main"));
        assert!(graph.contains_node("Println"));
        assert!(graph.contains_edge("main", "Println"));
        assert!(!graph.contains_edge("Println", "main"));
    }

    #[test]
    fn test_repeated_edge_counts_once() {
        let mut graph = Graph::new();
        assert!(graph.add_edge("a", "b"));
        for _ in 0..5 {
            assert!(!graph.add_edge("a", "b"));
        }

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node("a").unwrap().out_degree, 1);
        assert_eq!(graph.node("b").unwrap().in_degree, 1);
        assert_eq!(graph.node("a").unwrap().in_degree, 0);
    }

    #[test]
    fn test_add_edge_after_explicit_add_node() {
        let mut graph = Graph::new();
        graph.add_node("a").unwrap();
        graph.add_edge("a", "b");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("a").unwrap().out_degree, 1);
    }

    #[test]
    fn test_self_loop_counts_both_directions() {
        let mut graph = Graph::new();
        graph.add_edge("walk", "walk");
        graph.add_edge("walk", "walk");

        let node = graph.node("walk").unwrap();
        assert_eq!(node.in_degree, 1);
        assert_eq!(node.out_degree, 1);
        assert_degrees_consistent(&graph);
    }

    #[test]
    fn test_edges_keep_collection_order() {
        let mut graph = Graph::new();
        graph.add_edge("c", "a");
        graph.add_edge("a", "b");
        graph.add_edge("c", "a");
        graph.add_edge("b", "c");

        let keys: Vec<_> = graph.edges().map(|e| e.key()).collect();
        assert_eq!(keys, vec![("c", "a"), ("a", "b"), ("b", "c")]);
    }

    #[test]
    fn test_degrees_consistent_after_many_edges() {
        let mut graph = Graph::new();
        let calls = [
            ("main", "parse"),
            ("main", "render"),
            ("parse", "lex"),
            ("render", "lex"),
            ("main", "parse"),
            ("lex", "lex"),
            ("render", "write"),
        ];
        for (from, to) in calls {
            graph.add_edge(from, to);
        }

        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.node("lex").unwrap().in_degree, 3);
        assert_degrees_consistent(&graph);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("c", "d");

        let removed = graph.remove_node("c").unwrap();
        assert_eq!(removed.key, "c");

        assert!(!graph.contains_node("c"));
        assert_eq!(graph.node_count(), 3);
        let keys: Vec<_> = graph.edges().map(|e| e.key()).collect();
        assert_eq!(keys, vec![("a", "b")]);

        assert_eq!(graph.node("a").unwrap().out_degree, 1);
        assert_eq!(graph.node("b").unwrap().out_degree, 0);
        assert_eq!(graph.node("d").unwrap().in_degree, 0);
        assert_degrees_consistent(&graph);
    }

    #[test]
    fn test_remove_unknown_node_is_noop() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");

        assert!(graph.remove_node("zzz").is_none());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_node_can_be_readded_after_removal() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.remove_node("b");

        assert!(graph.add_edge("a", "b"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node("a").unwrap().out_degree, 1);
        assert_eq!(graph.node("b").unwrap().in_degree, 1);
        assert_degrees_consistent(&graph);
    }
}
