//! Undirected weighted graph model.
//!
//! Nodes live in an insertion-ordered registry and edges in a flat list;
//! adjacency is derived symmetrically with neighbors sorted ascending by
//! id, so every traversal over the same graph produces the same trace.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stepwise_core::EngineError;

/// One vertex, with a display label for the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: u32,
    pub label: String,
}

/// One undirected edge. `a` and `b` are interchangeable endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    pub weight: i64,
}

impl Edge {
    /// True if this edge joins the same unordered pair.
    pub fn joins(&self, a: u32, b: u32) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: IndexMap<u32, GraphNode>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex labeled with its own id.
    pub fn add_node(&mut self, id: u32) -> Result<(), EngineError> {
        self.add_labeled_node(id, id.to_string())
    }

    pub fn add_labeled_node(
        &mut self,
        id: u32,
        label: impl Into<String>,
    ) -> Result<(), EngineError> {
        if self.nodes.contains_key(&id) {
            return Err(EngineError::InvalidInput(format!(
                "node {id} already exists"
            )));
        }
        self.nodes.insert(
            id,
            GraphNode {
                id,
                label: label.into(),
            },
        );
        Ok(())
    }

    /// Add an undirected edge. Self-loops and repeated pairs are rejected;
    /// negative weights are representable here and rejected by the
    /// weighted algorithms up front.
    pub fn add_edge(&mut self, a: u32, b: u32, weight: i64) -> Result<(), EngineError> {
        if a == b {
            return Err(EngineError::InvalidInput(format!(
                "self-loop on node {a}"
            )));
        }
        if !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return Err(EngineError::InvalidInput(format!(
                "edge {a}-{b} references a missing node"
            )));
        }
        if self.edges.iter().any(|e| e.joins(a, b)) {
            return Err(EngineError::InvalidInput(format!(
                "edge {a}-{b} already exists"
            )));
        }
        self.edges.push(Edge { a, b, weight });
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        self.edges.iter().any(|e| e.joins(a, b))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> Vec<u32> {
        self.nodes.keys().copied().collect()
    }

    pub fn node(&self, id: u32) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Registry position of a node, used to index per-node arrays.
    pub(crate) fn index_of(&self, id: u32) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Neighbors of `id` with edge weights, ascending by neighbor id.
    pub fn neighbors(&self, id: u32) -> Vec<(u32, i64)> {
        let mut out: Vec<(u32, i64)> = self
            .edges
            .iter()
            .filter_map(|e| {
                if e.a == id {
                    Some((e.b, e.weight))
                } else if e.b == id {
                    Some((e.a, e.weight))
                } else {
                    None
                }
            })
            .collect();
        out.sort_unstable_by_key(|&(n, _)| n);
        out
    }

    /// Host-serializable node list in insertion order.
    pub fn snapshot(&self) -> Vec<GraphNode> {
        self.nodes.values().cloned().collect()
    }

    pub(crate) fn require_node(&self, id: u32) -> Result<(), EngineError> {
        if self.has_node(id) {
            Ok(())
        } else {
            Err(EngineError::InvalidInput(format!("no node {id}")))
        }
    }

    pub(crate) fn require_non_negative_weights(&self) -> Result<(), EngineError> {
        if self.edges.iter().any(|e| e.weight < 0) {
            return Err(EngineError::NegativeWeight);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        for (i, e) in self.edges.iter().enumerate() {
            if e.a == e.b {
                return Err(format!("edge {i} is a self-loop on {}", e.a));
            }
            if !self.nodes.contains_key(&e.a) || !self.nodes.contains_key(&e.b) {
                return Err(format!("edge {i} ({}-{}) has a missing endpoint", e.a, e.b));
            }
            if self.edges[..i].iter().any(|prev| prev.joins(e.a, e.b)) {
                return Err(format!("edge {i} repeats the pair {}-{}", e.a, e.b));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_edges() {
        let mut g = Graph::new();
        g.add_node(1).unwrap();
        g.add_node(2).unwrap();

        assert!(matches!(
            g.add_edge(1, 1, 3),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            g.add_edge(1, 9, 3),
            Err(EngineError::InvalidInput(_))
        ));
        g.add_edge(1, 2, 3).unwrap();
        assert!(matches!(
            g.add_edge(2, 1, 5),
            Err(EngineError::InvalidInput(_))
        ));
        assert_eq!(g.edge_count(), 1);
        g.validate().unwrap();
    }

    #[test]
    fn neighbors_are_sorted_and_symmetric() {
        let mut g = Graph::new();
        for id in [5, 3, 9, 1] {
            g.add_node(id).unwrap();
        }
        g.add_edge(5, 9, 1).unwrap();
        g.add_edge(5, 1, 2).unwrap();
        g.add_edge(5, 3, 3).unwrap();

        assert_eq!(g.neighbors(5), vec![(1, 2), (3, 3), (9, 1)]);
        assert_eq!(g.neighbors(9), vec![(5, 1)]);
        assert_eq!(g.node_ids(), vec![5, 3, 9, 1]);
    }

    #[test]
    fn negative_weights_are_representable_but_flagged() {
        let mut g = Graph::new();
        g.add_node(1).unwrap();
        g.add_node(2).unwrap();
        g.add_edge(1, 2, -4).unwrap();
        assert_eq!(
            g.require_non_negative_weights(),
            Err(EngineError::NegativeWeight)
        );
    }
}
