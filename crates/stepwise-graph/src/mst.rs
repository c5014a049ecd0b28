//! Minimum spanning trees: Prim's and Kruskal's.
//!
//! Both validate weights up front and report `Disconnected` when no
//! spanning tree exists. On the same graph they select edge sets of
//! identical total weight (the sets themselves may differ when weights
//! tie).

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, Report, StepKind, Trace};

use crate::disjoint::DisjointSet;
use crate::graph::{Edge, Graph};

/// Selected tree edges in acceptance order, plus their weight sum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub edges: Vec<Edge>,
    pub total: i64,
}

impl Graph {
    /// Prim's algorithm: grow one tree from `start`, always taking the
    /// cheapest edge that leaves it.
    pub fn prim(&self, start: u32) -> Report<SpanningTree> {
        let mut trace = Trace::new();
        if let Err(e) = self
            .require_node(start)
            .and_then(|_| self.require_non_negative_weights())
        {
            return Report::err(e, trace);
        }

        let ids = self.node_ids();
        let n = ids.len();
        // per-node cheapest connection to the growing tree
        let mut key = vec![i64::MAX; n];
        let mut parent: Vec<Option<u32>> = vec![None; n];
        let mut included = vec![false; n];
        let start_idx = self.index_of(start).expect("start was checked above");
        key[start_idx] = 0;

        let mut edges = Vec::new();
        let mut total = 0;
        for _ in 0..n {
            // cheapest un-included node; insertion order breaks ties
            let mut u = None;
            for i in 0..n {
                if !included[i] && u.map_or(true, |best: usize| key[i] < key[best]) {
                    u = Some(i);
                }
            }
            let u = u.expect("loop runs once per node");
            if key[u] == i64::MAX {
                trace.add(
                    StepKind::NotFound,
                    format!("{} cannot be reached from {start}", ids[u]),
                    vec![ids[u]],
                );
                return Report::err(EngineError::Disconnected, trace);
            }
            included[u] = true;

            match parent[u] {
                None => {
                    trace.add(
                        StepKind::Visit,
                        format!("starting the tree at {start}"),
                        vec![start],
                    );
                }
                Some(p) => {
                    total += key[u];
                    edges.push(Edge {
                        a: p,
                        b: ids[u],
                        weight: key[u],
                    });
                    trace.add(
                        StepKind::SelectEdge,
                        format!("adding {p}-{} (weight {})", ids[u], key[u]),
                        vec![p, ids[u]],
                    );
                }
            }

            for (v, w) in self.neighbors(ids[u]) {
                let vi = self.index_of(v).expect("edges only join known nodes");
                if !included[vi] && w < key[vi] {
                    key[vi] = w;
                    parent[vi] = Some(ids[u]);
                    trace.add(
                        StepKind::Relax,
                        format!("{v} now connects for {w} via {}", ids[u]),
                        vec![v],
                    );
                }
            }
        }

        trace.add(
            StepKind::Found,
            format!("spanning tree complete with total weight {total}"),
            vec![],
        );
        Report::ok(SpanningTree { edges, total }, trace)
    }

    /// Kruskal's algorithm: edges ascending by weight, a disjoint-set
    /// cycle test per edge.
    pub fn kruskal(&self) -> Report<SpanningTree> {
        let mut trace = Trace::new();
        if let Err(e) = self.require_non_negative_weights() {
            return Report::err(e, trace);
        }

        let n = self.node_count();
        if n == 0 {
            return Report::ok(
                SpanningTree {
                    edges: Vec::new(),
                    total: 0,
                },
                trace,
            );
        }

        let mut sorted: Vec<&Edge> = self.edges().iter().collect();
        sorted.sort_by_key(|e| (e.weight, e.a, e.b));

        let mut ds = DisjointSet::new(n);
        let mut edges = Vec::new();
        let mut total = 0;
        for e in sorted {
            if edges.len() == n - 1 {
                break;
            }
            let ai = self.index_of(e.a).expect("edges only join known nodes");
            let bi = self.index_of(e.b).expect("edges only join known nodes");
            if ds.merge(ai, bi) {
                total += e.weight;
                edges.push(e.clone());
                trace.add(
                    StepKind::SelectEdge,
                    format!(
                        "taking {}-{} (weight {}): it joins two components",
                        e.a, e.b, e.weight
                    ),
                    vec![e.a, e.b],
                );
            } else {
                trace.add(
                    StepKind::RejectEdge,
                    format!(
                        "skipping {}-{} (weight {}): it would close a cycle",
                        e.a, e.b, e.weight
                    ),
                    vec![e.a, e.b],
                );
            }
        }

        if edges.len() < n - 1 {
            trace.add(
                StepKind::NotFound,
                format!(
                    "only {} of the {} edges a spanning tree needs were found",
                    edges.len(),
                    n - 1
                ),
                vec![],
            );
            return Report::err(EngineError::Disconnected, trace);
        }
        trace.add(
            StepKind::Found,
            format!("spanning tree complete with total weight {total}"),
            vec![],
        );
        Report::ok(SpanningTree { edges, total }, trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_diagonal() -> Graph {
        let mut g = Graph::new();
        for id in 1..=4 {
            g.add_node(id).unwrap();
        }
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 3, 2).unwrap();
        g.add_edge(3, 4, 3).unwrap();
        g.add_edge(4, 1, 4).unwrap();
        g.add_edge(1, 3, 5).unwrap();
        g
    }

    #[test]
    fn prim_and_kruskal_agree_on_total() {
        let g = square_with_diagonal();
        let k = g.kruskal().expect_ok("connected graph");
        assert_eq!(k.total, 6);
        assert_eq!(k.edges.len(), 3);
        for start in 1..=4 {
            let p = g.prim(start).expect_ok("connected graph");
            assert_eq!(p.total, 6, "wrong total from start {start}");
            assert_eq!(p.edges.len(), 3);
        }
    }

    #[test]
    fn kruskal_rejects_cycle_closers() {
        // the cheap 1-3 diagonal closes a cycle before the tree is done
        let mut g = Graph::new();
        for id in 1..=4 {
            g.add_node(id).unwrap();
        }
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(2, 3, 2).unwrap();
        g.add_edge(1, 3, 3).unwrap();
        g.add_edge(3, 4, 4).unwrap();
        g.add_edge(4, 1, 5).unwrap();

        let report = g.kruskal();
        let rejected: Vec<_> = report
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::RejectEdge)
            .collect();
        assert_eq!(rejected.len(), 1);
        let tree = report.expect_ok("connected graph");
        assert_eq!(tree.total, 7);
        assert!(!tree.edges.iter().any(|e| e.joins(1, 3)));
    }

    #[test]
    fn disconnected_graph_has_no_spanning_tree() {
        let mut g = square_with_diagonal();
        g.add_node(9).unwrap();
        assert_eq!(g.kruskal().error(), Some(&EngineError::Disconnected));
        assert_eq!(g.prim(1).error(), Some(&EngineError::Disconnected));
    }

    #[test]
    fn single_node_tree_is_empty() {
        let mut g = Graph::new();
        g.add_node(7).unwrap();
        let k = g.kruskal().expect_ok("trivially spanning");
        assert_eq!((k.edges.len(), k.total), (0, 0));
        let p = g.prim(7).expect_ok("trivially spanning");
        assert_eq!((p.edges.len(), p.total), (0, 0));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut g = square_with_diagonal();
        g.add_edge(2, 4, -2).unwrap();
        assert_eq!(g.kruskal().error(), Some(&EngineError::NegativeWeight));
        assert_eq!(g.prim(1).error(), Some(&EngineError::NegativeWeight));
    }
}
