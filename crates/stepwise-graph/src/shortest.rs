//! Dijkstra's shortest path over the non-negative weighted graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, Report, StepKind, Trace};

use crate::graph::Graph;

/// Min-heap entry; `Ord` is reversed so `BinaryHeap` pops the smallest
/// tentative distance, with the node id as a deterministic tie-break.
#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: i64,
    node: u32,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A reconstructed shortest path and its total weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPath {
    pub path: Vec<u32>,
    pub total: i64,
}

impl Graph {
    /// Shortest path from `start` to `target` by tentative-distance
    /// extraction and edge relaxation. Negative weights are rejected up
    /// front; an unreachable target is `Disconnected`.
    pub fn dijkstra(&self, start: u32, target: u32) -> Report<ShortestPath> {
        let mut trace = Trace::new();
        if let Err(e) = self
            .require_node(start)
            .and_then(|_| self.require_node(target))
            .and_then(|_| self.require_non_negative_weights())
        {
            return Report::err(e, trace);
        }

        let mut dist: HashMap<u32, i64> = HashMap::new();
        let mut pred: HashMap<u32, u32> = HashMap::new();
        let mut heap = BinaryHeap::new();

        dist.insert(start, 0);
        heap.push(State {
            cost: 0,
            node: start,
        });

        while let Some(State { cost, node }) = heap.pop() {
            // lazy deletion: an entry beaten by a later relaxation is stale
            if cost > dist[&node] {
                continue;
            }
            trace.add(
                StepKind::Visit,
                format!("settling {node} at distance {cost}"),
                vec![node],
            );
            if node == target {
                let mut path = vec![target];
                let mut curr = target;
                while let Some(&p) = pred.get(&curr) {
                    path.push(p);
                    curr = p;
                }
                path.reverse();
                trace.add(
                    StepKind::Found,
                    format!(
                        "shortest path {} has total weight {cost}",
                        fmt_path(&path)
                    ),
                    path.clone(),
                );
                return Report::ok(ShortestPath { path, total: cost }, trace);
            }

            for (next, weight) in self.neighbors(node) {
                let candidate = cost + weight;
                let current = dist.get(&next).copied();
                trace.add(
                    StepKind::Compare,
                    match current {
                        Some(d) => format!(
                            "checking {node}-{next}: {cost} + {weight} against {d}"
                        ),
                        None => format!(
                            "checking {node}-{next}: first distance for {next}"
                        ),
                    },
                    vec![node, next],
                );
                if current.map_or(true, |d| candidate < d) {
                    dist.insert(next, candidate);
                    pred.insert(next, node);
                    heap.push(State {
                        cost: candidate,
                        node: next,
                    });
                    trace.add(
                        StepKind::Relax,
                        format!("relaxing {next} to distance {candidate} via {node}"),
                        vec![next],
                    );
                }
            }
        }

        trace.add(
            StepKind::NotFound,
            format!("the frontier is exhausted and {target} was never settled"),
            vec![target],
        );
        Report::err(EngineError::Disconnected, trace)
    }
}

fn fmt_path(path: &[u32]) -> String {
    path.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
