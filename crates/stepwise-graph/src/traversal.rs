//! Breadth-first and depth-first traversal.
//!
//! Neighbor order is ascending by id everywhere. The DFS keeps an
//! explicit stack and pushes neighbors reversed, so its visitation
//! matches what left-to-right recursion would produce.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, Report, StepKind, Trace};

use crate::graph::Graph;

/// Result of a traversal: the visitation order and, when a target was
/// given and reached, its distance in levels (BFS) or its discovery
/// position (DFS).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traversal {
    pub order: Vec<u32>,
    pub distance: Option<usize>,
}

impl Graph {
    /// Breadth-first traversal from `start`. With a target, stops the
    /// moment the target is dequeued; exhausting the queue first means
    /// the target is unreachable.
    pub fn bfs(&self, start: u32, target: Option<u32>) -> Report<Traversal> {
        let mut trace = Trace::new();
        if let Err(e) = self.require_node(start) {
            return Report::err(e, trace);
        }
        if let Some(t) = target {
            if let Err(e) = self.require_node(t) {
                return Report::err(e, trace);
            }
        }

        let mut order = Vec::new();
        let mut seen = vec![start];
        let mut queue = VecDeque::new();
        queue.push_back((start, 0usize));

        while let Some((node, level)) = queue.pop_front() {
            order.push(node);
            trace.add(
                StepKind::Visit,
                format!("visiting {node} at level {level}"),
                vec![node],
            );
            if target == Some(node) {
                trace.add(
                    StepKind::Found,
                    format!("reached {node} after {level} levels"),
                    vec![node],
                );
                return Report::ok(
                    Traversal {
                        order,
                        distance: Some(level),
                    },
                    trace,
                );
            }
            for (n, _) in self.neighbors(node) {
                if !seen.contains(&n) {
                    seen.push(n);
                    queue.push_back((n, level + 1));
                    trace.add(
                        StepKind::Info,
                        format!("queueing {n} for level {}", level + 1),
                        vec![n],
                    );
                }
            }
        }

        match target {
            Some(t) => {
                trace.add(
                    StepKind::NotFound,
                    format!("the queue is empty and {t} was never reached"),
                    vec![t],
                );
                Report::err(EngineError::Disconnected, trace)
            }
            None => Report::ok(
                Traversal {
                    order,
                    distance: None,
                },
                trace,
            ),
        }
    }

    /// Depth-first traversal from `start` with an explicit stack.
    pub fn dfs(&self, start: u32, target: Option<u32>) -> Report<Traversal> {
        let mut trace = Trace::new();
        if let Err(e) = self.require_node(start) {
            return Report::err(e, trace);
        }
        if let Some(t) = target {
            if let Err(e) = self.require_node(t) {
                return Report::err(e, trace);
            }
        }

        let mut order = Vec::new();
        let mut seen: Vec<u32> = Vec::new();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if seen.contains(&node) {
                continue;
            }
            seen.push(node);
            order.push(node);
            trace.add(StepKind::Visit, format!("visiting {node}"), vec![node]);
            if target == Some(node) {
                trace.add(
                    StepKind::Found,
                    format!("reached {node} as visit number {}", order.len()),
                    vec![node],
                );
                return Report::ok(
                    Traversal {
                        distance: Some(order.len() - 1),
                        order,
                    },
                    trace,
                );
            }
            // reversed push so the smallest neighbor pops first
            for (n, _) in self.neighbors(node).into_iter().rev() {
                if !seen.contains(&n) {
                    stack.push(n);
                }
            }
        }

        match target {
            Some(t) => {
                trace.add(
                    StepKind::NotFound,
                    format!("the stack is empty and {t} was never reached"),
                    vec![t],
                );
                Report::err(EngineError::Disconnected, trace)
            }
            None => Report::ok(
                Traversal {
                    order,
                    distance: None,
                },
                trace,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // 1 at the top, 2/3 in the middle, 4 at the bottom
        let mut g = Graph::new();
        for id in 1..=4 {
            g.add_node(id).unwrap();
        }
        g.add_edge(1, 2, 1).unwrap();
        g.add_edge(1, 3, 1).unwrap();
        g.add_edge(2, 4, 1).unwrap();
        g.add_edge(3, 4, 1).unwrap();
        g
    }

    #[test]
    fn bfs_visits_by_level() {
        let g = diamond();
        let t = g.bfs(1, None).expect_ok("start exists");
        assert_eq!(t.order, vec![1, 2, 3, 4]);
        assert_eq!(t.distance, None);
    }

    #[test]
    fn bfs_distance_counts_levels() {
        let g = diamond();
        let t = g.bfs(1, Some(4)).expect_ok("target reachable");
        assert_eq!(t.distance, Some(2));
        assert_eq!(t.order.last(), Some(&4));
    }

    #[test]
    fn dfs_goes_deep_before_wide() {
        let g = diamond();
        let t = g.dfs(1, None).expect_ok("start exists");
        assert_eq!(t.order, vec![1, 2, 4, 3]);
    }

    #[test]
    fn unreachable_target_is_disconnected() {
        let mut g = diamond();
        g.add_node(9).unwrap();
        assert_eq!(g.bfs(1, Some(9)).error(), Some(&EngineError::Disconnected));
        assert_eq!(g.dfs(1, Some(9)).error(), Some(&EngineError::Disconnected));
        // the failed search still walked the whole component
        let report = g.bfs(1, Some(9));
        let visits = report
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .count();
        assert_eq!(visits, 4);
    }

    #[test]
    fn missing_start_is_invalid_input() {
        let g = diamond();
        assert!(matches!(
            g.bfs(99, None).error(),
            Some(EngineError::InvalidInput(_))
        ));
    }
}
