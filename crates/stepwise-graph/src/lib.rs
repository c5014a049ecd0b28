//! Stepwise graph engines.
//!
//! A small undirected weighted graph model plus the classic traversals
//! and minimum-spanning-tree builders, each returning a [`Report`] whose
//! steps narrate the visit/relax/select decisions for a host to animate.
//! Node ids double as highlight ids. All iteration orders are pinned
//! (ascending neighbors, insertion-ordered registry), so the same graph
//! always yields the same trace.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`graph`] | [`Graph`], [`GraphNode`], [`Edge`], adjacency and validation |
//! [`disjoint`] | [`DisjointSet`] forest with traced find/union |
//! [`traversal`] | BFS and DFS |
//! [`shortest`] | Dijkstra |
//! [`mst`] | Prim and Kruskal |

pub mod disjoint;
pub mod graph;
pub mod mst;
pub mod shortest;
pub mod traversal;

pub use disjoint::DisjointSet;
pub use graph::{Edge, Graph, GraphNode};
pub use mst::SpanningTree;
pub use shortest::ShortestPath;
pub use stepwise_core::{EngineError, NodeId, Report, Step, StepKind};
pub use traversal::Traversal;
