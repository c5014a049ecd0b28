//! One-stop imports for hosts driving the engines.

pub use step_forest::{
    AvlTree, BPlusTree, BTree, BstTree, Color, LevelEntry, MultiwayEntry, RbTree, SplayTree, Trie,
    TrieEntry,
};
pub use stepwise_array::{
    binary_search, bubble_sort, heap_sort, insertion_sort, linear_search, merge_sort, radix_sort,
    selection_sort, HeapEngine, HeapKind, QueueEngine, StackEngine,
};
pub use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, Step, StepKind, Trace};
pub use stepwise_graph::{
    DisjointSet, Edge, Graph, GraphNode, ShortestPath, SpanningTree, Traversal,
};
pub use stepwise_table::{djb2, BucketTable, ChainingTable, Entry, ProbingTable, Slot};

pub use crate::playback::Playback;
