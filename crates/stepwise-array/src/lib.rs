//! Stepwise array engines.
//!
//! Sorting, searching, and the linear structures (stack, queue, binary
//! heap), each narrating its work as a list of steps whose highlight
//! ids are array indices. Sorting and searching are pure functions from
//! a slice to a [`Report`]; the linear structures are small engines a
//! host mutates call by call.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`sort`] | Bubble, selection, insertion, merge, heap, and radix sort |
//! [`search`] | Linear and binary search |
//! [`stack`] | LIFO [`StackEngine`] |
//! [`queue`] | FIFO [`QueueEngine`] |
//! [`heap`] | Binary [`HeapEngine`], min or max |

pub mod heap;
pub mod queue;
pub mod search;
pub mod sort;
pub mod stack;

pub use heap::{HeapEngine, HeapKind};
pub use queue::QueueEngine;
pub use search::{binary_search, linear_search};
pub use sort::{bubble_sort, heap_sort, insertion_sort, merge_sort, radix_sort, selection_sort};
pub use stack::StackEngine;
pub use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, Step, StepKind};
