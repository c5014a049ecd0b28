//! Arena-based stepwise tree engines.
//!
//! Every engine keeps its nodes in a `Vec` arena and wires them together
//! with `Option<u32>` indices instead of raw pointers, so node ids stay
//! stable for the lifetime of the structure and a host can key its
//! visuals off them. Mutating operations return a [`Report`]: the
//! outcome plus the ordered list of observable steps (comparisons,
//! rotations, recolorings, splits) that produced it.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`links`] | Shared child/parent link traits, rotations, in-order walks |
//! [`bst`] | Plain binary search tree |
//! [`avl`] | Height-balanced AVL tree |
//! [`red_black`] | Red-Black tree |
//! [`splay`] | Self-adjusting splay tree |
//! [`multiway`] | Shared multiway node shape and validators |
//! [`btree`] | B-Tree of configurable order |
//! [`bplus`] | B+-Tree with a forward leaf chain |
//! [`trie`] | Lowercase `a-z` trie |

pub mod avl;
pub mod bplus;
pub mod bst;
pub mod btree;
pub mod links;
pub mod multiway;
pub mod red_black;
pub mod splay;
pub mod trie;

pub use avl::AvlTree;
pub use bplus::BPlusTree;
pub use bst::BstTree;
pub use btree::BTree;
pub use links::LevelEntry;
pub use multiway::MultiwayEntry;
pub use red_black::{Color, RbTree};
pub use splay::SplayTree;
pub use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, Step, StepKind};
pub use trie::{Trie, TrieEntry};
