//! Umbrella crate for the stepwise algorithm engines.
//!
//! Pulls the tree, hash table, graph, and array engines together behind
//! one [`prelude`], adds the host-side [`playback::Playback`] helper for
//! replaying traces at animation pace, and backs the `tree-trace`,
//! `sort-trace`, and `graph-trace` binaries via [`cli`].

pub mod cli;
pub mod playback;
pub mod prelude;

pub use playback::Playback;
