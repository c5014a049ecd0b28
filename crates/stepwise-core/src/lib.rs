//! Shared vocabulary for the stepwise engines.
//!
//! Every engine in this workspace is a state-transition machine: an operation
//! atomically advances an in-memory structure and hands back an ordered list
//! of [`Step`] records describing what happened. A host (a UI, a CLI, a test)
//! replays the steps at its own pace; the engines themselves never wait,
//! never log, and never panic across their public surface.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`step`]   | [`Step`], [`StepKind`], [`Trace`] |
//! | [`report`] | [`Report`] — tagged outcome + steps, [`SearchOutcome`] |
//! | [`error`]  | [`EngineError`] — the recoverable error taxonomy |

pub mod error;
pub mod report;
pub mod step;

pub use error::EngineError;
pub use report::{Report, SearchOutcome};
pub use step::{Step, StepKind, Trace};

/// Arena index of a node inside an engine.
///
/// Engines store their nodes in a `Vec` arena and address them by index.
/// Slots are never reused within the lifetime of a structure, so the ids a
/// host sees in step highlights stay meaningful across operations. Array
/// engines reuse the same type for element indices.
pub type NodeId = u32;
