use serde::{Deserialize, Serialize};

use crate::{EngineError, NodeId, Step, Trace};

/// Tagged result of one engine operation: the outcome plus its step trace.
///
/// This is the only way conditions cross the core's public boundary —
/// engines never panic for host input. A failed outcome still carries the
/// full trace, so a host can show *how* a duplicate or a miss was
/// discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report<T> {
    pub outcome: Result<T, EngineError>,
    pub steps: Vec<Step>,
}

impl<T> Report<T> {
    pub fn ok(value: T, trace: Trace) -> Self {
        Self {
            outcome: Ok(value),
            steps: trace.into_steps(),
        }
    }

    pub fn err(error: EngineError, trace: Trace) -> Self {
        Self {
            outcome: Err(error),
            steps: trace.into_steps(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The successful value, if any.
    pub fn value(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    /// The error, if any.
    pub fn error(&self) -> Option<&EngineError> {
        self.outcome.as_ref().err()
    }

    /// Unwrap the successful value; for tests and demos, not for hosts.
    #[track_caller]
    pub fn expect_ok(self, context: &str) -> T {
        match self.outcome {
            Ok(value) => value,
            Err(e) => panic!("{context}: {e}"),
        }
    }
}

/// Outcome of a `search` on any keyed engine.
///
/// A miss is a successful outcome with `found == false` — the probe path is
/// still meaningful to a host. (Deletion of an absent key, by contrast, is
/// reported as [`EngineError::NotFound`].)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub found: bool,
    /// Ids of the nodes visited on the way, in visit order.
    pub path: Vec<NodeId>,
}

impl SearchOutcome {
    pub fn hit(path: Vec<NodeId>) -> Self {
        Self { found: true, path }
    }

    pub fn miss(path: Vec<NodeId>) -> Self {
        Self { found: false, path }
    }
}
