use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recoverable conditions an engine reports to its host.
///
/// None of these are fatal: the operation that produced one leaves the
/// structure exactly as it found it, and the accompanying trace describes
/// how the condition was reached.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", content = "detail", rename_all = "snake_case")]
pub enum EngineError {
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    #[error("DUPLICATE_KEY")]
    DuplicateKey,

    #[error("NOT_FOUND")]
    NotFound,

    #[error("CAPACITY_EXCEEDED: {0}")]
    CapacityExceeded(String),

    #[error("STRUCTURE_EMPTY")]
    StructureEmpty,

    #[error("DISCONNECTED")]
    Disconnected,

    #[error("NEGATIVE_WEIGHT")]
    NegativeWeight,

    #[error("UNSUPPORTED: {0}")]
    Unsupported(String),
}
