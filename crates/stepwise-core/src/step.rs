use serde::{Deserialize, Serialize};

use crate::NodeId;

/// Category of a single observable step.
///
/// Kinds are shared across engines so a host can style them uniformly
/// (e.g. every `Compare` blinks, every `Rotate` animates an arc) without
/// parsing descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Key/element comparison during a descent, probe, or scan.
    Compare,
    /// Node or slot visited without comparison (traversal order, probes).
    Visit,
    /// New node/entry placed into the structure.
    Insert,
    /// Node/entry removed from the structure.
    Remove,
    /// Existing entry's value replaced in place.
    Update,
    /// Tree rotation (single or double, named in the description).
    Rotate,
    /// Red-Black recoloring.
    Recolor,
    /// Multiway node split.
    Split,
    /// Key promoted into a parent during a split.
    Promote,
    /// Structural link established (leaf chain, child attach).
    Link,
    /// Hash slot probe.
    Probe,
    /// Tombstone written or crossed.
    Tombstone,
    /// Two elements exchanged.
    Swap,
    /// Merge of two sorted runs.
    Merge,
    /// Radix digit bucket placement.
    Bucket,
    /// Dijkstra/Prim edge relaxation.
    Relax,
    /// MST edge accepted.
    SelectEdge,
    /// MST edge rejected (would close a cycle).
    RejectEdge,
    /// Target located.
    Found,
    /// Search/probe exhausted without a match.
    NotFound,
    /// Anything else worth narrating.
    Info,
}

/// One host-observable step of an operation.
///
/// `highlights` carries the arena ids (or array indices) the host should
/// emphasize while showing this step. Steps are plain data; nothing in the
/// core retains them after the operation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub description: String,
    pub highlights: Vec<NodeId>,
}

impl Step {
    pub fn new(kind: StepKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            highlights: Vec::new(),
        }
    }

    pub fn with(kind: StepKind, description: impl Into<String>, highlights: Vec<NodeId>) -> Self {
        Self {
            kind,
            description: description.into(),
            highlights,
        }
    }
}

/// Ordered recorder of [`Step`]s produced by one operation.
///
/// Engines push into a `Trace` as they work and hand the finished list to
/// the host inside a [`crate::Report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Record a step in one call.
    pub fn add(&mut self, kind: StepKind, description: impl Into<String>, highlights: Vec<NodeId>) {
        self.steps.push(Step::with(kind, description, highlights));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl IntoIterator for Trace {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
