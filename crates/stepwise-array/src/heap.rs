//! Array-backed binary heap, min or max at construction.

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

/// Ordering discipline of a [`HeapEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeapKind {
    Min,
    Max,
}

impl HeapKind {
    fn label(self) -> &'static str {
        match self {
            HeapKind::Min => "minimum",
            HeapKind::Max => "maximum",
        }
    }
}

/// Binary heap over integers. The backing array is the level-order
/// layout, so highlight ids double as tree positions for the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapEngine {
    kind: HeapKind,
    items: Vec<i64>,
}

impl HeapEngine {
    pub fn new(kind: HeapKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// True if `a` belongs above `b`.
    fn outranks(&self, a: i64, b: i64) -> bool {
        match self.kind {
            HeapKind::Min => a < b,
            HeapKind::Max => a > b,
        }
    }

    /// Place `value` at the first free slot and sift it up; returns its
    /// final index.
    pub fn insert(&mut self, value: i64) -> Report<usize> {
        let mut trace = Trace::new();
        let mut i = self.items.len();
        self.items.push(value);
        trace.add(
            StepKind::Insert,
            format!("placing {value} at the first free slot, index {i}"),
            vec![i as NodeId],
        );
        while i > 0 {
            let parent = (i - 1) / 2;
            trace.add(
                StepKind::Compare,
                format!(
                    "comparing {} with its parent {}",
                    self.items[i], self.items[parent]
                ),
                vec![i as NodeId, parent as NodeId],
            );
            if !self.outranks(self.items[i], self.items[parent]) {
                break;
            }
            self.items.swap(i, parent);
            trace.add(
                StepKind::Swap,
                format!(
                    "sifting {} up above {}",
                    self.items[parent], self.items[i]
                ),
                vec![i as NodeId, parent as NodeId],
            );
            i = parent;
        }
        Report::ok(i, trace)
    }

    /// Remove and return the root.
    pub fn extract(&mut self) -> Report<i64> {
        let mut trace = Trace::new();
        if self.items.is_empty() {
            trace.add(StepKind::Info, "the heap is empty", vec![]);
            return Report::err(EngineError::StructureEmpty, trace);
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let value = self.items.pop().expect("length checked above");
        trace.add(
            StepKind::Remove,
            format!("extracting the {} {value}", self.kind.label()),
            vec![0],
        );
        if !self.items.is_empty() {
            trace.add(
                StepKind::Swap,
                format!("moving the last element {} up to the root", self.items[0]),
                vec![0, last as NodeId],
            );
            self.sift_down(&mut trace);
        }
        Report::ok(value, trace)
    }

    fn sift_down(&mut self, trace: &mut Trace) {
        let mut i = 0;
        loop {
            let left = 2 * i + 1;
            if left >= self.items.len() {
                return;
            }
            let mut child = left;
            let right = left + 1;
            if right < self.items.len() {
                trace.add(
                    StepKind::Compare,
                    format!(
                        "picking between the children {} and {}",
                        self.items[left], self.items[right]
                    ),
                    vec![left as NodeId, right as NodeId],
                );
                if self.outranks(self.items[right], self.items[left]) {
                    child = right;
                }
            }
            trace.add(
                StepKind::Compare,
                format!(
                    "comparing {} with its child {}",
                    self.items[i], self.items[child]
                ),
                vec![i as NodeId, child as NodeId],
            );
            if !self.outranks(self.items[child], self.items[i]) {
                return;
            }
            self.items.swap(i, child);
            trace.add(
                StepKind::Swap,
                format!(
                    "sifting {} down below {}",
                    self.items[child], self.items[i]
                ),
                vec![i as NodeId, child as NodeId],
            );
            i = child;
        }
    }

    pub fn peek(&self) -> Report<i64> {
        let mut trace = Trace::new();
        match self.items.first() {
            Some(&value) => {
                trace.add(
                    StepKind::Visit,
                    format!("the {} {value} sits at the root", self.kind.label()),
                    vec![0],
                );
                Report::ok(value, trace)
            }
            None => {
                trace.add(StepKind::Info, "the heap is empty", vec![]);
                Report::err(EngineError::StructureEmpty, trace)
            }
        }
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Level-order snapshot of the backing array.
    pub fn snapshot(&self) -> Vec<i64> {
        self.items.clone()
    }

    pub fn validate(&self) -> Result<(), String> {
        for i in 1..self.items.len() {
            let parent = (i - 1) / 2;
            if self.outranks(self.items[i], self.items[parent]) {
                return Err(format!(
                    "heap order broken: {} at index {i} outranks its parent {} at index {parent}",
                    self.items[i], self.items[parent]
                ));
            }
        }
        Ok(())
    }
}
