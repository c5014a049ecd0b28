//! LIFO stack with narrated operations.

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

/// Growable stack over integers. Indices count from the bottom, so the
/// top of the stack is always the highest highlight id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEngine {
    items: Vec<i64>,
}

impl StackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: i64) -> Report<usize> {
        let mut trace = Trace::new();
        let index = self.items.len();
        self.items.push(value);
        trace.add(
            StepKind::Insert,
            format!("pushing {value} onto the stack at index {index}"),
            vec![index as NodeId],
        );
        Report::ok(index, trace)
    }

    pub fn pop(&mut self) -> Report<i64> {
        let mut trace = Trace::new();
        match self.items.pop() {
            Some(value) => {
                trace.add(
                    StepKind::Remove,
                    format!("popping {value} off the top"),
                    vec![self.items.len() as NodeId],
                );
                Report::ok(value, trace)
            }
            None => {
                trace.add(StepKind::Info, "the stack is empty", vec![]);
                Report::err(EngineError::StructureEmpty, trace)
            }
        }
    }

    pub fn peek(&self) -> Report<i64> {
        let mut trace = Trace::new();
        match self.items.last() {
            Some(&value) => {
                trace.add(
                    StepKind::Visit,
                    format!("the top of the stack is {value}"),
                    vec![(self.items.len() - 1) as NodeId],
                );
                Report::ok(value, trace)
            }
            None => {
                trace.add(StepKind::Info, "the stack is empty", vec![]);
                Report::err(EngineError::StructureEmpty, trace)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom-to-top snapshot.
    pub fn snapshot(&self) -> Vec<i64> {
        self.items.clone()
    }
}
