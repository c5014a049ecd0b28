//! FIFO queue with narrated operations.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

/// Growable queue over integers. Highlight ids are positions from the
/// front, so the next element out is always id 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEngine {
    items: VecDeque<i64>,
}

impl QueueEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: i64) -> Report<usize> {
        let mut trace = Trace::new();
        let index = self.items.len();
        self.items.push_back(value);
        trace.add(
            StepKind::Insert,
            format!("enqueueing {value} at the back, position {index}"),
            vec![index as NodeId],
        );
        Report::ok(index, trace)
    }

    pub fn dequeue(&mut self) -> Report<i64> {
        let mut trace = Trace::new();
        match self.items.pop_front() {
            Some(value) => {
                trace.add(
                    StepKind::Remove,
                    format!("dequeueing {value} from the front"),
                    vec![0],
                );
                Report::ok(value, trace)
            }
            None => {
                trace.add(StepKind::Info, "the queue is empty", vec![]);
                Report::err(EngineError::StructureEmpty, trace)
            }
        }
    }

    pub fn peek(&self) -> Report<i64> {
        let mut trace = Trace::new();
        match self.items.front() {
            Some(&value) => {
                trace.add(
                    StepKind::Visit,
                    format!("the front of the queue is {value}"),
                    vec![0],
                );
                Report::ok(value, trace)
            }
            None => {
                trace.add(StepKind::Info, "the queue is empty", vec![]);
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

    /// Front-to-back snapshot.
    pub fn snapshot(&self) -> Vec<i64> {
        self.items.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_round_trip() {
        let mut queue = QueueEngine::new();
        for v in [1, 2, 3] {
            queue.enqueue(v).expect_ok("enqueue is infallible");
        }
        assert_eq!(queue.peek().expect_ok("non-empty"), 1);
        assert_eq!(queue.dequeue().expect_ok("non-empty"), 1);
        assert_eq!(queue.dequeue().expect_ok("non-empty"), 2);
        assert_eq!(queue.snapshot(), vec![3]);
    }

    #[test]
    fn underflow_is_reported_not_panicked() {
        let mut queue = QueueEngine::new();
        assert_eq!(queue.dequeue().error(), Some(&EngineError::StructureEmpty));
        assert_eq!(queue.peek().error(), Some(&EngineError::StructureEmpty));
    }
}
