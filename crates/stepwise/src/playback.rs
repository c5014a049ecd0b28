//! Pull-based replay of a finished trace.
//!
//! The engines never wait; an operation is already complete before its
//! steps reach a host. `Playback` is the host-side half of that model:
//! call [`Iterator::next`] once per animation tick, pause and resume
//! freely, and cancel by either calling [`Playback::cancel`] or simply
//! dropping the value. Stopping mid-trace cannot corrupt a structure.

use stepwise_core::{Report, Step};

/// Cursor over the steps of one operation.
#[derive(Clone, Debug)]
pub struct Playback {
    steps: Vec<Step>,
    cursor: usize,
    paused: bool,
}

impl Playback {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            cursor: 0,
            paused: false,
        }
    }

    /// Replay the steps of a report, successful or not.
    pub fn from_report<T>(report: &Report<T>) -> Self {
        Self::new(report.steps.clone())
    }

    /// While paused, [`Iterator::next`] yields nothing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Drop the remaining steps; the iterator is exhausted afterwards.
    pub fn cancel(&mut self) {
        self.cursor = self.steps.len();
    }

    /// Steps already yielded.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.steps.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == self.steps.len()
    }

    /// Look at the next step without advancing.
    pub fn peek(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }
}

impl Iterator for Playback {
    type Item = Step;

    /// `None` either when the trace is exhausted or while paused; after
    /// [`Playback::resume`] the iteration continues where it stopped.
    fn next(&mut self) -> Option<Step> {
        if self.paused {
            return None;
        }
        let step = self.steps.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(step)
    }
}
