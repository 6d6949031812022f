//! Per-machine simulation state.

use std::collections::VecDeque;

use crate::models::{Operation, Time};

/// State of one machine during a single simulation run.
///
/// A machine is idle when it has no current operation and no time left.
#[derive(Debug, Clone, Default)]
pub(crate) struct MachineState {
    queue: VecDeque<Operation>,
    current: Option<Operation>,
    time_remaining: Time,
    started_at: Time,
    completed: Vec<Operation>,
}

impl MachineState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the back of the FIFO queue.
    pub(crate) fn enqueue(&mut self, operation: Operation) {
        self.queue.push_back(operation);
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.current.is_none() && self.time_remaining == 0
    }

    /// Idle with nothing left to run.
    pub(crate) fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.is_idle()
    }

    /// Operation at the head of the queue.
    pub(crate) fn peek(&self) -> Option<Operation> {
        self.queue.front().copied()
    }

    /// Pops the queue head into `current`. An empty queue leaves the
    /// machine idle.
    pub(crate) fn dispatch(&mut self, duration: Time, now: Time) {
        if let Some(operation) = self.queue.pop_front() {
            self.current = Some(operation);
            self.time_remaining = duration;
            self.started_at = now;
        }
    }

    /// Advances one tick. Returns the operation that finished, with its
    /// start tick, if any.
    pub(crate) fn advance(&mut self) -> Option<(Operation, Time)> {
        let operation = self.current?;
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
        }
        if self.time_remaining > 0 {
            return None;
        }
        self.current = None;
        self.completed.push(operation);
        Some((operation, self.started_at))
    }

    pub(crate) fn completed(&self) -> &[Operation] {
        &self.completed
    }
}
