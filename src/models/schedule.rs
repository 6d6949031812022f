//! Schedule (simulation trace) model.
//!
//! A schedule records when and where every operation ran. The simulator
//! produces one per genome on request; the GA itself only needs the
//! makespan.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::{JobId, MachineId, Operation, Time};

/// A complete simulated schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Operation assignments in dispatch order.
    pub assignments: Vec<Assignment>,
}

/// An operation-machine-time assignment.
///
/// The operation occupies its machine during `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Scheduled operation.
    pub operation: Operation,
    /// Machine that ran it.
    pub machine: MachineId,
    /// Dispatch tick.
    pub start: Time,
    /// Completion tick.
    pub end: Time,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(operation: Operation, machine: MachineId, start: Time, end: Time) -> Self {
        Self {
            operation,
            machine,
            start,
            end,
        }
    }

    /// Processing duration (end - start).
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Makespan: latest end time across all assignments.
    pub fn makespan(&self) -> Time {
        self.assignments.iter().map(|a| a.end).max().unwrap_or(0)
    }

    /// Finds the assignment for a given operation.
    pub fn assignment_for(&self, operation: Operation) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.operation == operation)
    }

    /// Returns all assignments for a given job.
    pub fn assignments_for_job(&self, job_id: JobId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.operation.job_id == job_id)
            .collect()
    }

    /// Returns all assignments for a given machine.
    pub fn assignments_for_machine(&self, machine: MachineId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.machine == machine)
            .collect()
    }

    /// Total busy time of a machine.
    pub fn machine_busy_time(&self, machine: MachineId) -> Time {
        self.assignments_for_machine(machine)
            .iter()
            .map(|a| a.duration())
            .sum()
    }

    /// Machine utilization: busy_time / makespan.
    ///
    /// Returns `None` for an empty schedule.
    pub fn machine_utilization(&self, machine: MachineId) -> Option<f64> {
        let horizon = self.makespan();
        if horizon == 0 {
            return None;
        }
        Some(self.machine_busy_time(machine) as f64 / horizon as f64)
    }

    /// Completion time for a job (latest end of its assignments).
    pub fn job_completion_time(&self, job_id: JobId) -> Option<Time> {
        self.assignments_for_job(job_id)
            .iter()
            .map(|a| a.end)
            .max()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
