//! Task and job model.
//!
//! A job is an ordered chain of tasks. Each task runs on exactly one
//! machine for a fixed number of ticks, and task k of a job may not start
//! before task k-1 of the same job has completed.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2.3

use serde::{Deserialize, Serialize};

/// 1-based job identifier (position of the job in the problem).
pub type JobId = usize;

/// 0-based machine index.
pub type MachineId = usize;

/// Simulation time in ticks.
pub type Time = u64;

/// One processing step of a job.
///
/// Serialized as a `[machine, duration]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(MachineId, Time)", into = "(MachineId, Time)")]
pub struct Task {
    /// Machine this task must run on.
    pub machine: MachineId,
    /// Processing time (ticks).
    pub duration: Time,
}

impl Task {
    /// Creates a task.
    pub fn new(machine: MachineId, duration: Time) -> Self {
        Self { machine, duration }
    }
}

impl From<(MachineId, Time)> for Task {
    fn from((machine, duration): (MachineId, Time)) -> Self {
        Self { machine, duration }
    }
}

impl From<Task> for (MachineId, Time) {
    fn from(task: Task) -> Self {
        (task.machine, task.duration)
    }
}

/// An ordered sequence of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Job {
    tasks: Vec<Task>,
}

impl Job {
    /// Creates a job from its tasks in execution order.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends a task.
    pub fn with_task(mut self, machine: MachineId, duration: Time) -> Self {
        self.tasks.push(Task::new(machine, duration));
        self
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at a 1-based position.
    pub fn task(&self, task_index: usize) -> Option<&Task> {
        task_index.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether this job has any tasks.
    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Sum of task durations.
    pub fn total_duration(&self) -> Time {
        self.tasks.iter().map(|t| t.duration).sum()
    }
}

impl From<Vec<(MachineId, Time)>> for Job {
    fn from(pairs: Vec<(MachineId, Time)>) -> Self {
        Self::new(pairs.into_iter().map(Task::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::default().with_task(0, 1).with_task(2, 3);
        assert_eq!(job.task_count(), 2);
        assert_eq!(job.tasks()[1], Task::new(2, 3));
        assert_eq!(job.total_duration(), 4);
        assert!(job.has_tasks());
    }

    #[test]
    fn test_task_lookup_is_one_based() {
        let job = Job::from(vec![(0, 2), (1, 3)]);
        assert_eq!(job.task(1), Some(&Task::new(0, 2)));
        assert_eq!(job.task(2), Some(&Task::new(1, 3)));
        assert_eq!(job.task(0), None);
        assert_eq!(job.task(3), None);
    }

    #[test]
    fn test_task_serializes_as_pair() {
        let job = Job::from(vec![(0, 1), (4, 7)]);
        let json = serde_json::to_string(&job).unwrap();
        assert_eq!(json, "[[0,1],[4,7]]");

        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
    }

    #[test]
    fn test_empty_job() {
        let job = Job::default();
        assert_eq!(job.total_duration(), 0);
        assert!(!job.has_tasks());
    }
}
