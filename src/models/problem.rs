//! Job-shop problem model.
//!
//! A [`ProblemModel`] is validated once at construction and is read-only
//! afterwards. Deserialization goes through the same validation, so a
//! problem loaded from a TOML file is as trustworthy as one built in code.
//!
//! # File format
//!
//! ```toml
//! machines = 2
//! jobs = [
//!     [[0, 2], [1, 3]],
//!     [[1, 4]],
//! ]
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Job, JobId, MachineId, Task, Time};
use crate::error::{Error, Result};
use crate::validation::validate_problem;

/// Reference to one task of one job.
///
/// Both indices are 1-based: `Operation::new(2, 1)` is the first task of job 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Operation {
    /// Owning job.
    pub job_id: JobId,
    /// Position within the job (1-based).
    pub task_index: usize,
}

impl Operation {
    /// Creates an operation reference.
    pub fn new(job_id: JobId, task_index: usize) -> Self {
        Self { job_id, task_index }
    }

    /// The operation that must complete before this one may start.
    pub fn predecessor(&self) -> Option<Operation> {
        (self.task_index > 1).then(|| Operation::new(self.job_id, self.task_index - 1))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.job_id, self.task_index)
    }
}

#[derive(Deserialize)]
struct RawProblem {
    machines: usize,
    jobs: Vec<Job>,
}

/// Immutable job-shop instance: jobs, their ordered tasks, and machine count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct ProblemModel {
    machines: usize,
    jobs: Vec<Job>,
}

impl TryFrom<RawProblem> for ProblemModel {
    type Error = Error;

    fn try_from(raw: RawProblem) -> Result<Self> {
        Self::new(raw.jobs, raw.machines)
    }
}

impl ProblemModel {
    /// Creates a validated problem.
    ///
    /// # Errors
    /// [`Error::Validation`] listing every problem found: no jobs, no
    /// machines, jobs without tasks, tasks on machines outside
    /// `[0, machine_count)`.
    pub fn new(jobs: Vec<Job>, machine_count: usize) -> Result<Self> {
        validate_problem(&jobs, machine_count)?;
        Ok(Self {
            machines: machine_count,
            jobs,
        })
    }

    /// Parses and validates a TOML problem description.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and validates a TOML problem file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Jobs in problem order (job id = index + 1).
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Job by 1-based id.
    pub fn job(&self, job_id: JobId) -> Option<&Job> {
        job_id.checked_sub(1).and_then(|i| self.jobs.get(i))
    }

    /// Task referenced by an operation.
    pub fn task(&self, operation: Operation) -> Option<&Task> {
        self.job(operation.job_id)
            .and_then(|job| job.task(operation.task_index))
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of machines.
    pub fn machine_count(&self) -> usize {
        self.machines
    }

    /// Total number of operations (sum of job lengths).
    pub fn operation_count(&self) -> usize {
        self.jobs.iter().map(Job::task_count).sum()
    }

    /// Total processing time routed to each machine.
    pub fn machine_workloads(&self) -> Vec<Time> {
        let mut loads = vec![0; self.machines];
        for task in self.jobs.iter().flat_map(|j| j.tasks()) {
            loads[task.machine] += task.duration;
        }
        loads
    }

    /// Workload of a single machine.
    pub fn machine_workload(&self, machine: MachineId) -> Time {
        self.jobs
            .iter()
            .flat_map(|j| j.tasks())
            .filter(|t| t.machine == machine)
            .map(|t| t.duration)
            .sum()
    }

    /// No schedule can finish before its busiest machine has done all its work.
    pub fn workload_lower_bound(&self) -> Time {
        self.machine_workloads().into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn two_job_problem() -> ProblemModel {
        ProblemModel::new(
            vec![Job::from(vec![(0, 2), (1, 3)]), Job::from(vec![(1, 4)])],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let p = two_job_problem();
        assert_eq!(p.job_count(), 2);
        assert_eq!(p.machine_count(), 2);
        assert_eq!(p.operation_count(), 3);
        assert_eq!(p.job(2).unwrap().task_count(), 1);
        assert!(p.job(0).is_none());
        assert!(p.job(3).is_none());
        assert_eq!(p.task(Operation::new(1, 2)), Some(&Task::new(1, 3)));
        assert_eq!(p.task(Operation::new(2, 2)), None);
    }

    #[test]
    fn test_machine_workloads() {
        let p = two_job_problem();
        assert_eq!(p.machine_workloads(), vec![2, 7]);
        assert_eq!(p.machine_workload(1), 7);
        assert_eq!(p.workload_lower_bound(), 7);
    }

    #[test]
    fn test_operation_predecessor() {
        assert_eq!(Operation::new(3, 1).predecessor(), None);
        assert_eq!(
            Operation::new(3, 2).predecessor(),
            Some(Operation::new(3, 1))
        );
        assert_eq!(Operation::new(3, 2).to_string(), "(3, 2)");
    }

    #[test]
    fn test_rejects_bad_machine() {
        let err = ProblemModel::new(vec![Job::from(vec![(2, 1)])], 2).unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidMachineReference);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_toml() {
        let p = ProblemModel::from_toml_str(
            r#"
            machines = 2
            jobs = [
                [[0, 2], [1, 3]],
                [[1, 4]],
            ]
            "#,
        )
        .unwrap();
        assert_eq!(p, two_job_problem());
    }

    #[test]
    fn test_from_toml_validates() {
        let err = ProblemModel::from_toml_str("machines = 1\njobs = [[]]\n").unwrap_err();
        assert!(err.to_string().contains("no tasks"), "got: {err}");
    }

    #[test]
    fn test_json_round_trip() {
        let p = two_job_problem();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"machines":2,"jobs":[[[0,2],[1,3]],[[1,4]]]}"#);
        let back: ProblemModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
