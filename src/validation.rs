//! Input validation for job-shop problems.
//!
//! Checks structural integrity of a problem before it is used. Detects:
//! - Problems without jobs or machines
//! - Jobs without tasks
//! - Tasks routed to machines that don't exist
//!
//! All issues are collected, so a caller fixing a problem file sees every
//! mistake at once.

use thiserror::Error;

use crate::models::{Job, JobId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The problem defines no jobs.
    NoJobs,
    /// The problem defines no machines.
    NoMachines,
    /// A job has no tasks.
    EmptyJob,
    /// A task references a machine outside `[0, machine_count)`.
    InvalidMachineReference,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates jobs against a machine count.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(jobs: &[Job], machine_count: usize) -> ValidationResult {
    let mut errors = Vec::new();

    if jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoJobs,
            "Problem has no jobs",
        ));
    }
    if machine_count == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoMachines,
            "Problem has no machines",
        ));
    }

    for (index, job) in jobs.iter().enumerate() {
        let job_id: JobId = index + 1;

        if !job.has_tasks() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job {job_id} has no tasks"),
            ));
        }

        for (position, task) in job.tasks().iter().enumerate() {
            if task.machine >= machine_count {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMachineReference,
                    format!(
                        "Task {} of job {} references machine {} (problem has {} machines)",
                        position + 1,
                        job_id,
                        task.machine,
                        machine_count
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
