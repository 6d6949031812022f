//! Error types for job-shop search.
//!
//! Problem validation and genome decoding each have their own error type;
//! [`Error`] collects them together with configuration and I/O failures.

use thiserror::Error;

use crate::models::JobId;
use crate::validation::ValidationError;

/// A genome whose job-id occurrences do not match the problem's task counts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGenomeError {
    /// Genome length differs from the total operation count.
    #[error("genome length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Genome references a job the problem does not define.
    #[error("genome references unknown job {job_id} (problem has {job_count} jobs)")]
    UnknownJob { job_id: JobId, job_count: usize },

    /// A job appears a different number of times than it has tasks.
    #[error("job {job_id} occurs {actual} times, expected {expected}")]
    OccurrenceMismatch {
        job_id: JobId,
        expected: usize,
        actual: usize,
    },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    /// The problem model failed validation.
    #[error("invalid problem: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// A genome could not be decoded against the problem.
    #[error(transparent)]
    InvalidGenome(#[from] InvalidGenomeError),

    /// A generation ended up with no members.
    #[error("population is empty")]
    EmptyPopulation,

    /// Invalid run or evolution configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A TOML document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
