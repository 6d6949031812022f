//! Built-in reference instances.
//!
//! | Instance | Jobs | Machines | Operations |
//! |----------|------|----------|------------|
//! | `example` | 3 | 3 | 8 |
//! | `dataset` | 4 | 5 | 17 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Job, MachineId, ProblemModel, Time};
use crate::error::{Error, Result};

const EXAMPLE_JOBS: &[&[(MachineId, Time)]] = &[
    &[(0, 1), (2, 1), (2, 3)],
    &[(0, 1), (0, 2), (1, 3)],
    &[(1, 3), (2, 4)],
];

const DATASET_JOBS: &[&[(MachineId, Time)]] = &[
    &[(0, 1), (2, 1), (2, 3), (3, 3)],
    &[(0, 1), (3, 2), (0, 2), (1, 3), (4, 1)],
    &[(1, 3), (2, 4), (3, 1), (4, 4)],
    &[(2, 1), (3, 1), (0, 1), (4, 1)],
];

/// A named built-in problem instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instance {
    /// Small worked example: 3 jobs on 3 machines.
    Example,
    /// 4 jobs on 5 machines.
    #[default]
    Dataset,
}

impl Instance {
    /// All built-in instances.
    pub const ALL: [Instance; 2] = [Instance::Example, Instance::Dataset];

    /// Builds the problem model for this instance.
    pub fn problem(self) -> Result<ProblemModel> {
        let (jobs, machines) = match self {
            Instance::Example => (EXAMPLE_JOBS, 3),
            Instance::Dataset => (DATASET_JOBS, 5),
        };
        let jobs = jobs
            .iter()
            .map(|tasks| Job::from(tasks.to_vec()))
            .collect();
        ProblemModel::new(jobs, machines)
    }

    /// Instance name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Instance::Example => "example",
            Instance::Dataset => "dataset",
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Instance::ALL
            .into_iter()
            .find(|i| i.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Config(format!(
                    "unknown instance '{s}' (expected one of: example, dataset)"
                ))
            })
    }
}
