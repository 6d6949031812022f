//! Job-shop domain models.
//!
//! Provides the data types for describing a job-shop problem and the
//! schedules simulated for it.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Task`] | One step: a machine and a duration |
//! | [`Job`] | Ordered chain of tasks |
//! | [`Operation`] | (job, task index) reference |
//! | [`ProblemModel`] | Validated jobs + machine count |
//! | [`Schedule`] | Start/end of every operation |

mod instances;
mod problem;
mod schedule;
mod task;

pub use instances::Instance;
pub use problem::{Operation, ProblemModel};
pub use schedule::{Assignment, Schedule};
pub use task::{Job, JobId, MachineId, Task, Time};
