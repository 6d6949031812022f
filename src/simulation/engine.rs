//! Tick-based machine simulator.
//!
//! # Algorithm
//!
//! 1. Decode the genome into operations.
//! 2. Route each operation to the FIFO queue of its task's machine,
//!    keeping genome order.
//! 3. Each tick, starting at t=0:
//!    - stop when every machine is drained; `t` is the makespan
//!    - every idle machine starts its queue head if that operation is the
//!      first of its job or its predecessor has completed
//!    - every busy machine counts down one tick, completing its operation
//!      when the count reaches zero
//!
//! Dispatch decisions only read completions from earlier ticks, so the
//! order in which machines are visited within a tick does not matter.
//!
//! # Termination
//! Among all queue heads, the one earliest in genome order always has its
//! predecessor (if any) dispatched already, so some machine makes progress
//! until every queue is empty.

use crate::error::InvalidGenomeError;
use crate::ga::Genome;
use crate::models::{Assignment, Operation, ProblemModel, Schedule, Task, Time};

use super::machine::MachineState;

/// Scores genomes against one problem by simulating its machines.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    problem: &'a ProblemModel,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator for a problem.
    pub fn new(problem: &'a ProblemModel) -> Self {
        Self { problem }
    }

    /// The simulated problem.
    pub fn problem(&self) -> &'a ProblemModel {
        self.problem
    }

    /// Simulates a genome and returns its makespan.
    pub fn makespan(&self, genome: &Genome) -> Result<Time, InvalidGenomeError> {
        self.run(genome, None)
    }

    /// Simulates a genome and returns the full schedule.
    pub fn schedule(&self, genome: &Genome) -> Result<Schedule, InvalidGenomeError> {
        let mut schedule = Schedule::new();
        self.run(genome, Some(&mut schedule))?;
        Ok(schedule)
    }

    fn task_of(&self, operation: Operation) -> Task {
        // Decoded operations always reference existing tasks.
        self.problem.jobs()[operation.job_id - 1].tasks()[operation.task_index - 1]
    }

    fn run(
        &self,
        genome: &Genome,
        mut trace: Option<&mut Schedule>,
    ) -> Result<Time, InvalidGenomeError> {
        let operations = genome.decode(self.problem)?;

        let mut machines: Vec<MachineState> = (0..self.problem.machine_count())
            .map(|_| MachineState::new())
            .collect();
        for &operation in &operations {
            machines[self.task_of(operation).machine].enqueue(operation);
        }

        // Number of completed tasks per job. Tasks of a job complete in
        // order, so (j, n-1) is done iff progress[j-1] >= n-1.
        let mut progress = vec![0usize; self.problem.job_count()];

        let mut now: Time = 0;
        loop {
            if machines.iter().all(MachineState::is_drained) {
                break;
            }

            for machine in machines.iter_mut().filter(|m| m.is_idle()) {
                let Some(head) = machine.peek() else {
                    continue;
                };
                if progress[head.job_id - 1] + 1 >= head.task_index {
                    machine.dispatch(self.task_of(head).duration, now);
                }
            }

            for (index, machine) in machines.iter_mut().enumerate() {
                if let Some((operation, start)) = machine.advance() {
                    progress[operation.job_id - 1] += 1;
                    if let Some(schedule) = trace.as_deref_mut() {
                        let end = start + self.task_of(operation).duration;
                        schedule.add_assignment(Assignment::new(operation, index, start, end));
                    }
                }
            }

            now += 1;
        }

        debug_assert_eq!(
            machines.iter().map(|m| m.completed().len()).sum::<usize>(),
            operations.len()
        );
        log::trace!("simulated {} operations, makespan {}", operations.len(), now);
        Ok(now)
    }
}

/// Makespan of a genome on a problem.
pub fn simulate(problem: &ProblemModel, genome: &Genome) -> Result<Time, InvalidGenomeError> {
    Simulator::new(problem).makespan(genome)
}
