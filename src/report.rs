//! CSV progress report.
//!
//! ```text
//! Generation,Mean fitness,Best fitness
//! 1,24.860000,19
//! 2,22.310345,18
//! ```
//!
//! [`schedule_summary`] describes a finished schedule: machine utilization
//! and job completion times.

use std::io::Write;

use crate::error::Result;
use crate::ga::{GenerationObserver, GenerationStats};
use crate::models::{ProblemModel, Schedule};

/// Header line of the report.
pub const CSV_HEADER: &str = "Generation,Mean fitness,Best fitness";

/// One report line: integer generation, mean with six decimals, integer best.
pub fn format_row(stats: &GenerationStats) -> String {
    format!(
        "{},{:.6},{}",
        stats.generation, stats.mean_fitness, stats.best_fitness
    )
}

/// Writes one CSV line per generation.
#[derive(Debug)]
pub struct CsvReporter<W: Write> {
    writer: W,
}

impl<W: Write> CsvReporter<W> {
    /// Creates a reporter and writes the header line.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        Ok(Self { writer })
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> GenerationObserver for CsvReporter<W> {
    fn on_generation(&mut self, stats: &GenerationStats) -> Result<()> {
        writeln!(self.writer, "{}", format_row(stats))?;
        Ok(())
    }
}

/// One line per machine (busy time and utilization over the makespan),
/// then one line per job (completion tick).
pub fn schedule_summary(problem: &ProblemModel, schedule: &Schedule) -> Vec<String> {
    let makespan = schedule.makespan();
    let machines = (0..problem.machine_count()).map(|machine| {
        let utilization = schedule.machine_utilization(machine).unwrap_or(0.0);
        format!(
            "machine {machine}: busy {} of {makespan}, utilization {:.1}%",
            schedule.machine_busy_time(machine),
            utilization * 100.0
        )
    });
    let jobs = (1..=problem.job_count()).map(|job_id| match schedule.job_completion_time(job_id) {
        Some(end) => format!("job {job_id}: completes at {end}"),
        None => format!("job {job_id}: not scheduled"),
    });
    machines.chain(jobs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Job, Operation};

    fn two_machine_problem() -> ProblemModel {
        ProblemModel::new(
            vec![
                Job::from(vec![(0, 2), (1, 3)]),
                Job::from(vec![(1, 4)]),
            ],
            2,
        )
        .unwrap()
    }

    fn stats(generation: usize, mean: f64, best: u64) -> GenerationStats {
        GenerationStats {
            generation,
            population_size: 50,
            mean_fitness: mean,
            best_fitness: best,
        }
    }

    #[test]
    fn test_format_row() {
        assert_eq!(format_row(&stats(1, 24.86, 19)), "1,24.860000,19");
        assert_eq!(format_row(&stats(12, 20.0 / 3.0, 6)), "12,6.666667,6");
    }

    #[test]
    fn test_reporter_output() {
        let mut reporter = CsvReporter::new(Vec::new()).unwrap();
        reporter.on_generation(&stats(1, 10.5, 9)).unwrap();
        reporter.on_generation(&stats(2, 9.25, 8)).unwrap();
        let out = String::from_utf8(reporter.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "Generation,Mean fitness,Best fitness\n1,10.500000,9\n2,9.250000,8\n"
        );
    }

    #[test]
    fn test_header_without_generations() {
        let reporter = CsvReporter::new(Vec::new()).unwrap();
        let out = String::from_utf8(reporter.into_inner().unwrap()).unwrap();
        assert_eq!(out, "Generation,Mean fitness,Best fitness\n");
    }

    #[test]
    fn test_schedule_summary() {
        let p = two_machine_problem();
        let mut schedule = Schedule::new();
        schedule.add_assignment(Assignment::new(Operation::new(1, 1), 0, 0, 2));
        schedule.add_assignment(Assignment::new(Operation::new(1, 2), 1, 2, 5));
        schedule.add_assignment(Assignment::new(Operation::new(2, 1), 1, 5, 9));

        assert_eq!(
            schedule_summary(&p, &schedule),
            vec![
                "machine 0: busy 2 of 9, utilization 22.2%",
                "machine 1: busy 7 of 9, utilization 77.8%",
                "job 1: completes at 5",
                "job 2: completes at 9",
            ]
        );
    }

    #[test]
    fn test_schedule_summary_empty() {
        let p = two_machine_problem();
        let lines = schedule_summary(&p, &Schedule::new());
        assert_eq!(lines[0], "machine 0: busy 0 of 0, utilization 0.0%");
        assert_eq!(lines[3], "job 2: not scheduled");
    }
}
