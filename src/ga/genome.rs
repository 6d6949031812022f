//! Operation-sequence genome.
//!
//! # Encoding
//!
//! A genome is a sequence of job ids. Job `j` appears exactly as many times
//! as it has tasks, and the n-th occurrence of `j` (scanning left to right)
//! stands for operation `(j, n)`. Any permutation of the canonical sequence
//! is therefore a feasible task order: precedence within a job is implied by
//! occurrence order.
//!
//! ```text
//! genes      [2, 1, 1, 3, 2]
//! operations (2,1) (1,1) (1,2) (3,1) (2,2)
//! ```
//!
//! # Reference
//! Bierwirth (1995), "A generalized permutation approach to JSSP"

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::InvalidGenomeError;
use crate::models::{JobId, Operation, ProblemModel};

/// A candidate schedule encoded as a sequence of job ids.
///
/// Every constructor that accepts outside input checks the occurrence-count
/// invariant against a problem. The genetic operators build genomes from
/// already-valid parents and preserve the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Genome {
    genes: Vec<JobId>,
}

impl Genome {
    /// Creates a genome, rejecting sequences that don't match the problem.
    pub fn new(genes: Vec<JobId>, problem: &ProblemModel) -> Result<Self, InvalidGenomeError> {
        let genome = Self { genes };
        genome.validate(problem)?;
        Ok(genome)
    }

    /// Each job id repeated once per task, jobs in problem order.
    pub fn canonical(problem: &ProblemModel) -> Self {
        let genes = problem
            .jobs()
            .iter()
            .enumerate()
            .flat_map(|(index, job)| std::iter::repeat(index + 1).take(job.task_count()))
            .collect();
        Self { genes }
    }

    /// Uniformly shuffled canonical genome.
    pub fn random<R: Rng>(problem: &ProblemModel, rng: &mut R) -> Self {
        let mut genome = Self::canonical(problem);
        genome.genes.shuffle(rng);
        genome
    }

    /// Wraps genes produced from valid parents.
    pub(crate) fn from_genes(genes: Vec<JobId>) -> Self {
        Self { genes }
    }

    /// Gene values.
    pub fn genes(&self) -> &[JobId] {
        &self.genes
    }

    /// Consumes the genome, returning its genes.
    pub fn into_genes(self) -> Vec<JobId> {
        self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.genes.swap(a, b);
    }

    /// Checks the occurrence-count invariant.
    pub fn validate(&self, problem: &ProblemModel) -> Result<(), InvalidGenomeError> {
        self.decode(problem).map(|_| ())
    }

    /// Decodes the genome into operations in genome order.
    ///
    /// # Errors
    /// - [`InvalidGenomeError::LengthMismatch`] if the length differs from the
    ///   problem's operation count
    /// - [`InvalidGenomeError::UnknownJob`] for ids outside `1..=job_count`
    /// - [`InvalidGenomeError::OccurrenceMismatch`] if a job occurs a
    ///   different number of times than it has tasks
    pub fn decode(&self, problem: &ProblemModel) -> Result<Vec<Operation>, InvalidGenomeError> {
        let expected = problem.operation_count();
        if self.genes.len() != expected {
            return Err(InvalidGenomeError::LengthMismatch {
                expected,
                actual: self.genes.len(),
            });
        }

        let job_count = problem.job_count();
        let mut counters = vec![0usize; job_count];
        let mut operations = Vec::with_capacity(self.genes.len());

        for &job_id in &self.genes {
            if job_id == 0 || job_id > job_count {
                return Err(InvalidGenomeError::UnknownJob { job_id, job_count });
            }
            let seen = &mut counters[job_id - 1];
            *seen += 1;
            operations.push(Operation::new(job_id, *seen));
        }

        for (index, (job, &actual)) in problem.jobs().iter().zip(&counters).enumerate() {
            if actual != job.task_count() {
                return Err(InvalidGenomeError::OccurrenceMismatch {
                    job_id: index + 1,
                    expected: job.task_count(),
                    actual,
                });
            }
        }

        Ok(operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_problem() -> ProblemModel {
        ProblemModel::new(
            vec![
                Job::from(vec![(0, 1), (2, 1), (2, 3)]),
                Job::from(vec![(0, 1), (0, 2), (1, 3)]),
                Job::from(vec![(1, 3), (2, 4)]),
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_canonical_genome() {
        let g = Genome::canonical(&sample_problem());
        assert_eq!(g.genes(), &[1, 1, 1, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn test_random_genome_is_valid() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let g = Genome::random(&problem, &mut rng);
            assert_eq!(g.len(), 8);
            assert!(g.validate(&problem).is_ok());
        }
    }

    #[test]
    fn test_decode() {
        let problem = sample_problem();
        let g = Genome::new(vec![2, 1, 1, 3, 2, 1, 3, 2], &problem).unwrap();
        let ops = g.decode(&problem).unwrap();
        assert_eq!(
            ops,
            vec![
                Operation::new(2, 1),
                Operation::new(1, 1),
                Operation::new(1, 2),
                Operation::new(3, 1),
                Operation::new(2, 2),
                Operation::new(1, 3),
                Operation::new(3, 2),
                Operation::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = Genome::new(vec![1, 2, 3], &sample_problem()).unwrap_err();
        assert_eq!(
            err,
            InvalidGenomeError::LengthMismatch {
                expected: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rejects_unknown_job() {
        let err = Genome::new(vec![1, 1, 1, 2, 2, 2, 3, 4], &sample_problem()).unwrap_err();
        assert_eq!(
            err,
            InvalidGenomeError::UnknownJob {
                job_id: 4,
                job_count: 3
            }
        );
        let err = Genome::new(vec![0, 1, 1, 2, 2, 2, 3, 3], &sample_problem()).unwrap_err();
        assert!(matches!(err, InvalidGenomeError::UnknownJob { job_id: 0, .. }));
    }

    #[test]
    fn test_rejects_occurrence_mismatch() {
        // Right length, but job 1 appears four times and job 3 once
        let err = Genome::new(vec![1, 1, 1, 1, 2, 2, 2, 3], &sample_problem()).unwrap_err();
        assert_eq!(
            err,
            InvalidGenomeError::OccurrenceMismatch {
                job_id: 1,
                expected: 3,
                actual: 4
            }
        );
    }
}
