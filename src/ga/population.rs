//! Scored genomes and populations.

use rand::Rng;
use serde::Serialize;

use super::Genome;
use crate::error::InvalidGenomeError;
use crate::models::{ProblemModel, Time};
use crate::simulation::Simulator;

/// A genome together with its makespan.
///
/// Fitness is computed once, when the entry is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomeFitness {
    /// Encoded schedule.
    pub genome: Genome,
    /// Simulated makespan (lower = better).
    pub fitness: Time,
}

impl GenomeFitness {
    /// Simulates a genome and pairs it with its makespan.
    pub fn evaluate(genome: Genome, simulator: &Simulator<'_>) -> Result<Self, InvalidGenomeError> {
        let fitness = simulator.makespan(&genome)?;
        Ok(Self { genome, fitness })
    }
}

/// Ordered collection of scored genomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Population {
    members: Vec<GenomeFitness>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    /// Appends a member.
    pub fn push(&mut self, member: GenomeFitness) {
        self.members.push(member);
    }

    /// Members in order.
    pub fn members(&self) -> &[GenomeFitness] {
        &self.members
    }

    /// Consumes the population, returning its members.
    pub fn into_members(self) -> Vec<GenomeFitness> {
        self.members
    }

    /// Member at an index.
    pub fn get(&self, index: usize) -> Option<&GenomeFitness> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Arithmetic mean fitness. `None` when empty.
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.members.is_empty() {
            return None;
        }
        let sum: Time = self.members.iter().map(|m| m.fitness).sum();
        Some(sum as f64 / self.members.len() as f64)
    }

    /// Lowest fitness. `None` when empty.
    pub fn best_fitness(&self) -> Option<Time> {
        self.members.iter().map(|m| m.fitness).min()
    }

    /// First member with the lowest fitness.
    pub fn best(&self) -> Option<&GenomeFitness> {
        self.members.iter().min_by_key(|m| m.fitness)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenomeFitness> {
        self.members.iter()
    }
}

impl FromIterator<GenomeFitness> for Population {
    fn from_iter<I: IntoIterator<Item = GenomeFitness>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a GenomeFitness;
    type IntoIter = std::slice::Iter<'a, GenomeFitness>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Creates `count` random members, each shuffled independently and scored.
pub fn initialize_population<R: Rng>(
    problem: &ProblemModel,
    count: usize,
    rng: &mut R,
) -> Result<Population, InvalidGenomeError> {
    let simulator = Simulator::new(problem);
    (0..count)
        .map(|_| GenomeFitness::evaluate(Genome::random(problem, rng), &simulator))
        .collect()
}
