//! Genetic operators for operation-sequence genomes.
//!
//! Both operators keep every job's occurrence count intact, so their output
//! always decodes against the parents' problem.
//!
//! # Usage
//!
//! ```
//! use u_jobshop::ga::operators::GeneticOperators;
//!
//! let ops = GeneticOperators::default();
//! assert!((ops.mutation_probability - 1.0 / 9.0).abs() < 1e-12);
//! ```

use rand::Rng;

use super::Genome;

/// Default chance that [`swap_mutation`] swaps anything.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 1.0 / 9.0;

/// Tail-relocating substring crossover.
///
/// Picks two interior cut points `s1 <= s2` in `[1, len-2]`, takes
/// `parent_a[s1..s2]`, deletes the first occurrence of each of its values
/// from a copy of `parent_b`, and appends the substring to the end of that
/// copy. The substring always lands at the tail of the child, not at `s1`.
///
/// Genomes shorter than three genes have no interior cut points; the child
/// is then a copy of `parent_b`.
pub fn tail_crossover<R: Rng>(parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Genome {
    let len = parent_a.len();
    if len < 3 {
        return parent_b.clone();
    }

    let mut s1 = rng.random_range(1..len - 1);
    let mut s2 = rng.random_range(1..len - 1);
    if s1 > s2 {
        std::mem::swap(&mut s1, &mut s2);
    }
    let substring = &parent_a.genes()[s1..s2];

    let mut child = parent_b.genes().to_vec();
    for value in substring {
        if let Some(pos) = child.iter().position(|g| g == value) {
            child.remove(pos);
        }
    }
    child.extend_from_slice(substring);

    Genome::from_genes(child)
}

/// Swap mutation.
///
/// With the given probability, swaps the values at two positions drawn
/// independently from `[0, len-1)`; the two draws may coincide. Returns the
/// drawn positions, or `None` when no swap was attempted.
///
/// `probability` is clamped to `[0, 1]`; NaN counts as 0.
pub fn swap_mutation<R: Rng>(
    genome: &mut Genome,
    probability: f64,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let probability = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    if !rng.random_bool(probability) {
        return None;
    }
    let len = genome.len();
    if len < 2 {
        return None;
    }
    let i = rng.random_range(0..len - 1);
    let j = rng.random_range(0..len - 1);
    genome.swap(i, j);
    Some((i, j))
}

/// Crossover and mutation settings used for breeding.
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Chance of a swap per mutation call.
    pub mutation_probability: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
        }
    }
}

impl GeneticOperators {
    /// Creates operators with a mutation probability.
    pub fn new(mutation_probability: f64) -> Self {
        Self {
            mutation_probability,
        }
    }

    /// Produces one child from two parents.
    pub fn crossover<R: Rng>(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Genome {
        tail_crossover(parent_a, parent_b, rng)
    }

    /// Mutates a genome in place.
    pub fn mutate<R: Rng>(&self, genome: &mut Genome, rng: &mut R) -> Option<(usize, usize)> {
        swap_mutation(genome, self.mutation_probability, rng)
    }

    /// Crossover followed by mutation of the fresh child.
    pub fn breed<R: Rng>(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut R) -> Genome {
        let mut child = self.crossover(parent_a, parent_b, rng);
        self.mutate(&mut child, rng);
        child
    }
}
