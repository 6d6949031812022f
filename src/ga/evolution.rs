//! Generational evolution loop.
//!
//! Each generation:
//!
//! 1. **Report**: mean and best fitness of the current population.
//! 2. **Select**: members with `fitness <= mean - selection_margin` enter the
//!    breeding pool in population order, up to `population_size` of them.
//! 3. **Breed**: while `i < pool.len() / 2`, cross `pool[i]` with `pool[2i]`,
//!    mutate the child, score it, and append it to the pool. The bound and
//!    the parent indices both see children appended earlier in the same
//!    pass.
//! 4. **Replace**: the pool becomes the next population.
//!
//! A pool of `n >= 2` survivors breeds `n - 1` children, and `2i` never
//! reaches past the end of the growing pool.
//!
//! When nobody beats the mean by the margin (a converged population) the
//! current population is carried over unchanged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::operators::{GeneticOperators, DEFAULT_MUTATION_PROBABILITY};
use super::population::{initialize_population, GenomeFitness, Population};
use crate::error::{Error, Result};
use crate::models::{ProblemModel, Time};
use crate::simulation::Simulator;

/// Evolution parameters.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Initial population size and cap on the breeding pool (default: 50).
    pub population_size: usize,
    /// Number of generations to run (default: 50).
    pub generations: usize,
    /// How far below the mean a member must be to survive (default: 0.7).
    pub selection_margin: f64,
    /// Swap probability per mutation (default: 1/9).
    pub mutation_probability: f64,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            selection_margin: 0.7,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_selection_margin(mut self, margin: f64) -> Self {
        self.selection_margin = margin;
        self
    }

    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::Config(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(Error::Config(format!(
                "mutation_probability must be between 0 and 1, got {}",
                self.mutation_probability
            )));
        }
        if !self.selection_margin.is_finite() {
            return Err(Error::Config(format!(
                "selection_margin must be finite, got {}",
                self.selection_margin
            )));
        }
        Ok(())
    }
}

/// Statistics for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (1-based).
    pub generation: usize,
    /// Members in the population.
    pub population_size: usize,
    /// Mean makespan.
    pub mean_fitness: f64,
    /// Lowest makespan.
    pub best_fitness: Time,
}

impl GenerationStats {
    /// Computes statistics for a non-empty population.
    pub fn from_population(generation: usize, population: &Population) -> Option<Self> {
        Some(Self {
            generation,
            population_size: population.len(),
            mean_fitness: population.mean_fitness()?,
            best_fitness: population.best_fitness()?,
        })
    }
}

/// Receives per-generation statistics as the search runs.
pub trait GenerationObserver {
    /// Called once per generation, before selection.
    fn on_generation(&mut self, stats: &GenerationStats) -> Result<()>;
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationStats) -> Result<()>,
{
    fn on_generation(&mut self, stats: &GenerationStats) -> Result<()> {
        self(stats)
    }
}

/// Outcome of a search run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best genome seen in any generation.
    pub best: GenomeFitness,
    /// Statistics per generation, in order.
    pub history: Vec<GenerationStats>,
    /// Population after the last generation.
    pub final_population: Population,
}

impl EvolutionResult {
    /// Lowest makespan found.
    pub fn best_fitness(&self) -> Time {
        self.best.fitness
    }

    /// Number of generations run.
    pub fn generations(&self) -> usize {
        self.history.len()
    }
}

/// Genetic search over one problem.
///
/// # Example
/// ```
/// use u_jobshop::ga::{EvolutionConfig, GeneticSearch};
/// use u_jobshop::models::Instance;
///
/// let problem = Instance::Example.problem().unwrap();
/// let config = EvolutionConfig::default().with_generations(5).with_seed(42);
/// let search = GeneticSearch::new(&problem, config).unwrap();
/// let result = search.run().unwrap();
/// assert!(result.best_fitness() >= problem.workload_lower_bound());
/// ```
#[derive(Debug, Clone)]
pub struct GeneticSearch<'a> {
    problem: &'a ProblemModel,
    config: EvolutionConfig,
    operators: GeneticOperators,
}

impl<'a> GeneticSearch<'a> {
    /// Creates a search after validating the configuration.
    pub fn new(problem: &'a ProblemModel, config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        let operators = GeneticOperators::new(config.mutation_probability);
        Ok(Self {
            problem,
            config,
            operators,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Runs with a generator built from the configured seed and no observer.
    pub fn run(&self) -> Result<EvolutionResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with(&mut rng, &mut |_: &GenerationStats| -> Result<()> { Ok(()) })
    }

    /// Runs the full search with a caller-owned generator.
    pub fn run_with<R, O>(&self, rng: &mut R, observer: &mut O) -> Result<EvolutionResult>
    where
        R: Rng,
        O: GenerationObserver + ?Sized,
    {
        log::info!(
            "starting search: {} jobs, {} machines, {} operations, population {}, {} generations",
            self.problem.job_count(),
            self.problem.machine_count(),
            self.problem.operation_count(),
            self.config.population_size,
            self.config.generations
        );

        let mut population = initialize_population(self.problem, self.config.population_size, rng)?;
        let mut best = population.best().cloned();
        let mut history = Vec::with_capacity(self.config.generations);

        for generation in 1..=self.config.generations {
            let stats = GenerationStats::from_population(generation, &population)
                .ok_or(Error::EmptyPopulation)?;
            log::debug!(
                "generation {}: size {}, mean {:.3}, best {}",
                stats.generation,
                stats.population_size,
                stats.mean_fitness,
                stats.best_fitness
            );
            observer.on_generation(&stats)?;

            population = self.next_generation(population, stats.mean_fitness, rng)?;
            if let Some(candidate) = population.best() {
                if best.as_ref().map_or(true, |b| candidate.fitness < b.fitness) {
                    best = Some(candidate.clone());
                }
            }
            history.push(stats);
        }

        let best = best.ok_or(Error::EmptyPopulation)?;
        log::info!(
            "search finished after {} generations, best makespan {} (lower bound {})",
            history.len(),
            best.fitness,
            self.problem.workload_lower_bound()
        );

        Ok(EvolutionResult {
            best,
            history,
            final_population: population,
        })
    }

    /// Selects survivors, breeds them, and returns the next population.
    pub fn next_generation<R: Rng>(
        &self,
        population: Population,
        mean_fitness: f64,
        rng: &mut R,
    ) -> Result<Population> {
        let pool = self.select(&population, mean_fitness);
        if pool.is_empty() {
            log::warn!(
                "no member beats mean {:.3} by {}; keeping population of {}",
                mean_fitness,
                self.config.selection_margin,
                population.len()
            );
            return Ok(population);
        }
        self.breed(pool, rng)
    }

    /// Members with `fitness <= mean - margin`, in order, capped at the
    /// population size.
    pub fn select(&self, population: &Population, mean_fitness: f64) -> Population {
        let threshold = mean_fitness - self.config.selection_margin;
        population
            .iter()
            .filter(|m| (m.fitness as f64) <= threshold)
            .take(self.config.population_size)
            .cloned()
            .collect()
    }

    /// Appends children to the pool, pairing `pool[i]` with `pool[2i]`.
    pub fn breed<R: Rng>(&self, pool: Population, rng: &mut R) -> Result<Population> {
        let simulator = Simulator::new(self.problem);
        let mut members = pool.into_members();

        let mut i = 0;
        while i < members.len() / 2 {
            let child = self
                .operators
                .breed(&members[i].genome, &members[2 * i].genome, rng);
            members.push(GenomeFitness::evaluate(child, &simulator)?);
            i += 1;
        }

        Ok(members.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Genome;
    use crate::models::Instance;
    use rand::rngs::SmallRng;
    use rand::RngCore;

    /// Every draw is zero, so both crossover cut points coincide and a child
    /// is an exact copy of its second parent.
    struct ConstantRng;

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn member(genes: Vec<usize>, fitness: Time) -> GenomeFitness {
        GenomeFitness {
            genome: Genome::from_genes(genes),
            fitness,
        }
    }

    #[test]
    fn test_default_config() {
        let c = EvolutionConfig::default();
        assert_eq!(c.population_size, 50);
        assert_eq!(c.generations, 50);
        assert_eq!(c.selection_margin, 0.7);
        assert_eq!(c.seed, None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(EvolutionConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
        assert!(EvolutionConfig::default()
            .with_mutation_probability(1.5)
            .validate()
            .is_err());
        assert!(EvolutionConfig::default()
            .with_selection_margin(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_select_threshold_and_order() {
        let p = Instance::Example.problem().unwrap();
        let search = GeneticSearch::new(&p, EvolutionConfig::default()).unwrap();
        let pop: Population = vec![
            member(vec![1], 12),
            member(vec![2], 9),
            member(vec![3], 10),
            member(vec![4], 9),
        ]
        .into_iter()
        .collect();
        // mean 10, threshold 9.3
        let pool = search.select(&pop, 10.0);
        let genes: Vec<_> = pool.iter().map(|m| m.genome.genes()[0]).collect();
        assert_eq!(genes, vec![2, 4]);
    }

    #[test]
    fn test_select_caps_pool() {
        let p = Instance::Example.problem().unwrap();
        let config = EvolutionConfig::default().with_population_size(2);
        let search = GeneticSearch::new(&p, config).unwrap();
        let pop: Population = (1..=5).map(|i| member(vec![i], 1)).collect();
        let pool = search.select(&pop, 100.0);
        let genes: Vec<_> = pool.iter().map(|m| m.genome.genes()[0]).collect();
        assert_eq!(genes, vec![1, 2]);
    }

    #[test]
    fn test_breed_grows_pool() {
        let p = Instance::Dataset.problem().unwrap();
        let search = GeneticSearch::new(&p, EvolutionConfig::default()).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        for n in 1..=10 {
            let pool = initialize_population(&p, n, &mut rng).unwrap();
            let next = search.breed(pool.clone(), &mut rng).unwrap();
            let expected = if n == 1 { 1 } else { 2 * n - 1 };
            assert_eq!(next.len(), expected, "pool of {n}");
            // Survivors keep their slots
            assert_eq!(&next.members()[..n], pool.members());
            let sim = Simulator::new(&p);
            for m in &next {
                assert_eq!(m.fitness, sim.makespan(&m.genome).unwrap());
            }
        }
    }

    #[test]
    fn test_breed_pairs_i_with_2i() {
        let p = Instance::Dataset.problem().unwrap();
        let config = EvolutionConfig::default().with_mutation_probability(0.0);
        let search = GeneticSearch::new(&p, config).unwrap();
        let sim = Simulator::new(&p);

        let canonical = Genome::canonical(&p);
        let pool: Population = (0..6)
            .map(|k| {
                let mut genes = canonical.genes().to_vec();
                genes.rotate_left(k);
                GenomeFitness::evaluate(Genome::from_genes(genes), &sim).unwrap()
            })
            .collect();
        for i in 0..6 {
            for j in i + 1..6 {
                assert_ne!(pool.members()[i].genome, pool.members()[j].genome);
            }
        }

        let next = search.breed(pool.clone(), &mut ConstantRng).unwrap();

        // Pairs (0,0) (1,2) (2,4) (3,6) (4,8). Slots 6 and 8 are children
        // appended earlier in the same pass.
        let origin = [0, 1, 2, 3, 4, 5, 0, 2, 4, 0, 4];
        assert_eq!(next.len(), origin.len());
        for (slot, &source) in origin.iter().enumerate() {
            assert_eq!(
                next.members()[slot].genome,
                pool.members()[source].genome,
                "slot {slot}"
            );
        }
    }

    #[test]
    fn test_converged_population_carried_over() {
        let p = Instance::Example.problem().unwrap();
        let search = GeneticSearch::new(&p, EvolutionConfig::default()).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let g = Genome::canonical(&p);
        let fitness = Simulator::new(&p).makespan(&g).unwrap();
        let pop: Population = (0..4)
            .map(|_| GenomeFitness {
                genome: g.clone(),
                fitness,
            })
            .collect();

        let next = search
            .next_generation(pop.clone(), fitness as f64, &mut rng)
            .unwrap();
        assert_eq!(next, pop);
    }

    #[test]
    fn test_run_is_reproducible() {
        let p = Instance::Dataset.problem().unwrap();
        let config = EvolutionConfig::default().with_generations(20).with_seed(7);
        let a = GeneticSearch::new(&p, config.clone()).unwrap().run().unwrap();
        let b = GeneticSearch::new(&p, config).unwrap().run().unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
        assert_eq!(a.generations(), 20);
    }

    #[test]
    fn test_run_reports_every_generation() {
        let p = Instance::Example.problem().unwrap();
        let config = EvolutionConfig::default().with_generations(10);
        let search = GeneticSearch::new(&p, config).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = Vec::new();
        let result = search
            .run_with(&mut rng, &mut |s: &GenerationStats| -> Result<()> {
                seen.push(s.generation);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
        let best_reported = result.history.iter().map(|s| s.best_fitness).min().unwrap();
        assert!(result.best_fitness() <= best_reported);
        assert!(result.best_fitness() >= p.workload_lower_bound());
        assert!(result.best.genome.validate(&p).is_ok());
    }

    #[test]
    fn test_observer_error_aborts_run() {
        let p = Instance::Example.problem().unwrap();
        let search = GeneticSearch::new(&p, EvolutionConfig::default()).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let result = search.run_with(&mut rng, &mut |s: &GenerationStats| -> Result<()> {
            if s.generation == 3 {
                Err(Error::Config("stop".into()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(Error::Config(msg)) if msg == "stop"));
    }
}
