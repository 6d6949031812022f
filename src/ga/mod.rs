//! GA-based job-shop search.
//!
//! Genomes are operation sequences scored by the machine simulator in
//! [`crate::simulation`]; the evolution loop keeps members that beat the
//! population mean and breeds them with a tail-relocating crossover and a
//! low-rate swap mutation.
//!
//! # Encoding
//!
//! Permutation with repetition: the k-th occurrence of job `j` stands for
//! the k-th task of `j`.
//!
//! # Submodules
//!
//! - [`operators`]: crossover and mutation
//!
//! # Reference
//! - Cheng et al. (1996), "A Tutorial Survey of JSSP using GA"
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

mod evolution;
mod genome;
pub mod operators;
mod population;

pub use evolution::{
    EvolutionConfig, EvolutionResult, GenerationObserver, GenerationStats, GeneticSearch,
};
pub use genome::Genome;
pub use operators::{swap_mutation, tail_crossover, GeneticOperators};
pub use population::{initialize_population, GenomeFitness, Population};
