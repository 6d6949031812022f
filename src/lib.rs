//! Job-shop scheduling by genetic search.
//!
//! Candidate schedules are encoded as operation sequences and scored by a
//! discrete-event simulation of the machines: the makespan of the simulated
//! run is the fitness, lower is better.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Job`, `Operation`, `ProblemModel`,
//!   `Schedule`, and the built-in `Instance`s
//! - **`validation`**: Problem integrity checks (empty jobs, machine refs)
//! - **`simulation`**: Tick-based machine simulator (fitness function)
//! - **`ga`**: Genome, operators, population, evolution loop
//! - **`config`**: TOML run configuration
//! - **`report`**: CSV progress output
//!
//! # Example
//!
//! ```
//! use u_jobshop::ga::{EvolutionConfig, GeneticSearch};
//! use u_jobshop::models::Instance;
//!
//! let problem = Instance::Dataset.problem().unwrap();
//! let config = EvolutionConfig::default().with_seed(1);
//! let result = GeneticSearch::new(&problem, config).unwrap().run().unwrap();
//! println!("best makespan: {}", result.best_fitness());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Cheng et al. (1996), "A Tutorial Survey of JSSP using GA"

pub mod config;
pub mod error;
pub mod ga;
pub mod models;
pub mod report;
pub mod simulation;
pub mod validation;

pub use error::{Error, InvalidGenomeError, Result};
