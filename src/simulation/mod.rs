//! Discrete-event evaluation of genomes.
//!
//! The simulator turns a genome into a makespan by running every machine
//! tick by tick: operations wait in per-machine FIFO queues (genome order)
//! and start once their job predecessor has finished.
//!
//! The simulation is a pure function of `(problem, genome)`; it is the GA's
//! fitness function.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7
//! - Cheng et al. (1996), "A Tutorial Survey of JSSP using GA"

mod engine;
mod machine;

pub use engine::{simulate, Simulator};
