use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_jobshop::config::{ProblemSource, RunConfig};
use u_jobshop::ga::GeneticSearch;
use u_jobshop::models::Instance;
use u_jobshop::report::{schedule_summary, CsvReporter};
use u_jobshop::simulation::Simulator;

/// Genetic search for low-makespan job-shop schedules.
///
/// Prints one CSV line per generation to stdout. Set RUST_LOG for diagnostics.
#[derive(Parser, Debug)]
#[command(name = "jobshop-ga", version, about, long_about = None)]
struct Cli {
    /// Built-in problem instance (example, dataset)
    #[arg(long, conflicts_with = "problem")]
    instance: Option<Instance>,

    /// TOML problem file
    #[arg(long, value_name = "FILE")]
    problem: Option<PathBuf>,

    /// TOML run configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,

    /// Initial population size and breeding pool cap
    #[arg(long)]
    population: Option<usize>,
}

impl Cli {
    /// Config file values, overridden by flags.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(instance) = self.instance {
            config.instance = Some(instance);
            config.problem = None;
        }
        if let Some(problem) = &self.problem {
            config.problem = Some(problem.clone());
            config.instance = None;
        }
        if let Some(seed) = self.seed {
            config.evolution.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            config.evolution.generations = generations;
        }
        if let Some(population) = self.population {
            config.evolution.population_size = population;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.run_config()?;

    let source = config.source();
    let problem = config
        .load_problem()
        .with_context(|| match &source {
            ProblemSource::Instance(instance) => format!("failed to build instance {instance}"),
            ProblemSource::File(path) => format!("failed to load problem {}", path.display()),
        })?;

    let seed = config.evolution.seed.unwrap_or_else(rand::random);
    log::info!("using seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let search = GeneticSearch::new(&problem, config.evolution)?;
    let stdout = io::stdout();
    let mut reporter = CsvReporter::new(BufWriter::new(stdout.lock()))?;
    let result = search.run_with(&mut rng, &mut reporter)?;
    reporter.into_inner()?;

    log::info!(
        "best makespan {} with genome {:?}",
        result.best_fitness(),
        result.best.genome.genes()
    );
    let schedule = Simulator::new(&problem).schedule(&result.best.genome)?;
    for line in schedule_summary(&problem, &schedule) {
        log::info!("{line}");
    }
    Ok(())
}
