//! Run configuration.
//!
//! A run needs a problem and evolution parameters. Both can come from a
//! TOML file:
//!
//! ```toml
//! # either a built-in instance ...
//! instance = "example"
//! # ... or a problem file (relative to this file)
//! # problem = "shop.toml"
//!
//! [evolution]
//! population_size = 50
//! generations = 50
//! selection_margin = 0.7
//! seed = 42
//! ```
//!
//! With neither `instance` nor `problem` the `dataset` instance is used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ga::EvolutionConfig;
use crate::models::{Instance, ProblemModel};

/// Where the problem comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemSource {
    /// A built-in instance.
    Instance(Instance),
    /// A TOML problem file.
    File(PathBuf),
}

impl ProblemSource {
    /// Builds or loads the problem.
    pub fn load(&self) -> Result<ProblemModel> {
        match self {
            ProblemSource::Instance(instance) => instance.problem(),
            ProblemSource::File(path) => {
                log::debug!("loading problem from {}", path.display());
                ProblemModel::from_file(path)
            }
        }
    }
}

/// Complete configuration of one search run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Built-in instance name.
    pub instance: Option<Instance>,
    /// Path to a TOML problem file.
    pub problem: Option<PathBuf>,
    /// Evolution parameters.
    pub evolution: EvolutionConfig,
}

impl RunConfig {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file. A relative `problem` path is resolved
    /// against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;
        if let (Some(problem), Some(dir)) = (config.problem.as_mut(), path.parent()) {
            if problem.is_relative() {
                *problem = dir.join(&*problem);
            }
        }
        log::debug!("loaded run configuration from {}", path.display());
        Ok(config)
    }

    /// Checks that at most one problem source is given and that the
    /// evolution parameters are in range.
    pub fn validate(&self) -> Result<()> {
        if self.instance.is_some() && self.problem.is_some() {
            return Err(Error::Config(
                "set either 'instance' or 'problem', not both".to_string(),
            ));
        }
        self.evolution.validate()
    }

    /// The configured problem source.
    pub fn source(&self) -> ProblemSource {
        match (&self.problem, self.instance) {
            (Some(path), _) => ProblemSource::File(path.clone()),
            (None, Some(instance)) => ProblemSource::Instance(instance),
            (None, None) => ProblemSource::Instance(Instance::default()),
        }
    }

    /// Loads the configured problem.
    pub fn load_problem(&self) -> Result<ProblemModel> {
        self.source().load()
    }
}
