use std::thread;

use aco_tsp_derive::{CliValue, KvDisplay};

use crate::{Error, Result, options::SolverOptions};

pub(crate) const DEFAULT_MAX_ITERATIONS: usize = 500;
pub(crate) const DEFAULT_NUM_ANTS: usize = 200;
pub(crate) const DEFAULT_EVAPORATION_RATE: f64 = 0.6;
pub(crate) const DEFAULT_ALPHA: f64 = 5.0;
pub(crate) const DEFAULT_BETA: f64 = 5.0;
pub(crate) const DEFAULT_SEED: u64 = 12_345;

const THREAD_FALLBACK_PARALLELISM: usize = 2;
const THREAD_MIN_PARALLELISM: usize = 2;
const THREAD_RESERVED_CORES: usize = 1;

/// Which tours deposit pheromone at the end of an iteration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "reinforcement")]
pub enum ReinforcementPolicy {
    /// Only the tours built during the iteration (classic Ant System).
    #[default]
    #[cli(alias = "as")]
    AntSystem,
    /// The iteration's tours plus the best tour found so far.
    #[cli(alias = "eas")]
    Elitist,
}

/// Immutable parameters of one colony search.
#[derive(Clone, Debug, PartialEq, KvDisplay)]
pub struct ColonyConfig {
    pub max_iterations: usize,
    pub num_ants: usize,
    /// ρ in `[0, 1)`.
    pub evaporation_rate: f64,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Distance-bias exponent.
    pub beta: f64,
    pub reinforcement: ReinforcementPolicy,
    pub seed: u64,
    /// Worker threads for tour construction; `0` picks one per spare core.
    pub threads: usize,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ITERATIONS,
            DEFAULT_NUM_ANTS,
            DEFAULT_EVAPORATION_RATE,
            DEFAULT_ALPHA,
            DEFAULT_BETA,
        )
    }
}

impl ColonyConfig {
    pub fn new(
        max_iterations: usize,
        num_ants: usize,
        evaporation_rate: f64,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            max_iterations,
            num_ants,
            evaporation_rate,
            alpha,
            beta,
            reinforcement: ReinforcementPolicy::AntSystem,
            seed: DEFAULT_SEED,
            threads: 0,
        }
    }

    pub fn with_reinforcement(mut self, reinforcement: ReinforcementPolicy) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::invalid_configuration("max_iterations must be > 0"));
        }
        if self.num_ants == 0 {
            return Err(Error::invalid_configuration("num_ants must be > 0"));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(Error::invalid_configuration(format!(
                "evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_configuration(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Resolved size of the construction thread pool.
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(THREAD_FALLBACK_PARALLELISM)
            .max(THREAD_MIN_PARALLELISM)
            - THREAD_RESERVED_CORES
    }
}

impl TryFrom<&SolverOptions> for ColonyConfig {
    type Error = Error;

    fn try_from(options: &SolverOptions) -> Result<Self> {
        let config = Self::new(
            options.iterations,
            options.ants,
            options.evaporation_rate,
            options.alpha,
            options.beta,
        )
        .with_reinforcement(options.reinforcement)
        .with_seed(options.seed)
        .with_threads(options.threads);
        config.validate()?;
        Ok(config)
    }
}
