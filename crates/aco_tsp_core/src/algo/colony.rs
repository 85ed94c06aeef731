use std::iter;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;

use crate::{
    ColonyConfig, DistanceMatrix, Error, Instance, PheromoneMatrix, ReinforcementPolicy, Result,
    Tour, TourConstructor,
};

/// Lowest-cost tour seen so far. Only replaced by a strictly cheaper tour.
#[derive(Clone, Debug, PartialEq)]
pub struct BestSolution {
    tour: Tour,
    /// Zero-based iteration that produced the tour; `None` for the random reference tour.
    found_at: Option<usize>,
}

impl BestSolution {
    fn seeded(reference: Tour) -> Self {
        Self {
            tour: reference,
            found_at: None,
        }
    }

    fn offer(&mut self, candidate: &Tour, iteration: usize) -> bool {
        if candidate.cost() < self.tour.cost() {
            self.tour = candidate.clone();
            self.found_at = Some(iteration);
            true
        } else {
            false
        }
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn cost(&self) -> f64 {
        self.tour.cost()
    }

    pub fn found_at(&self) -> Option<usize> {
        self.found_at
    }
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub best: BestSolution,
    /// Cost of the random tour that seeded the trail levels.
    pub reference_cost: f64,
    /// Best cost after each iteration; non-increasing, one entry per iteration.
    pub history: Vec<f64>,
}

impl SearchOutcome {
    pub fn tour(&self) -> &Tour {
        self.best.tour()
    }

    pub fn cost(&self) -> f64 {
        self.best.cost()
    }
}

/// Runs the colony loop over a validated instance.
///
/// Each iteration builds `num_ants` tours in parallel against the same trail
/// snapshot, then evaporates and reinforces on the calling thread. Every ant
/// draws from its own `StdRng`, seeded from the search's master stream, so a
/// given seed produces the same result for any thread count.
pub struct ColonySearch<'a> {
    instance: &'a Instance,
    config: ColonyConfig,
    distances: DistanceMatrix,
}

impl<'a> ColonySearch<'a> {
    pub fn new(instance: &'a Instance, config: ColonyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instance,
            distances: DistanceMatrix::new(instance.cities()),
            config,
        })
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SearchOutcome> {
        let threads = self.config.worker_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

        log::info!(
            "colony: start n={} ants={} iterations={} reinforcement={} threads={threads}",
            self.instance.n(),
            self.config.num_ants,
            self.config.max_iterations,
            self.config.reinforcement,
        );

        let outcome = pool.install(|| self.iterate());

        log::info!(
            "colony: complete best={:.4} found_at={} reference={:.4}",
            outcome.cost(),
            outcome
                .best
                .found_at()
                .map_or_else(|| String::from("reference"), |i| (i + 1).to_string()),
            outcome.reference_cost,
        );

        Ok(outcome)
    }

    fn iterate(&self) -> SearchOutcome {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        let reference = self.reference_tour(&mut rng);
        let reference_cost = reference.cost();
        let mut pheromone =
            PheromoneMatrix::initialize(cfg.num_ants, self.instance.n(), reference_cost);
        let mut best = BestSolution::seeded(reference);
        let mut history = Vec::with_capacity(cfg.max_iterations);

        log::debug!("colony: reference_cost={reference_cost:.4}");

        for iteration in 0..cfg.max_iterations {
            let tours = self.construct_population(&pheromone, &mut rng);

            let mut iteration_best = f64::INFINITY;
            for (ant, tour) in tours.iter().enumerate() {
                log::trace!(
                    "colony.ant: iteration={} ant={} cost={:.4}",
                    iteration + 1,
                    ant + 1,
                    tour.cost()
                );
                iteration_best = iteration_best.min(tour.cost());
                if best.offer(tour, iteration) {
                    log::debug!(
                        "colony: improved iteration={} ant={} best={:.4}",
                        iteration + 1,
                        ant + 1,
                        best.cost()
                    );
                }
            }

            update_trails(&mut pheromone, cfg, &tours, best.tour());

            history.push(best.cost());
            log::debug!(
                "colony: iteration={}/{} iteration_best={iteration_best:.4} best={:.4} pheromone_generation={}",
                iteration + 1,
                cfg.max_iterations,
                best.cost(),
                pheromone.generation(),
            );
        }

        SearchOutcome {
            best,
            reference_cost,
            history,
        }
    }

    /// Uniform random permutation of all cities.
    fn reference_tour(&self, rng: &mut StdRng) -> Tour {
        let mut path: Vec<usize> = (0..self.instance.n()).collect();
        path.shuffle(rng);
        Tour::from_distances(path, &self.distances)
    }

    fn construct_population(&self, pheromone: &PheromoneMatrix, rng: &mut StdRng) -> Vec<Tour> {
        let constructor = TourConstructor::new(
            &self.distances,
            pheromone,
            self.config.alpha,
            self.config.beta,
        );

        generate_seeds(rng, self.config.num_ants)
            .into_par_iter()
            .map(|seed| constructor.construct(&mut StdRng::seed_from_u64(seed)))
            .collect()
    }
}

/// Validates `config` and runs one search over `instance`.
pub fn solve(instance: &Instance, config: ColonyConfig) -> Result<SearchOutcome> {
    ColonySearch::new(instance, config)?.run()
}

/// Evaporates, then deposits along this iteration's tours. Under
/// [`ReinforcementPolicy::Elitist`] the best tour so far deposits once more.
fn update_trails(
    pheromone: &mut PheromoneMatrix,
    config: &ColonyConfig,
    tours: &[Tour],
    best: &Tour,
) {
    pheromone.evaporate(config.evaporation_rate);
    match config.reinforcement {
        ReinforcementPolicy::AntSystem => pheromone.reinforce(tours),
        ReinforcementPolicy::Elitist => pheromone.reinforce(tours.iter().chain(iter::once(best))),
    }
}

fn generate_seeds(rng: &mut StdRng, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.random::<u64>()).collect()
}
