//! Ant colony optimization for the symmetric traveling salesman problem.
//!
//! A colony of ants builds tours city by city, biased by a shared pheromone
//! matrix and by inverse distance. After each iteration the matrix evaporates
//! and is reinforced along the iteration's tours, so short edges accumulate
//! trail and the search converges.

mod algo;
mod config;
mod error;
mod geo;
mod io;
pub mod logging;
mod tour;

pub(crate) use io::options;

pub use algo::colony::{BestSolution, ColonySearch, SearchOutcome, solve};
pub use algo::construction::TourConstructor;
pub use algo::pheromone::PheromoneMatrix;
pub use config::{ColonyConfig, ReinforcementPolicy};
pub use error::{Error, Result};
pub use geo::city::City;
pub use geo::distance::{DistanceMatrix, distance, tour_cost};
pub use io::instance::{Instance, parse_instance};
pub use io::options::{LogFormat, LogLevel, SolverOptions};
pub use io::output::{write_tour, write_tour_to};
pub use tour::{Tour, TourMetrics};
