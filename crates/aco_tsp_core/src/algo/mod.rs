pub mod colony;
pub mod construction;
pub mod pheromone;
