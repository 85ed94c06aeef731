use crate::{City, DistanceMatrix, tour_cost};

/// A closed tour: a permutation of `0..n` read as a cycle, with its cyclic length.
///
/// `cost` is derived from `path` at construction and the path is never mutated
/// afterwards, so the two cannot drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    path: Vec<usize>,
    cost: f64,
}

impl Tour {
    pub fn new(path: Vec<usize>, cities: &[City]) -> Self {
        let cost = tour_cost(&path, cities);
        Self { path, cost }
    }

    pub(crate) fn from_distances(path: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let cost = cyclic_edges(&path).map(|(x, y)| distances.get(x, y)).sum();
        Self { path, cost }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Every edge of the cycle in visiting order, ending with `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        cyclic_edges(&self.path)
    }

    /// Cities in visiting order.
    pub fn points<'a>(&'a self, cities: &'a [City]) -> impl Iterator<Item = &'a City> + 'a {
        self.path.iter().map(move |&idx| &cities[idx])
    }

    pub fn metrics(&self, cities: &[City]) -> TourMetrics {
        let n = self.len();

        if n < 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return TourMetrics::default();
        }

        let (total, longest) = self
            .edges()
            .map(|(x, y)| cities[x].dist(&cities[y]))
            .fold((0.0_f64, 0.0_f64), |(total, longest), d| {
                (total + d, longest.max(d))
            });
        let average = total / n as f64;

        log::info!("metrics: n={n} total={total:.4} longest_edge={longest:.4} avg_edge={average:.4}");

        TourMetrics {
            total,
            longest,
            average,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

pub(crate) fn cyclic_edges(path: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    path.iter()
        .copied()
        .zip(path.iter().copied().cycle().skip(1))
}
