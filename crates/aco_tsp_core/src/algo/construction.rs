use rand::Rng;

use crate::{DistanceMatrix, PheromoneMatrix, Tour};

/// Builds one ant's tour from a read-only view of the trail and distance tables.
///
/// Holds no mutable state, so one constructor can be shared by every ant of an
/// iteration as long as each ant brings its own RNG.
#[derive(Clone, Copy, Debug)]
pub struct TourConstructor<'a> {
    distances: &'a DistanceMatrix,
    pheromone: &'a PheromoneMatrix,
    alpha: f64,
    beta: f64,
}

impl<'a> TourConstructor<'a> {
    pub fn new(
        distances: &'a DistanceMatrix,
        pheromone: &'a PheromoneMatrix,
        alpha: f64,
        beta: f64,
    ) -> Self {
        debug_assert_eq!(distances.n(), pheromone.n());
        Self {
            distances,
            pheromone,
            alpha,
            beta,
        }
    }

    /// Starts at a uniformly random city and makes exactly `n - 1` selections.
    pub fn construct<R: Rng + ?Sized>(&self, rng: &mut R) -> Tour {
        let n = self.distances.n();
        let start = rng.random_range(0..n);

        let mut visited = vec![false; n];
        let mut path = Vec::with_capacity(n);
        let mut candidates = Vec::with_capacity(n);
        visited[start] = true;
        path.push(start);

        let mut current = start;
        while path.len() < n {
            candidates.clear();
            candidates.extend(
                (0..n)
                    .filter(|&city| !visited[city])
                    .map(|city| (city, self.score(current, city))),
            );

            current = select_next(&candidates, rng);
            visited[current] = true;
            path.push(current);
        }

        Tour::from_distances(path, self.distances)
    }

    /// `pheromone^alpha * (1 / distance)^beta`.
    #[inline]
    pub fn score(&self, from: usize, to: usize) -> f64 {
        let history = self.pheromone.get(from, to).powf(self.alpha);
        let heuristic = (1.0 / self.distances.get(from, to)).powf(self.beta);
        history * heuristic
    }
}

/// Roulette-wheel pick over `(city, score)` in the given order.
///
/// Infinite scores dominate: the pick is uniform among them. Otherwise a zero
/// (underflow) or non-finite sum falls back to a uniform pick over all candidates.
pub(crate) fn select_next<R: Rng + ?Sized>(candidates: &[(usize, f64)], rng: &mut R) -> usize {
    debug_assert!(!candidates.is_empty());

    let is_dominant = |&&(_, score): &&(usize, f64)| score == f64::INFINITY;
    let dominant = candidates.iter().filter(is_dominant).count();
    if dominant > 0 {
        let nth = rng.random_range(0..dominant);
        if let Some(&(city, _)) = candidates.iter().filter(is_dominant).nth(nth) {
            return city;
        }
    }

    let sum: f64 = candidates.iter().map(|&(_, score)| score).sum();
    if sum == 0.0 || !sum.is_finite() {
        return candidates[rng.random_range(0..candidates.len())].0;
    }

    let mut v: f64 = rng.random();
    for &(city, score) in candidates {
        v -= score / sum;
        if v <= 0.0 {
            return city;
        }
    }

    // rounding left a sliver of probability mass unclaimed
    candidates[candidates.len() - 1].0
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{TourConstructor, select_next};
    use crate::{City, DistanceMatrix, PheromoneMatrix};

    fn scattered_cities(n: usize) -> Vec<City> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                City::new((t * 7.3) % 31.0 + t * 0.01, (t * 3.9) % 17.0 + t * 0.02)
            })
            .collect()
    }

    fn assert_is_permutation(path: &[usize], n: usize) {
        let mut sorted = path.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn constructed_tours_are_permutations() {
        let cities = scattered_cities(25);
        let distances = DistanceMatrix::new(&cities);
        let pheromone = PheromoneMatrix::initialize(10, cities.len(), 100.0);
        let constructor = TourConstructor::new(&distances, &pheromone, 1.0, 2.0);

        for seed in 0..50 {
            let tour = constructor.construct(&mut StdRng::seed_from_u64(seed));
            assert_eq!(tour.len(), cities.len());
            assert_is_permutation(tour.path(), cities.len());
        }
    }

    #[test]
    fn constructed_tour_cost_matches_path() {
        let cities = scattered_cities(12);
        let distances = DistanceMatrix::new(&cities);
        let pheromone = PheromoneMatrix::initialize(5, cities.len(), 50.0);
        let constructor = TourConstructor::new(&distances, &pheromone, 5.0, 5.0);

        let tour = constructor.construct(&mut StdRng::seed_from_u64(3));
        let expected = crate::tour_cost(tour.path(), &cities);
        assert!((tour.cost() - expected).abs() < 1e-9);
    }

    #[test]
    fn two_city_instance_builds_a_round_trip() {
        let cities = vec![City::new(0.0, 0.0), City::new(0.0, 2.0)];
        let distances = DistanceMatrix::new(&cities);
        let pheromone = PheromoneMatrix::initialize(1, 2, 4.0);
        let tour = TourConstructor::new(&distances, &pheromone, 1.0, 1.0)
            .construct(&mut StdRng::seed_from_u64(11));

        assert_is_permutation(tour.path(), 2);
        assert_eq!(tour.cost(), 4.0);
    }

    #[test]
    fn same_seed_builds_same_tour() {
        let cities = scattered_cities(15);
        let distances = DistanceMatrix::new(&cities);
        let pheromone = PheromoneMatrix::initialize(5, cities.len(), 80.0);
        let constructor = TourConstructor::new(&distances, &pheromone, 1.0, 3.0);

        let a = constructor.construct(&mut StdRng::seed_from_u64(42));
        let b = constructor.construct(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn score_blends_trail_and_inverse_distance() {
        let cities = vec![City::new(0.0, 0.0), City::new(2.0, 0.0)];
        let distances = DistanceMatrix::new(&cities);
        let pheromone = PheromoneMatrix::initialize(3, 2, 1.0);
        let constructor = TourConstructor::new(&distances, &pheromone, 2.0, 3.0);

        // 3^2 * (1/2)^3
        assert!((constructor.score(0, 1) - 9.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn select_next_follows_score_proportions() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates = [(4, 1.0), (9, 3.0)];
        let draws = 20_000;

        let hits = (0..draws)
            .filter(|_| select_next(&candidates, &mut rng) == 9)
            .count();
        let share = hits as f64 / draws as f64;
        assert!((0.72..0.78).contains(&share), "share={share}");
    }

    #[test]
    fn select_next_never_picks_zero_score_when_others_are_positive() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = [(0, 0.0), (1, 2.0), (2, 0.0)];
        for _ in 0..1_000 {
            assert_eq!(select_next(&candidates, &mut rng), 1);
        }
    }

    #[test]
    fn select_next_falls_back_to_uniform_on_zero_sum() {
        let mut rng = StdRng::seed_from_u64(5);
        let candidates = [(3, 0.0), (5, 0.0), (8, 0.0)];
        let mut seen = [false; 3];

        for _ in 0..300 {
            let pick = select_next(&candidates, &mut rng);
            let slot = candidates
                .iter()
                .position(|&(city, _)| city == pick)
                .expect("pick is a candidate");
            seen[slot] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn select_next_prefers_infinite_scores_uniformly() {
        let mut rng = StdRng::seed_from_u64(13);
        let candidates = [(1, 2.0), (4, f64::INFINITY), (6, 5.0), (9, f64::INFINITY)];
        let mut seen_four = false;
        let mut seen_nine = false;

        for _ in 0..300 {
            match select_next(&candidates, &mut rng) {
                4 => seen_four = true,
                9 => seen_nine = true,
                other => panic!("picked finite-score city {other}"),
            }
        }
        assert!(seen_four && seen_nine);
    }

    #[test]
    fn underflowing_scores_still_yield_permutations() {
        let cities = scattered_cities(10);
        let distances = DistanceMatrix::new(&cities);
        let mut pheromone = PheromoneMatrix::initialize(1, cities.len(), 1e300);
        pheromone.evaporate(0.999_999);
        let constructor = TourConstructor::new(&distances, &pheromone, 50.0, 50.0);

        let tour = constructor.construct(&mut StdRng::seed_from_u64(9));
        assert_is_permutation(tour.path(), cities.len());
    }
}
