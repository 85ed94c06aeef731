use crate::Tour;

/// Symmetric `n x n` trail strengths with a zero diagonal.
///
/// Ants only ever see `&PheromoneMatrix`; the colony holds the sole `&mut` and
/// applies [`evaporate`](Self::evaporate) then [`reinforce`](Self::reinforce)
/// once per iteration. Every mutation bumps [`generation`](Self::generation).
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    values: Vec<f64>,
    generation: u64,
}

impl PheromoneMatrix {
    /// Every off-diagonal entry starts at `num_ants / reference_cost`.
    pub fn initialize(num_ants: usize, num_cities: usize, reference_cost: f64) -> Self {
        let level = num_ants as f64 / reference_cost;
        let mut values = vec![level; num_cities * num_cities];
        for i in 0..num_cities {
            values[i * num_cities + i] = 0.0;
        }
        Self {
            n: num_cities,
            values,
            generation: 0,
        }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.n + to]
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Scales every entry by `1 - rate`, in place.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for value in &mut self.values {
            *value *= keep;
        }
        self.generation += 1;
    }

    /// Deposits `1 / cost` on both directions of every cyclic edge of every tour.
    pub fn reinforce<'a>(&mut self, tours: impl IntoIterator<Item = &'a Tour>) {
        let n = self.n;
        for tour in tours {
            let deposit = 1.0 / tour.cost();
            for (x, y) in tour.edges() {
                self.values[x * n + y] += deposit;
                self.values[y * n + x] += deposit;
            }
        }
        self.generation += 1;
    }

    /// Sum of all entries; handy for tracing trail mass.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::PheromoneMatrix;
    use crate::{City, Tour};

    fn square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ]
    }

    fn assert_symmetric_zero_diagonal(matrix: &PheromoneMatrix) {
        for i in 0..matrix.n() {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..matrix.n() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i), "({i},{j})");
                assert!(matrix.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn initialize_scales_by_colony_size_and_reference_cost() {
        let matrix = PheromoneMatrix::initialize(10, 4, 8.0);

        assert_eq!(matrix.n(), 4);
        assert_eq!(matrix.get(0, 1), 1.25);
        assert_eq!(matrix.get(3, 2), 1.25);
        assert_eq!(matrix.generation(), 0);
        assert_symmetric_zero_diagonal(&matrix);
    }

    #[test]
    fn evaporate_writes_back_into_every_cell() {
        let mut matrix = PheromoneMatrix::initialize(4, 3, 2.0);
        let before = matrix.clone();

        matrix.evaporate(0.25);

        for i in 0..3 {
            for j in 0..3 {
                assert!((matrix.get(i, j) - before.get(i, j) * 0.75).abs() < 1e-12);
            }
        }
        assert_eq!(matrix.generation(), 1);
        assert_symmetric_zero_diagonal(&matrix);
    }

    #[test]
    fn zero_evaporation_keeps_values() {
        let mut matrix = PheromoneMatrix::initialize(4, 3, 2.0);
        let before = matrix.clone();
        matrix.evaporate(0.0);
        assert_eq!(matrix.total(), before.total());
    }

    #[test]
    fn reinforce_deposits_inverse_cost_on_cyclic_edges() {
        let cities = square();
        let mut matrix = PheromoneMatrix::initialize(1, 4, 1.0);
        let base = matrix.get(0, 1);

        let tour = Tour::new(vec![0, 1, 2, 3], &cities);
        matrix.reinforce([&tour]);

        for (x, y) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            assert!((matrix.get(x, y) - base - 0.25).abs() < 1e-12);
        }
        assert!((matrix.get(0, 2) - base).abs() < 1e-12);
        assert_symmetric_zero_diagonal(&matrix);
    }

    #[test]
    fn shorter_tours_deposit_more() {
        let cities = square();
        let square_tour = Tour::new(vec![0, 1, 2, 3], &cities);
        let crossed_tour = Tour::new(vec![0, 2, 1, 3], &cities);

        let mut matrix = PheromoneMatrix::initialize(1, 4, 1.0);
        matrix.evaporate(0.5);
        let base = matrix.get(0, 1);
        matrix.reinforce([&square_tour, &crossed_tour]);

        let on_square_only = matrix.get(1, 2) - base;
        let on_crossed_only = matrix.get(0, 2) - base;
        assert!(on_square_only > on_crossed_only);
        assert_symmetric_zero_diagonal(&matrix);
    }

    #[test]
    fn reinforce_with_no_tours_still_advances_generation() {
        let mut matrix = PheromoneMatrix::initialize(1, 2, 1.0);
        matrix.reinforce(std::iter::empty());
        assert_eq!(matrix.generation(), 1);
    }
}
