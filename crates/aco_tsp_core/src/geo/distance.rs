use crate::City;

/// Euclidean distance between two cities.
#[inline]
pub fn distance(a: &City, b: &City) -> f64 {
    a.dist(b)
}

/// Total cyclic length of `path`, including the closing edge back to the first city.
///
/// Walks consecutive pairs by position; runs in O(n).
pub fn tour_cost(path: &[usize], cities: &[City]) -> f64 {
    let Some(&first) = path.first() else {
        return 0.0;
    };
    let open: f64 = path
        .windows(2)
        .map(|pair| distance(&cities[pair[0]], &cities[pair[1]]))
        .sum();
    let last = path[path.len() - 1];
    open + distance(&cities[last], &cities[first])
}

/// Dense row-major `n x n` table of pairwise distances, computed once per search.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(cities: &[City]) -> Self {
        let n = cities.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(&cities[i], &cities[j]);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        Self { n, values }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.n + to]
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::{DistanceMatrix, tour_cost};
    use crate::City;

    fn unit_square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(1.0, 0.0),
            City::new(1.0, 1.0),
            City::new(0.0, 1.0),
        ]
    }

    #[test]
    fn tour_cost_closes_the_cycle() {
        let cities = unit_square();
        assert_eq!(tour_cost(&[0, 1, 2, 3], &cities), 4.0);
    }

    #[test]
    fn tour_cost_counts_diagonals() {
        let cities = unit_square();
        let expected = 2.0 + 2.0 * 2.0_f64.sqrt();
        assert!((tour_cost(&[0, 2, 1, 3], &cities) - expected).abs() < 1e-12);
    }

    #[test]
    fn tour_cost_is_invariant_under_rotation_and_reversal() {
        let cities = vec![
            City::new(0.0, 0.0),
            City::new(5.0, 1.0),
            City::new(7.5, 4.0),
            City::new(2.0, 9.0),
            City::new(-3.0, 4.5),
        ];
        let path = vec![0, 3, 1, 4, 2];
        let base = tour_cost(&path, &cities);

        for shift in 0..path.len() {
            let mut rotated = path.clone();
            rotated.rotate_left(shift);
            assert!((tour_cost(&rotated, &cities) - base).abs() < 1e-9);

            rotated.reverse();
            assert!((tour_cost(&rotated, &cities) - base).abs() < 1e-9);
        }
    }

    #[test]
    fn tour_cost_of_two_cities_is_a_round_trip() {
        let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
        assert!((tour_cost(&[1, 0], &cities) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn tour_cost_of_empty_path_is_zero() {
        assert_eq!(tour_cost(&[], &unit_square()), 0.0);
    }

    #[test]
    fn distance_matrix_is_symmetric_with_zero_diagonal() {
        let cities = unit_square();
        let matrix = DistanceMatrix::new(&cities);

        assert_eq!(matrix.n(), 4);
        for i in 0..4 {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..4 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!((matrix.get(0, 2) - 2.0_f64.sqrt()).abs() < 1e-12);
    }
}
