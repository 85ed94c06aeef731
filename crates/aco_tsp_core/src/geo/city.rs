use std::fmt;

/// A city on the Euclidean plane. Cities are identified by their position in
/// the instance, `0..n`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `rhs`.
    #[inline]
    pub fn dist(self, rhs: &Self) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn coincides(self, rhs: &Self) -> bool {
        self.x == rhs.x && self.y == rhs.y
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bx = ryu::Buffer::new();
        let mut by = ryu::Buffer::new();
        write!(f, "{} {}", bx.format(self.x), by.format(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::City;

    #[test]
    fn dist_is_euclidean() {
        let a = City::new(0.0, 0.0);
        let b = City::new(3.0, 4.0);
        assert!((a.dist(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn dist_is_symmetric_and_zero_for_same_point() {
        let a = City::new(12.5, -3.0);
        let b = City::new(-7.25, 40.0);
        assert!((a.dist(&b) - b.dist(&a)).abs() < 1e-12);
        assert_eq!(a.dist(&a), 0.0);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert!(City::new(1.0, 2.0).is_finite());
        assert!(!City::new(f64::NAN, 2.0).is_finite());
        assert!(!City::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn display_formats_as_x_space_y() {
        assert_eq!(City::new(1.5, -2.25).to_string(), "1.5 -2.25");
    }
}
