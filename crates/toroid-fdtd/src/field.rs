//! Electric and magnetic field samples around the ring
//!
//! E lives on integer cells, H on half cells: `h[i]` sits between
//! `e[i - 1]` and `e[i]` (with `h[0]` between `e[N - 1]` and `e[0]`).

/// Field arrays for one trial
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub e: Vec<f64>,
    pub h: Vec<f64>,
}

impl FieldState {
    /// Quiescent ring of `n` cells
    pub fn new(n: usize) -> Self {
        Self {
            e: vec![0.0; n],
            h: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.e.len()
    }

    pub fn is_empty(&self) -> bool {
        self.e.is_empty()
    }

    /// Total field energy Σ(E² + H²)
    pub fn energy(&self) -> f64 {
        self.e.iter().chain(self.h.iter()).map(|v| v * v).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.e.iter().chain(self.h.iter()).all(|v| v.is_finite())
    }

    /// Shortest distance between two cells going either way around the ring
    #[inline]
    pub fn ring_distance(&self, a: usize, b: usize) -> usize {
        let n = self.len();
        let d = a.abs_diff(b) % n;
        d.min(n - d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_quiet() {
        let field = FieldState::new(8);
        assert_eq!(field.len(), 8);
        assert_eq!(field.energy(), 0.0);
        assert!(field.is_finite());
    }

    #[test]
    fn test_energy_sums_both_components() {
        let mut field = FieldState::new(4);
        field.e[1] = 2.0;
        field.h[3] = -1.0;
        assert_eq!(field.energy(), 5.0);

        field.h[0] = f64::NAN;
        assert!(!field.is_finite());
    }

    #[test]
    fn test_ring_distance_wraps() {
        let field = FieldState::new(10);
        assert_eq!(field.ring_distance(0, 9), 1);
        assert_eq!(field.ring_distance(2, 7), 5);
        assert_eq!(field.ring_distance(3, 3), 0);
        assert_eq!(field.ring_distance(8, 1), 3);
    }
}
