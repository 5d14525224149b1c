//! Workspace transform accumulator.
//!
//! Drawn geometry is mapped through an accumulated 2D homogeneous
//! transform before sampling. New transforms compose on the left, so the
//! most recently added transform is applied last.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

// Internal
use util::maths::deg_to_rad;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Accumulated workspace transform as a 3x3 homogeneous matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformAccumulator {
    tm: Matrix3<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TransformAccumulator {
    /// A new accumulator holding the identity transform.
    pub fn new() -> Self {
        TransformAccumulator {
            tm: Matrix3::identity(),
        }
    }

    /// Reset the accumulator to the identity transform.
    pub fn reset(&mut self) {
        self.tm = Matrix3::identity();
    }

    /// Compose a rotation about the origin, angle in degrees.
    pub fn add_rotation(&mut self, deg: f64) {
        let theta = deg_to_rad(deg);
        let (s, c) = theta.sin_cos();

        #[rustfmt::skip]
        let m = Matrix3::new(
            c, -s, 0.0,
            s,  c, 0.0,
            0.0, 0.0, 1.0,
        );

        self.tm = m * self.tm;
    }

    /// Compose a translation.
    pub fn add_translation(&mut self, dx: f64, dy: f64) {
        #[rustfmt::skip]
        let m = Matrix3::new(
            1.0, 0.0, dx,
            0.0, 1.0, dy,
            0.0, 0.0, 1.0,
        );

        self.tm = m * self.tm;
    }

    /// Compose an axis-aligned scaling about the origin.
    pub fn add_scaling(&mut self, sx: f64, sy: f64) {
        #[rustfmt::skip]
        let m = Matrix3::new(
            sx, 0.0, 0.0,
            0.0, sy, 0.0,
            0.0, 0.0, 1.0,
        );

        self.tm = m * self.tm;
    }

    /// Map a workspace point through the accumulated transform.
    pub fn apply(&self, point: &Vector2<f64>) -> Vector2<f64> {
        let mapped = self.tm * Vector3::new(point.x, point.y, 1.0);
        Vector2::new(mapped.x, mapped.y)
    }

    /// The accumulated matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.tm
    }
}

impl Default for TransformAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn assert_point(p: Vector2<f64>, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-9, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_identity() {
        let acc = TransformAccumulator::new();
        assert_point(acc.apply(&Vector2::new(3.0, 4.0)), 3.0, 4.0);
    }

    #[test]
    fn test_rotation() {
        let mut acc = TransformAccumulator::new();
        acc.add_rotation(90.0);
        assert_point(acc.apply(&Vector2::new(1.0, 0.0)), 0.0, 1.0);
    }

    #[test]
    fn test_composition_order() {
        // Later transforms apply after earlier ones: translate then rotate
        // moves the translated point around the origin.
        let mut acc = TransformAccumulator::new();
        acc.add_translation(1.0, 0.0);
        acc.add_rotation(90.0);
        assert_point(acc.apply(&Vector2::new(0.0, 0.0)), 0.0, 1.0);

        // The opposite order leaves the origin translated only.
        let mut acc = TransformAccumulator::new();
        acc.add_rotation(90.0);
        acc.add_translation(1.0, 0.0);
        assert_point(acc.apply(&Vector2::new(0.0, 0.0)), 1.0, 0.0);
    }

    #[test]
    fn test_scaling_and_reset() {
        let mut acc = TransformAccumulator::new();
        acc.add_scaling(2.0, 0.5);
        assert_point(acc.apply(&Vector2::new(4.0, 4.0)), 8.0, 2.0);

        acc.reset();
        assert_point(acc.apply(&Vector2::new(4.0, 4.0)), 4.0, 4.0);
        assert_eq!(*acc.matrix(), Matrix3::identity());
    }
}
