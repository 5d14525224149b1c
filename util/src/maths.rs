//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert an angle in degrees into radians.
pub fn deg_to_rad<T: Float>(ang_deg: T) -> T {
    ang_deg.to_radians()
}

/// Convert an angle in radians into degrees.
pub fn rad_to_deg<T: Float>(ang_rad: T) -> T {
    ang_rad.to_degrees()
}

/// Get the integer nearest to the given value (6.2 gives 6, -7.9 gives -8).
pub fn nint(d: f64) -> i64 {
    (d + 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nint() {
        assert_eq!(nint(6.2), 6);
        assert_eq!(nint(6.5), 7);
        assert_eq!(nint(-7.9), -8);
        assert_eq!(nint(0.0), 0);
    }

    #[test]
    fn test_angle_conversions() {
        assert!((deg_to_rad(180.0_f64) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad_to_deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }
}
