//! # Path sampler
//!
//! Converts drawn geometry (lines, arcs and the shapes built from them)
//! into workspace waypoints, then resolves those waypoints into joint
//! angles in a single arm configuration.
//!
//! Sampling density is set by the commanded [`Resolution`]: the number of
//! interior points scales with path length relative to the manipulator's
//! maximum reach.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Internal
use crate::kin::{self, ArmConfig, JointAngles, L_MAX};
use scara_if::eqpt::Resolution;
use util::maths::{deg_to_rad, nint};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A sampled path resolved into joint space.
///
/// All waypoints share one arm configuration, chosen when the path is
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPath {
    /// Joint angles of each waypoint, in path order.
    pub joints: Vec<JointAngles>,

    /// The arm configuration the whole path is executed in.
    pub config: ArmConfig,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with resolving a path.
#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("The path cannot be executed in either arm configuration")]
    Unreachable,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Number of sample points per unit of normalised path length.
pub fn sample_density(res: Resolution) -> f64 {
    match res {
        Resolution::Low => 10.0,
        Resolution::Medium => 20.0,
        Resolution::High => 40.0,
    }
}

/// Number of interior sample points earned by a path of the given length.
pub fn point_count(length: f64, res: Resolution) -> i64 {
    nint(sample_density(res) * length / L_MAX)
}

/// Sample a straight line from `start` to `end`.
///
/// A line too short to earn any interior points degenerates to a single
/// waypoint at its start.
pub fn sample_line(start: &Vector2<f64>, end: &Vector2<f64>, res: Resolution) -> Vec<Vector2<f64>> {
    let length = (end - start).norm();
    let n = point_count(length, res);

    if n == 0 {
        return vec![*start];
    }

    // n interior points plus both endpoints
    let count = n + 2;
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            start + (end - start) * t
        })
        .collect()
}

/// Sample a circular arc about `center`, angles in degrees, swept from
/// `theta_start_deg` to `theta_end_deg`.
///
/// An arc too short to earn any points produces an empty path; one point
/// lands on the start angle.
pub fn sample_arc(
    center: &Vector2<f64>,
    radius: f64,
    theta_start_deg: f64,
    theta_end_deg: f64,
    res: Resolution,
) -> Vec<Vector2<f64>> {
    let theta_start = deg_to_rad(theta_start_deg);
    let theta_end = deg_to_rad(theta_end_deg);
    let length = (radius * (theta_end - theta_start)).abs();
    let n = point_count(length, res);

    let theta_at = |t: f64| {
        let theta = theta_start + (theta_end - theta_start) * t;
        center + Vector2::new(radius * theta.cos(), radius * theta.sin())
    };

    match n {
        0 => vec![],
        1 => vec![theta_at(0.0)],
        _ => (0..n)
            .map(|i| theta_at(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// The four edges of an axis-aligned rectangle given its bottom-left and
/// top-right corners, traversed anticlockwise from the bottom-left and
/// ending back there.
pub fn rectangle_edges(
    xbl: f64,
    ybl: f64,
    xtr: f64,
    ytr: f64,
) -> [(Vector2<f64>, Vector2<f64>); 4] {
    let bl = Vector2::new(xbl, ybl);
    let tl = Vector2::new(xbl, ytr);
    let tr = Vector2::new(xtr, ytr);
    let br = Vector2::new(xtr, ybl);

    [(bl, tl), (tl, tr), (tr, br), (br, bl)]
}

/// The three edges of a triangle given its bottom-left, top and
/// bottom-right vertices, ending back at the bottom-left.
pub fn triangle_edges(
    xbl: f64,
    ybl: f64,
    xt: f64,
    yt: f64,
    xbr: f64,
    ybr: f64,
) -> [(Vector2<f64>, Vector2<f64>); 3] {
    let bl = Vector2::new(xbl, ybl);
    let t = Vector2::new(xt, yt);
    let br = Vector2::new(xbr, ybr);

    [(bl, t), (t, br), (br, bl)]
}

/// Resolve a sampled path into joint angles in a single arm configuration.
///
/// A configuration is usable only if every waypoint is reachable in it.
/// When both are usable the one with the smaller summed joint angle
/// magnitude wins, ties going to the right arm.
pub fn resolve(points: &[Vector2<f64>]) -> Result<ResolvedPath, PathError> {
    let mut left_joints = Vec::with_capacity(points.len());
    let mut right_joints = Vec::with_capacity(points.len());
    let mut left_ok = true;
    let mut right_ok = true;
    let mut left_sum = 0.0;
    let mut right_sum = 0.0;

    for point in points {
        let sol = kin::inverse(point);

        match sol.left {
            Some(joints) if left_ok => {
                left_sum += joints.magnitude_sum();
                left_joints.push(joints);
            }
            Some(_) => (),
            None => left_ok = false,
        }

        match sol.right {
            Some(joints) if right_ok => {
                right_sum += joints.magnitude_sum();
                right_joints.push(joints);
            }
            Some(_) => (),
            None => right_ok = false,
        }
    }

    match (left_ok, right_ok) {
        (true, true) => {
            if left_sum < right_sum {
                Ok(ResolvedPath {
                    joints: left_joints,
                    config: ArmConfig::Left,
                })
            } else {
                Ok(ResolvedPath {
                    joints: right_joints,
                    config: ArmConfig::Right,
                })
            }
        }
        (true, false) => Ok(ResolvedPath {
            joints: left_joints,
            config: ArmConfig::Left,
        }),
        (false, true) => Ok(ResolvedPath {
            joints: right_joints,
            config: ArmConfig::Right,
        }),
        (false, false) => Err(PathError::Unreachable),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn assert_point(p: &Vector2<f64>, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-9, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_point_count_formula() {
        assert_eq!(point_count(600.0, Resolution::Low), 10);
        assert_eq!(point_count(600.0, Resolution::Medium), 20);
        assert_eq!(point_count(600.0, Resolution::High), 40);

        // Rounds to nearest, halves up
        assert_eq!(point_count(30.0, Resolution::Low), 1);
        assert_eq!(point_count(29.0, Resolution::Low), 0);
    }

    #[test]
    fn test_line_point_count() {
        // A full-reach length line at MEDIUM earns 20 interior points
        let points = sample_line(
            &Vector2::new(0.0, 0.0),
            &Vector2::new(600.0, 0.0),
            Resolution::Medium,
        );
        assert_eq!(points.len(), 22);

        // Double the density at HIGH
        let points = sample_line(
            &Vector2::new(0.0, 0.0),
            &Vector2::new(600.0, 0.0),
            Resolution::High,
        );
        assert_eq!(points.len(), 42);
    }

    #[test]
    fn test_line_endpoints_and_spacing() {
        let start = Vector2::new(100.0, 100.0);
        let end = Vector2::new(400.0, 100.0);
        let points = sample_line(&start, &end, Resolution::Low);

        // 300 units at LOW is 5 interior points
        assert_eq!(points.len(), 7);
        assert_point(&points[0], 100.0, 100.0);
        assert_point(&points[6], 400.0, 100.0);
        assert_point(&points[1], 150.0, 100.0);
    }

    #[test]
    fn test_degenerate_line() {
        // Too short to earn any points: a single waypoint at the start
        let points = sample_line(
            &Vector2::new(250.0, 0.0),
            &Vector2::new(260.0, 0.0),
            Resolution::Low,
        );
        assert_eq!(points.len(), 1);
        assert_point(&points[0], 250.0, 0.0);
    }

    #[test]
    fn test_arc_endpoints() {
        // Quarter circle, radius 300, LOW: length ~471.2 gives 8 points
        let points = sample_arc(&Vector2::new(0.0, 0.0), 300.0, 0.0, 90.0, Resolution::Low);
        assert_eq!(points.len(), 8);
        assert_point(&points[0], 300.0, 0.0);
        assert_point(&points[7], 0.0, 300.0);
    }

    #[test]
    fn test_degenerate_arcs() {
        // Too short for any points at all
        let points = sample_arc(&Vector2::new(0.0, 0.0), 1.0, 0.0, 1.0, Resolution::Low);
        assert!(points.is_empty());

        // Exactly one point lands on the start angle
        let points = sample_arc(&Vector2::new(0.0, 0.0), 60.0, 0.0, 45.0, Resolution::Low);
        assert_eq!(points.len(), 1);
        assert_point(&points[0], 60.0, 0.0);
    }

    #[test]
    fn test_rectangle_edges() {
        let edges = rectangle_edges(100.0, 100.0, 300.0, 200.0);

        assert_point(&edges[0].0, 100.0, 100.0);
        assert_point(&edges[0].1, 100.0, 200.0);
        assert_point(&edges[1].1, 300.0, 200.0);
        assert_point(&edges[2].1, 300.0, 100.0);
        assert_point(&edges[3].1, 100.0, 100.0);

        // Edges chain: each starts where the previous ended
        for pair in edges.windows(2) {
            assert_point(&pair[1].0, pair[0].1.x, pair[0].1.y);
        }
    }

    #[test]
    fn test_triangle_edges() {
        let edges = triangle_edges(100.0, 100.0, 200.0, 300.0, 300.0, 100.0);

        assert_point(&edges[0].0, 100.0, 100.0);
        assert_point(&edges[0].1, 200.0, 300.0);
        assert_point(&edges[1].1, 300.0, 100.0);
        assert_point(&edges[2].1, 100.0, 100.0);
    }

    #[test]
    fn test_resolve_prefers_smaller_angles() {
        // In the upper half plane the right arm pose uses smaller angle
        // magnitudes, and mirror-wise below the axis.
        let resolved = resolve(&[Vector2::new(400.0, 200.0)]).unwrap();
        assert_eq!(resolved.config, ArmConfig::Right);

        let resolved = resolve(&[Vector2::new(400.0, -200.0)]).unwrap();
        assert_eq!(resolved.config, ArmConfig::Left);
    }

    #[test]
    fn test_resolve_tie_goes_right() {
        // At full extension both configurations coincide exactly
        let resolved = resolve(&[Vector2::new(600.0, 0.0)]).unwrap();
        assert_eq!(resolved.config, ArmConfig::Right);
    }

    #[test]
    fn test_resolve_unreachable() {
        assert_eq!(
            resolve(&[Vector2::new(400.0, 200.0), Vector2::new(700.0, 0.0)]),
            Err(PathError::Unreachable)
        );
    }

    #[test]
    fn test_resolve_joint_count() {
        let points = sample_line(
            &Vector2::new(300.0, 100.0),
            &Vector2::new(400.0, 200.0),
            Resolution::Medium,
        );
        let resolved = resolve(&points).unwrap();
        assert_eq!(resolved.joints.len(), points.len());
    }
}
