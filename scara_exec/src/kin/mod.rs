//! # Kinematics engine
//!
//! Closed-form forward and inverse kinematics of the two-link planar
//! manipulator, plus the workspace transform accumulator applied to drawn
//! geometry (see [`transform`]).
//!
//! Angles are exchanged in degrees at the module boundary and converted to
//! radians internally. An unreachable or limit-violating target is reported
//! through the solution type, never an error: the inverse solver returns
//! `None` for each arm configuration it cannot satisfy.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod transform;

pub use transform::TransformAccumulator;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use util::maths::{deg_to_rad, rad_to_deg};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Length of the inner (shoulder) link in millimetres.
pub const L1: f64 = 350.0;

/// Length of the outer (elbow) link in millimetres.
pub const L2: f64 = 250.0;

/// Symmetric travel limit of the shoulder joint in degrees.
pub const MAX_THETA1_DEG: f64 = 150.0;

/// Symmetric travel limit of the elbow joint in degrees.
pub const MAX_THETA2_DEG: f64 = 170.0;

/// Maximum radial reach of the effector in millimetres.
pub const L_MAX: f64 = L1 + L2;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The two mirror-image arm poses which reach a given effector position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmConfig {
    Left,
    Right,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A pair of joint angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub theta1_deg: f64,
    pub theta2_deg: f64,
}

/// The inverse kinematic solution for a target position.
///
/// Each arm configuration is `Some` only if the target is geometrically
/// reachable in that pose and both joints are inside their travel limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseSolution {
    pub left: Option<JointAngles>,
    pub right: Option<JointAngles>,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Minimum radial reach of the effector in millimetres, set by the elbow
/// travel limit.
pub fn l_min() -> f64 {
    let theta2_max_rad = deg_to_rad(MAX_THETA2_DEG);
    (L1 * L1 + L2 * L2 - 2.0 * L1 * L2 * (std::f64::consts::PI - theta2_max_rad).cos()).sqrt()
}

/// Forward kinematics: effector position for a pair of joint angles, or
/// `None` if either joint is outside its travel limit.
pub fn forward(joints: &JointAngles) -> Option<Vector2<f64>> {
    if joints.theta1_deg.abs() > MAX_THETA1_DEG || joints.theta2_deg.abs() > MAX_THETA2_DEG {
        return None;
    }

    let theta1 = deg_to_rad(joints.theta1_deg);
    let theta2 = deg_to_rad(joints.theta2_deg);

    Some(Vector2::new(
        L1 * theta1.cos() + L2 * (theta1 + theta2).cos(),
        L1 * theta1.sin() + L2 * (theta1 + theta2).sin(),
    ))
}

/// Inverse kinematics: joint angles which place the effector at `target`,
/// solved for both arm configurations.
pub fn inverse(target: &Vector2<f64>) -> InverseSolution {
    let (x, y) = (target.x, target.y);
    let r = (x * x + y * y).sqrt();

    // Law of cosines for the shoulder offset angle. Outside the unit
    // interval (or at the degenerate r = 0) the target is out of reach for
    // both configurations.
    let alpha_arg = (L2 * L2 - r * r - L1 * L1) / (-2.0 * r * L1);

    if r == 0.0 || alpha_arg.abs() > 1.0 {
        return InverseSolution {
            left: None,
            right: None,
        };
    }

    let alpha = alpha_arg.acos();
    let beta = y.atan2(x);

    InverseSolution {
        left: solve_config(x, y, beta + alpha),
        right: solve_config(x, y, beta - alpha),
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Complete one configuration from its shoulder angle, rejecting it if a
/// joint travel limit is violated.
fn solve_config(x: f64, y: f64, theta1: f64) -> Option<JointAngles> {
    let mut theta2 = (y - L1 * theta1.sin()).atan2(x - L1 * theta1.cos()) - theta1;

    // Wrap the elbow angle into (-pi, pi)
    if theta2 <= -std::f64::consts::PI {
        theta2 += 2.0 * std::f64::consts::PI;
    } else if theta2 >= std::f64::consts::PI {
        theta2 -= 2.0 * std::f64::consts::PI;
    }

    let joints = JointAngles {
        theta1_deg: rad_to_deg(theta1),
        theta2_deg: rad_to_deg(theta2),
    };

    if joints.theta1_deg.abs() > MAX_THETA1_DEG || joints.theta2_deg.abs() > MAX_THETA2_DEG {
        None
    } else {
        Some(joints)
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl InverseSolution {
    /// Get the solution for a particular configuration.
    pub fn get(&self, config: ArmConfig) -> Option<JointAngles> {
        match config {
            ArmConfig::Left => self.left,
            ArmConfig::Right => self.right,
        }
    }

    /// True if neither configuration can reach the target.
    pub fn is_unreachable(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl JointAngles {
    /// Sum of the joint angle magnitudes, used to rank configurations.
    pub fn magnitude_sum(&self) -> f64 {
        self.theta1_deg.abs() + self.theta2_deg.abs()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
