//! Manipulator state tracked by the execution dispatcher.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

// Internal
use crate::kin::{ArmConfig, JointAngles, L_MAX};
use scara_if::eqpt::{MotorSpeed, PenPos, Rgb, Switch};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The dispatcher's image of the manipulator.
///
/// Updated as commands are executed; the simulator holds the true state,
/// this mirror is what path planning starts from and what `queryState`
/// reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulatorState {
    /// Effector position in workspace coordinates.
    pub position: Vector2<f64>,

    /// Current joint angles.
    pub joints: JointAngles,

    /// Arm configuration of the current pose.
    pub config: ArmConfig,

    /// Motor speed setting.
    pub speed: MotorSpeed,

    /// Pen position.
    pub pen_pos: PenPos,

    /// Pen colour.
    pub pen_color: Rgb,

    /// Pen colour cycling.
    pub cycle: Switch,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ManipulatorState {
    /// The power-on pose: arm at full extension along the x axis, pen
    /// down, drawing red at medium speed.
    fn default() -> Self {
        ManipulatorState {
            position: Vector2::new(L_MAX, 0.0),
            joints: JointAngles {
                theta1_deg: 0.0,
                theta2_deg: 0.0,
            },
            config: ArmConfig::Left,
            speed: MotorSpeed::Medium,
            pen_pos: PenPos::Down,
            pen_color: Rgb { r: 255, g: 0, b: 0 },
            cycle: Switch::Off,
        }
    }
}

impl fmt::Display for ManipulatorState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "position: ({:.3}, {:.3})",
            self.position.x, self.position.y
        )?;
        writeln!(
            f,
            "joints: theta1 = {:.3} deg, theta2 = {:.3} deg ({:?} arm)",
            self.joints.theta1_deg, self.joints.theta2_deg, self.config
        )?;
        writeln!(f, "motor speed: {}", self.speed.as_str())?;
        writeln!(
            f,
            "pen: {:?}, colour ({}, {}, {}), cycling {}",
            self.pen_pos,
            self.pen_color.r,
            self.pen_color.g,
            self.pen_color.b,
            self.cycle.as_str()
        )
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
