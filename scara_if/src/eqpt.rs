//! # Equipment protocol
//!
//! This module defines the line-oriented text protocol understood by the
//! SCARA robot simulator. Each [`EqptCmd`] renders as a single protocol
//! line; the link layer appends the newline terminator.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Motor speed setting of the manipulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorSpeed {
    Low,
    Medium,
    High,
}

/// Vertical position of the pen effector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenPos {
    Up,
    Down,
}

/// A simple ON/OFF switch, used for pen colour cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Switch {
    On,
    Off,
}

/// Sampling density selector for drawn geometry.
///
/// Controls how many intermediate points are placed per unit of path length,
/// see `scara_exec::path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Low,
    Medium,
    High,
}

/// A command in the simulator's equipment protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EqptCmd {
    MotorSpeed(MotorSpeed),
    PenUp,
    PenDown,
    PenColor(Rgb),
    CyclePenColor(Switch),
    ClearTrace,
    ClearRemoteCommandLog,
    ClearPositionLog,
    ShutdownSimulation,
    Home,
    /// Absolute joint rotation demand, angles in degrees.
    RotateJoint { ang1_deg: f64, ang2_deg: f64 },
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An RGB pen colour, one 0-255 channel per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotorSpeed {
    /// Parse a keyword (case already normalised to upper) into a speed.
    pub fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "LOW" => Some(MotorSpeed::Low),
            "MEDIUM" => Some(MotorSpeed::Medium),
            "HIGH" => Some(MotorSpeed::High),
            _ => None,
        }
    }

    /// The protocol representation of this speed.
    pub fn as_str(&self) -> &'static str {
        match self {
            MotorSpeed::Low => "LOW",
            MotorSpeed::Medium => "MEDIUM",
            MotorSpeed::High => "HIGH",
        }
    }
}

impl PenPos {
    pub fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "UP" => Some(PenPos::Up),
            "DOWN" => Some(PenPos::Down),
            _ => None,
        }
    }
}

impl Switch {
    pub fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "ON" => Some(Switch::On),
            "OFF" => Some(Switch::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Switch::On => "ON",
            Switch::Off => "OFF",
        }
    }
}

impl Resolution {
    pub fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "LOW" => Some(Resolution::Low),
            "MEDIUM" => Some(Resolution::Medium),
            "HIGH" => Some(Resolution::High),
            _ => None,
        }
    }
}

impl fmt::Display for EqptCmd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EqptCmd::MotorSpeed(s) => write!(f, "MOTOR_SPEED {}", s.as_str()),
            EqptCmd::PenUp => write!(f, "PEN_UP"),
            EqptCmd::PenDown => write!(f, "PEN_DOWN"),
            EqptCmd::PenColor(c) => write!(f, "PEN_COLOR {} {} {}", c.r, c.g, c.b),
            EqptCmd::CyclePenColor(s) => write!(f, "CYCLE_PEN_COLOR {}", s.as_str()),
            EqptCmd::ClearTrace => write!(f, "CLEAR_TRACE"),
            EqptCmd::ClearRemoteCommandLog => write!(f, "CLEAR_REMOTE_COMMAND_LOG"),
            EqptCmd::ClearPositionLog => write!(f, "CLEAR_POSITION_LOG"),
            EqptCmd::ShutdownSimulation => write!(f, "SHUTDOWN_SIMULATION"),
            EqptCmd::Home => write!(f, "HOME"),
            EqptCmd::RotateJoint { ang1_deg, ang2_deg } => {
                write!(f, "ROTATE_JOINT ANG1 {:.6} ANG2 {:.6}", ang1_deg, ang2_deg)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
