//! # Operator command language
//!
//! The manipulator is driven by a small textual command language, one
//! command per line, either typed at the console or read from a script
//! file. This module holds the command registry ([`COMMAND_SPECS`]), the
//! typed command produced by a successful parse ([`ScaraCmd`]), and the
//! parser itself (see [`parse_command`]).
//!
//! Every command has a fixed argument signature declared in its
//! [`CommandSpec`]; the parser validates slots in declaration order and
//! produces exactly one typed value per slot.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod parse;

pub use parse::{parse_command, CmdParseError};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::eqpt::{MotorSpeed, PenPos, Resolution, Rgb, Switch};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Keyword literals accepted by the motor speed command.
pub const KW_SPEED: &[&str] = &["LOW", "MEDIUM", "HIGH"];

/// Keyword literals accepted by the pen position command.
pub const KW_PEN_POS: &[&str] = &["UP", "DOWN"];

/// Keyword literals accepted by the colour cycling command.
pub const KW_SWITCH: &[&str] = &["ON", "OFF"];

/// Keyword literals accepted in a resolution slot.
pub const KW_RESOLUTION: &[&str] = &["LOW", "MEDIUM", "HIGH"];

/// The registry of all commands in the language, one spec per command.
pub const COMMAND_SPECS: [CommandSpec; 20] = [
    CommandSpec {
        id: CmdId::MotorSpeed,
        name: "motorSpeed",
        args_help: "HIGH / MEDIUM / LOW",
        arg_kinds: &[ArgKind::Keyword(KW_SPEED)],
    },
    CommandSpec {
        id: CmdId::PenPos,
        name: "penPos",
        args_help: "UP / DOWN",
        arg_kinds: &[ArgKind::Keyword(KW_PEN_POS)],
    },
    CommandSpec {
        id: CmdId::PenColor,
        name: "penColor",
        args_help: "3 int numbers between 0 and 255: r g b",
        arg_kinds: &[ArgKind::Colour, ArgKind::Colour, ArgKind::Colour],
    },
    CommandSpec {
        id: CmdId::CyclePenColors,
        name: "cyclePenColors",
        args_help: "ON / OFF",
        arg_kinds: &[ArgKind::Keyword(KW_SWITCH)],
    },
    CommandSpec {
        id: CmdId::ClearTrace,
        name: "clearTrace",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::ClearRemoteCommandLog,
        name: "clearRemoteCommandLog",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::ClearPositionLog,
        name: "clearPositionLog",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::ShutdownSimulation,
        name: "shutdownSimulation",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::EndRemoteConnection,
        name: "endRemoteConnection",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::Home,
        name: "home",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::MoveTo,
        name: "moveTo",
        args_help: "x, y",
        arg_kinds: &[ArgKind::Real, ArgKind::Real],
    },
    CommandSpec {
        id: CmdId::DrawLine,
        name: "drawLine",
        args_help: "x0, y0, x1, y1, resolution",
        arg_kinds: &[
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Resolution,
        ],
    },
    CommandSpec {
        id: CmdId::DrawArc,
        name: "drawArc",
        args_help: "xc, yc, r, thetaStartDeg, thetaEndDeg, resolution",
        arg_kinds: &[
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Resolution,
        ],
    },
    CommandSpec {
        id: CmdId::DrawRectangle,
        name: "drawRectangle",
        args_help: "xbl, ybl, xtr, ytr, resolution",
        arg_kinds: &[
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Resolution,
        ],
    },
    CommandSpec {
        id: CmdId::DrawTriangle,
        name: "drawTriangle",
        args_help: "xbl, ybl, xt, yt, xbr, ybr, resolution",
        arg_kinds: &[
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Real,
            ArgKind::Resolution,
        ],
    },
    CommandSpec {
        id: CmdId::AddRotation,
        name: "addRotation",
        args_help: "rotationDeg",
        arg_kinds: &[ArgKind::Real],
    },
    CommandSpec {
        id: CmdId::AddTranslation,
        name: "addTranslation",
        args_help: "dx, dy",
        arg_kinds: &[ArgKind::Real, ArgKind::Real],
    },
    CommandSpec {
        id: CmdId::AddScaling,
        name: "addScaling",
        args_help: "sx, sy",
        arg_kinds: &[ArgKind::Real, ArgKind::Real],
    },
    CommandSpec {
        id: CmdId::ResetTransformMatrix,
        name: "resetTransformMatrix",
        args_help: "NONE",
        arg_kinds: &[],
    },
    CommandSpec {
        id: CmdId::QueryState,
        name: "queryState",
        args_help: "NONE",
        arg_kinds: &[],
    },
];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Identity of a command in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdId {
    MotorSpeed,
    PenPos,
    PenColor,
    CyclePenColors,
    ClearTrace,
    ClearRemoteCommandLog,
    ClearPositionLog,
    ShutdownSimulation,
    EndRemoteConnection,
    Home,
    MoveTo,
    DrawLine,
    DrawArc,
    DrawRectangle,
    DrawTriangle,
    AddRotation,
    AddTranslation,
    AddScaling,
    ResetTransformMatrix,
    QueryState,
}

/// The declared kind of a single argument slot.
#[derive(Debug, Clone, Copy)]
pub enum ArgKind {
    /// A case-insensitive match against one of the given literals.
    Keyword(&'static [&'static str]),

    /// An unconstrained floating point value.
    Real,

    /// A pen colour channel, integer in 0-255.
    Colour,

    /// A resolution keyword. Kept distinct from [`ArgKind::Keyword`]
    /// because its rejection message lists the resolution literals.
    Resolution,
}

/// A single validated argument value. Exactly one interpretation is valid
/// per slot, dictated by the declared [`ArgKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// A matched keyword, stored as its canonical (upper case) literal.
    Keyword(String),

    /// A parsed floating point value.
    Real(f64),

    /// A parsed bounded integer value.
    Int(i64),
}

/// A fully parsed and validated manipulator command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScaraCmd {
    MotorSpeed(MotorSpeed),
    PenPos(PenPos),
    PenColor(Rgb),
    CyclePenColors(Switch),
    ClearTrace,
    ClearRemoteCommandLog,
    ClearPositionLog,
    ShutdownSimulation,
    EndRemoteConnection,
    Home,
    MoveTo {
        x: f64,
        y: f64,
    },
    DrawLine {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        res: Resolution,
    },
    DrawArc {
        xc: f64,
        yc: f64,
        radius: f64,
        theta_start_deg: f64,
        theta_end_deg: f64,
        res: Resolution,
    },
    DrawRectangle {
        xbl: f64,
        ybl: f64,
        xtr: f64,
        ytr: f64,
        res: Resolution,
    },
    DrawTriangle {
        xbl: f64,
        ybl: f64,
        xt: f64,
        yt: f64,
        xbr: f64,
        ybr: f64,
        res: Resolution,
    },
    AddRotation {
        deg: f64,
    },
    AddTranslation {
        dx: f64,
        dy: f64,
    },
    AddScaling {
        sx: f64,
        sy: f64,
    },
    ResetTransformMatrix,
    QueryState,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Immutable description of one command: its name, a human readable
/// argument signature, and the declared kind of each argument slot.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Identity of the command, used to build the typed [`ScaraCmd`].
    pub id: CmdId,

    /// Name matched (case-insensitively) against the first token.
    pub name: &'static str,

    /// Human readable description of the argument signature, used in
    /// rejection messages and the console help listing.
    pub args_help: &'static str,

    /// Declared kind of each argument slot, in order.
    pub arg_kinds: &'static [ArgKind],
}
