//! # SCARA software interfaces
//!
//! This crate defines the boundary surfaces of the SCARA manipulator
//! software:
//!
//! - [`cmd`] - the operator command language (schema, parser and typed
//!   commands)
//! - [`eqpt`] - the equipment protocol sent to the robot simulator
//! - [`net`] - the link over which equipment commands are sent

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod cmd;
pub mod eqpt;
pub mod net;
