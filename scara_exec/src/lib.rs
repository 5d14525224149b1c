//! # SCARA executive library.
//!
//! This library exposes the modules of the SCARA executive so that tests
//! and other tools in the workspace can reach them.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Interactive operator console
pub mod console;

/// Execution dispatcher - turns typed commands into equipment protocol lines
pub mod exec;

/// Kinematics engine - forward/inverse solutions and the workspace transform
pub mod kin;

/// Path sampler - waypoint generation for drawn geometry
pub mod path;

/// Script interpreter - runs command scripts from files
pub mod script;
