//! # Robot link
//!
//! The link over which equipment commands are streamed to the robot
//! simulator. The simulator speaks a newline-terminated text protocol, so
//! the link simply renders each [`EqptCmd`] and writes it to the wire.
//!
//! The [`RobotLink`] trait is the seam used by the execution dispatcher;
//! tests and dry runs use [`MemoryLink`] instead of a real connection.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::net::TcpStream;
use thiserror::Error;

// Internal
use crate::eqpt::EqptCmd;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the robot link, loaded as part of the executable's
/// parameter file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkParams {
    /// Address (host:port) of the robot simulator.
    pub sim_addr: String,
}

/// A link to the robot simulator over a TCP stream.
pub struct TcpRobotLink {
    stream: TcpStream,
}

/// A link which records rendered protocol lines instead of sending them.
#[derive(Default)]
pub struct MemoryLink {
    /// All lines sent over this link, without newline terminators.
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with the robot link.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Could not connect to the simulator at {0}: {1}")]
    ConnectError(String, std::io::Error),

    #[error("Could not send a command over the link: {0}")]
    SendError(std::io::Error),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// An open connection able to accept equipment commands.
pub trait RobotLink {
    /// Send a single equipment command over the link.
    fn send(&mut self, cmd: &EqptCmd) -> Result<(), LinkError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TcpRobotLink {
    /// Open a connection to the simulator.
    pub fn connect(params: &LinkParams) -> Result<Self, LinkError> {
        let stream = TcpStream::connect(&params.sim_addr)
            .map_err(|e| LinkError::ConnectError(params.sim_addr.clone(), e))?;

        info!("Connected to the simulator at {}", params.sim_addr);

        Ok(TcpRobotLink { stream })
    }
}

impl RobotLink for TcpRobotLink {
    fn send(&mut self, cmd: &EqptCmd) -> Result<(), LinkError> {
        self.stream
            .write_all(format!("{}\n", cmd).as_bytes())
            .map_err(LinkError::SendError)
    }
}

impl RobotLink for MemoryLink {
    fn send(&mut self, cmd: &EqptCmd) -> Result<(), LinkError> {
        self.lines.push(cmd.to_string());
        Ok(())
    }
}
