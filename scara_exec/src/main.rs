//! # SCARA Control Executable
//!
//! This executable drives the SCARA robot simulator. It accepts operator
//! commands either interactively on the console or from a script file,
//! resolves drawing commands into joint-space paths, and streams the
//! resulting equipment protocol to the simulator over TCP.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::info;
use serde::Deserialize;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use scara_if::net::{LinkParams, TcpRobotLink};
use scara_lib::{console, exec::Exec, script};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// SCARA Control Executable
#[derive(Debug, StructOpt)]
#[structopt(name = "scara_exec")]
struct Opt {
    /// Run this command script instead of the interactive console
    #[structopt(parse(from_os_str))]
    script: Option<PathBuf>,
}

/// Parameters for the executable, loaded from `scara_exec.toml`.
#[derive(Debug, Deserialize)]
struct Params {
    /// Minimum log level ("trace", "debug" or "info"; the logger refuses
    /// to suppress warnings).
    log_level: String,

    /// Robot link parameters.
    link: LinkParams,
}

// ---------------------------------------------------------------------------
// MAIN
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("scara_exec", "sessions").wrap_err("Failed to create the session")?;

    // ---- LOAD PARAMETERS ----

    let params: Params =
        util::params::load("scara_exec.toml").wrap_err("Failed to load parameters")?;

    let log_level: LevelFilter = params
        .log_level
        .parse()
        .map_err(|_| eyre!("Invalid log level {:?} in parameters", params.log_level))?;

    // Initialise logger
    logger_init(log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("SCARA Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    info!("Parameters loaded");

    // ---- LINK INITIALISATION ----

    let link = TcpRobotLink::connect(&params.link)
        .wrap_err("Failed to connect to the robot simulator")?;

    let mut exec = Exec::new(link);

    // ---- COMMAND PROCESSING ----

    match opt.script {
        Some(path) => {
            let summary =
                script::run_script(&mut exec, &path).wrap_err("Script run failed")?;

            if summary.rejected > 0 {
                info!(
                    "Script finished with {} rejected line(s), see the log above",
                    summary.rejected
                );
            }
        }
        None => {
            console::run(&mut exec).wrap_err("Console session failed")?;
        }
    }

    info!("Session complete");

    Ok(())
}
