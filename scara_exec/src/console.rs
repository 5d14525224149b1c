//! # Operator console
//!
//! Interactive command entry with line editing and history. Parse and
//! path rejections are printed back to the operator and the console keeps
//! running; a link failure ends the session.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

// Internal
use crate::exec::{Exec, ExecError, ExecOutcome};
use scara_if::cmd::{parse_command, COMMAND_SPECS};
use scara_if::net::{LinkError, RobotLink};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const PROMPT: &str = "scara $ ";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with the operator console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("Link failure: {0}")]
    Link(#[from] LinkError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the interactive console until the operator ends the session.
pub fn run<L: RobotLink>(exec: &mut Exec<L>) -> Result<(), ConsoleError> {
    let mut rl = DefaultEditor::new()?;

    println!("SCARA operator console");
    println!("'help' lists commands, 'quit' or endRemoteConnection ends the session");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    "help" | "h" => {
                        print_help();
                        continue;
                    }
                    "quit" | "q" => break,
                    _ => (),
                }

                let cmd = match parse_command(line, None) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match exec.exec(&cmd) {
                    Ok(ExecOutcome::Continue) => (),
                    Ok(ExecOutcome::EndSession) => break,
                    Err(ExecError::Path(e)) => println!("{}", e),
                    Err(ExecError::Link(e)) => return Err(e.into()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    info!("Console session ended");

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn print_help() {
    println!("Commands (names are case-insensitive):");
    for spec in COMMAND_SPECS.iter() {
        println!(
            "  {:24} {} arg(s): {}",
            spec.name,
            spec.arg_kinds.len(),
            spec.args_help
        );
    }
}
