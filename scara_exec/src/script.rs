//! # Script interpreter
//!
//! Runs a command script: a plain text file with one command per line.
//! Blank lines and comment lines (any two slash characters, `/` or `\`,
//! after leading whitespace) are skipped. A rejected line (bad parse or
//! unexecutable path) is logged and the script carries on; only a link
//! failure aborts the run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use crate::exec::{Exec, ExecError, ExecOutcome};
use scara_if::cmd::parse_command;
use scara_if::net::{LinkError, RobotLink};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tally of a completed script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptSummary {
    /// Number of commands executed.
    pub executed: usize,

    /// Number of lines rejected (parse failures or unexecutable paths).
    pub rejected: usize,

    /// True if the script ended the session.
    pub ended_session: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Cannot read script file {0:?}: {1}")]
    FileRead(PathBuf, std::io::Error),

    #[error("Link failure during script run: {0}")]
    Link(#[from] LinkError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the script at the given path against the dispatcher.
pub fn run_script<L: RobotLink>(
    exec: &mut Exec<L>,
    script_path: &Path,
) -> Result<ScriptSummary, ScriptError> {
    let contents = fs::read_to_string(script_path)
        .map_err(|e| ScriptError::FileRead(script_path.to_path_buf(), e))?;

    info!("Running script {:?}", script_path);

    let summary = run_lines(exec, &contents)?;

    info!(
        "Script complete: {} command(s) executed, {} line(s) rejected",
        summary.executed, summary.rejected
    );

    Ok(summary)
}

/// Run script text, one command per line.
pub fn run_lines<L: RobotLink>(
    exec: &mut Exec<L>,
    contents: &str,
) -> Result<ScriptSummary, ScriptError> {
    let mut summary = ScriptSummary::default();

    for (i, line) in contents.lines().enumerate() {
        let line_number = i + 1;
        let line = line.trim();

        if line.is_empty() || is_comment(line) {
            continue;
        }

        let cmd = match parse_command(line, Some(line_number)) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("Line {} rejected: {}", line_number, e);
                summary.rejected += 1;
                continue;
            }
        };

        match exec.exec(&cmd) {
            Ok(ExecOutcome::Continue) => summary.executed += 1,
            Ok(ExecOutcome::EndSession) => {
                summary.executed += 1;
                summary.ended_session = true;
                break;
            }
            Err(ExecError::Path(e)) => {
                warn!("Line {} not executable: {}", line_number, e);
                summary.rejected += 1;
            }
            Err(ExecError::Link(e)) => return Err(e.into()),
        }
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// A comment opens with two adjacent slash characters, forward or back
/// in any combination. A single slash is not a comment.
fn is_comment(line: &str) -> bool {
    let is_slash = |c: char| c == '/' || c == '\\';
    let mut chars = line.chars();

    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if is_slash(a) && is_slash(b)
    )
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use scara_if::net::MemoryLink;

    fn new_exec() -> Exec<MemoryLink> {
        Exec::new(MemoryLink::default())
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let mut exec = new_exec();
        let summary = run_lines(
            &mut exec,
            "// warm up\n\nmotorSpeed LOW\n   \n\\\\ another comment\n/\\ mixed slashes\npenColor 0 255 0\n",
        )
        .unwrap();

        assert_eq!(summary.executed, 2);
        assert_eq!(summary.rejected, 0);
        assert_eq!(exec.link.lines, vec!["MOTOR_SPEED LOW", "PEN_COLOR 0 255 0"]);
    }

    #[test]
    fn test_single_slash_is_not_a_comment() {
        // A lone slash is a command line; its tokens are all separators
        // so it parses to nothing and is rejected, not skipped.
        let mut exec = new_exec();
        let summary = run_lines(&mut exec, "/\nclearTrace\n").unwrap();

        assert_eq!(summary.executed, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(exec.link.lines, vec!["CLEAR_TRACE"]);
    }

    #[test]
    fn test_bad_lines_do_not_stop_the_run() {
        let mut exec = new_exec();
        let summary = run_lines(
            &mut exec,
            "frobnicate\nmotorSpeed LOW\nmoveTo 700 0\nclearTrace\n",
        )
        .unwrap();

        // The unknown command and the unreachable move are rejected, the
        // rest run.
        assert_eq!(summary.executed, 2);
        assert_eq!(summary.rejected, 2);
        assert_eq!(exec.link.lines, vec!["MOTOR_SPEED LOW", "CLEAR_TRACE"]);
    }

    #[test]
    fn test_end_session_stops_the_script() {
        let mut exec = new_exec();
        let summary = run_lines(
            &mut exec,
            "clearTrace\nendRemoteConnection\nclearPositionLog\n",
        )
        .unwrap();

        assert!(summary.ended_session);
        assert_eq!(summary.executed, 2);
        assert_eq!(exec.link.lines, vec!["CLEAR_TRACE"]);
    }

    #[test]
    fn test_missing_file() {
        let mut exec = new_exec();
        let result = run_script(&mut exec, Path::new("no/such/script.scr"));
        assert!(matches!(result, Err(ScriptError::FileRead(_, _))));
    }
}
