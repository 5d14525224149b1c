//! Command line parser.
//!
//! Parsing is data-driven: the first token selects a [`CommandSpec`] from
//! the registry and the remaining tokens are validated slot by slot
//! against the spec's declared argument kinds. Validation stops at the
//! first bad slot.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use thiserror::Error;

// Internal
use super::{ArgKind, ArgValue, CmdId, CommandSpec, ScaraCmd, COMMAND_SPECS, KW_RESOLUTION};
use crate::eqpt::{MotorSpeed, PenPos, Resolution, Rgb, Switch};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Characters which separate tokens on a command line.
pub const SEPARATORS: &[char] = &[' ', '\t', '\r', '\n', ',', ';', ':', '\\', '/', '_'];

/// Inclusive bounds of a pen colour channel.
const COLOUR_MIN: i64 = 0;
const COLOUR_MAX: i64 = 255;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with parsing a command line.
#[derive(Debug, Error, PartialEq)]
pub enum CmdParseError {
    #[error("No command given")]
    NoCommand,

    #[error("{0} is not a valid command")]
    UnknownCommand(String),

    #[error("{0} is not a valid command (line {1})")]
    UnknownCommandInScript(String, usize),

    #[error("expecting {expected} parameter(s). Should be: {args_help}")]
    BadParameters {
        expected: usize,
        args_help: &'static str,
    },

    #[error("expecting Resolution: HIGH or MEDIUM or LOW")]
    BadResolution,

    #[error("Trailing garbage in numeric value \"{0}\"")]
    TrailingGarbage(String),

    #[error("Colour channels must be between 0 and 255, got {0}")]
    ColourOutOfRange(i64),

    #[error("Extra parameters after a complete {0} command")]
    ExtraParameters(&'static str),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Parse a single command line into a typed [`ScaraCmd`].
///
/// `line_number` is given when the line comes from a script, in which case
/// unknown-command rejections name the offending line.
pub fn parse_command(line: &str, line_number: Option<usize>) -> Result<ScaraCmd, CmdParseError> {
    let mut tokens = line.split(SEPARATORS).filter(|t| !t.is_empty());

    let name = tokens.next().ok_or(CmdParseError::NoCommand)?;

    let spec = match COMMAND_SPECS
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
    {
        Some(s) => s,
        None => {
            return Err(match line_number {
                Some(n) => CmdParseError::UnknownCommandInScript(name.to_string(), n),
                None => CmdParseError::UnknownCommand(name.to_string()),
            })
        }
    };

    let mut args = Vec::with_capacity(spec.arg_kinds.len());

    for kind in spec.arg_kinds {
        let token = tokens.next();

        match kind {
            ArgKind::Keyword(literals) => {
                let token = token.ok_or_else(|| bad_parameters(spec))?;
                let literal = literals
                    .iter()
                    .find(|l| l.eq_ignore_ascii_case(token))
                    .ok_or_else(|| bad_parameters(spec))?;
                args.push(ArgValue::Keyword((*literal).to_string()));
            }
            ArgKind::Real => {
                let token = token.ok_or_else(|| bad_parameters(spec))?;
                let value: f64 = token
                    .parse()
                    .map_err(|_| CmdParseError::TrailingGarbage(token.to_string()))?;
                args.push(ArgValue::Real(value));
            }
            ArgKind::Colour => {
                let token = token.ok_or_else(|| bad_parameters(spec))?;
                let value: i64 = token
                    .parse()
                    .map_err(|_| CmdParseError::TrailingGarbage(token.to_string()))?;
                if !(COLOUR_MIN..=COLOUR_MAX).contains(&value) {
                    return Err(CmdParseError::ColourOutOfRange(value));
                }
                args.push(ArgValue::Int(value));
            }
            ArgKind::Resolution => {
                let token = token.ok_or(CmdParseError::BadResolution)?;
                let literal = KW_RESOLUTION
                    .iter()
                    .find(|l| l.eq_ignore_ascii_case(token))
                    .ok_or(CmdParseError::BadResolution)?;
                args.push(ArgValue::Keyword((*literal).to_string()));
            }
        }
    }

    if tokens.next().is_some() {
        return Err(CmdParseError::ExtraParameters(spec.name));
    }

    build_cmd(spec.id, &args).ok_or_else(|| bad_parameters(spec))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn bad_parameters(spec: &CommandSpec) -> CmdParseError {
    CmdParseError::BadParameters {
        expected: spec.arg_kinds.len(),
        args_help: spec.args_help,
    }
}

/// Build the typed command from validated argument values.
///
/// Slot validation has already enforced the schema; a mismatch here can
/// only mean the registry and this table disagree, which surfaces as a
/// parameter rejection rather than a panic.
fn build_cmd(id: CmdId, args: &[ArgValue]) -> Option<ScaraCmd> {
    use ArgValue::{Int, Keyword, Real};

    let cmd = match (id, args) {
        (CmdId::MotorSpeed, [Keyword(kw)]) => ScaraCmd::MotorSpeed(MotorSpeed::from_keyword(kw)?),
        (CmdId::PenPos, [Keyword(kw)]) => ScaraCmd::PenPos(PenPos::from_keyword(kw)?),
        (CmdId::PenColor, [Int(r), Int(g), Int(b)]) => ScaraCmd::PenColor(Rgb {
            r: *r as u8,
            g: *g as u8,
            b: *b as u8,
        }),
        (CmdId::CyclePenColors, [Keyword(kw)]) => {
            ScaraCmd::CyclePenColors(Switch::from_keyword(kw)?)
        }
        (CmdId::ClearTrace, []) => ScaraCmd::ClearTrace,
        (CmdId::ClearRemoteCommandLog, []) => ScaraCmd::ClearRemoteCommandLog,
        (CmdId::ClearPositionLog, []) => ScaraCmd::ClearPositionLog,
        (CmdId::ShutdownSimulation, []) => ScaraCmd::ShutdownSimulation,
        (CmdId::EndRemoteConnection, []) => ScaraCmd::EndRemoteConnection,
        (CmdId::Home, []) => ScaraCmd::Home,
        (CmdId::MoveTo, [Real(x), Real(y)]) => ScaraCmd::MoveTo { x: *x, y: *y },
        (CmdId::DrawLine, [Real(x0), Real(y0), Real(x1), Real(y1), Keyword(res)]) => {
            ScaraCmd::DrawLine {
                x0: *x0,
                y0: *y0,
                x1: *x1,
                y1: *y1,
                res: Resolution::from_keyword(res)?,
            }
        }
        (CmdId::DrawArc, [Real(xc), Real(yc), Real(r), Real(ts), Real(te), Keyword(res)]) => {
            ScaraCmd::DrawArc {
                xc: *xc,
                yc: *yc,
                radius: *r,
                theta_start_deg: *ts,
                theta_end_deg: *te,
                res: Resolution::from_keyword(res)?,
            }
        }
        (CmdId::DrawRectangle, [Real(xbl), Real(ybl), Real(xtr), Real(ytr), Keyword(res)]) => {
            ScaraCmd::DrawRectangle {
                xbl: *xbl,
                ybl: *ybl,
                xtr: *xtr,
                ytr: *ytr,
                res: Resolution::from_keyword(res)?,
            }
        }
        (
            CmdId::DrawTriangle,
            [Real(xbl), Real(ybl), Real(xt), Real(yt), Real(xbr), Real(ybr), Keyword(res)],
        ) => ScaraCmd::DrawTriangle {
            xbl: *xbl,
            ybl: *ybl,
            xt: *xt,
            yt: *yt,
            xbr: *xbr,
            ybr: *ybr,
            res: Resolution::from_keyword(res)?,
        },
        (CmdId::AddRotation, [Real(deg)]) => ScaraCmd::AddRotation { deg: *deg },
        (CmdId::AddTranslation, [Real(dx), Real(dy)]) => ScaraCmd::AddTranslation {
            dx: *dx,
            dy: *dy,
        },
        (CmdId::AddScaling, [Real(sx), Real(sy)]) => ScaraCmd::AddScaling { sx: *sx, sy: *sy },
        (CmdId::ResetTransformMatrix, []) => ScaraCmd::ResetTransformMatrix,
        (CmdId::QueryState, []) => ScaraCmd::QueryState,
        _ => return None,
    };

    Some(cmd)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(
            parse_command("moveTo 300 400", None),
            Ok(ScaraCmd::MoveTo { x: 300.0, y: 400.0 })
        );
        assert_eq!(parse_command("home", None), Ok(ScaraCmd::Home));
        assert_eq!(
            parse_command("penPos UP", None),
            Ok(ScaraCmd::PenPos(PenPos::Up))
        );
        assert_eq!(
            parse_command("motorSpeed high", None),
            Ok(ScaraCmd::MotorSpeed(MotorSpeed::High))
        );
    }

    #[test]
    fn test_case_insensitive_names() {
        assert_eq!(
            parse_command("MOVETO 10 20", None),
            Ok(ScaraCmd::MoveTo { x: 10.0, y: 20.0 })
        );
        assert_eq!(
            parse_command("clearposittionlog", None),
            Err(CmdParseError::UnknownCommand(
                "clearposittionlog".to_string()
            ))
        );
    }

    #[test]
    fn test_separators() {
        // Any mix of the separator characters splits tokens, and runs of
        // separators collapse.
        assert_eq!(
            parse_command("drawLine 0,0;300:400/HIGH", None),
            Ok(ScaraCmd::DrawLine {
                x0: 0.0,
                y0: 0.0,
                x1: 300.0,
                y1: 400.0,
                res: Resolution::High,
            })
        );
        assert_eq!(
            parse_command("moveTo\t300 ,, 400", None),
            Ok(ScaraCmd::MoveTo { x: 300.0, y: 400.0 })
        );
    }

    #[test]
    fn test_missing_parameters() {
        assert_eq!(
            parse_command("moveTo 300", None),
            Err(CmdParseError::BadParameters {
                expected: 2,
                args_help: "x, y",
            })
        );
        assert_eq!(
            parse_command("penColor 10 20", None),
            Err(CmdParseError::BadParameters {
                expected: 3,
                args_help: "3 int numbers between 0 and 255: r g b",
            })
        );
    }

    #[test]
    fn test_numeric_garbage() {
        assert_eq!(
            parse_command("moveTo 300 abc", None),
            Err(CmdParseError::TrailingGarbage("abc".to_string()))
        );
        assert_eq!(
            parse_command("moveTo 300 400.5.6", None),
            Err(CmdParseError::TrailingGarbage("400.5.6".to_string()))
        );
    }

    #[test]
    fn test_colour_range() {
        assert_eq!(
            parse_command("penColor 10 20 300", None),
            Err(CmdParseError::ColourOutOfRange(300))
        );
        assert_eq!(
            parse_command("penColor 0 255 128", None),
            Ok(ScaraCmd::PenColor(Rgb {
                r: 0,
                g: 255,
                b: 128,
            }))
        );
    }

    #[test]
    fn test_bad_resolution() {
        assert_eq!(
            parse_command("drawLine 0 0 100 100 ULTRA", None),
            Err(CmdParseError::BadResolution)
        );
        assert_eq!(
            parse_command("drawLine 0 0 100 100", None),
            Err(CmdParseError::BadResolution)
        );
    }

    #[test]
    fn test_extra_parameters() {
        assert_eq!(
            parse_command("home 5", None),
            Err(CmdParseError::ExtraParameters("home"))
        );
        assert_eq!(
            parse_command("moveTo 1 2 3", None),
            Err(CmdParseError::ExtraParameters("moveTo"))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("frobnicate", None),
            Err(CmdParseError::UnknownCommand("frobnicate".to_string()))
        );
        assert_eq!(
            parse_command("frobnicate 1 2", Some(7)),
            Err(CmdParseError::UnknownCommandInScript(
                "frobnicate".to_string(),
                7
            ))
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_command("", None), Err(CmdParseError::NoCommand));
        assert_eq!(parse_command("  \t ", None), Err(CmdParseError::NoCommand));
    }

    #[test]
    fn test_draw_commands() {
        assert_eq!(
            parse_command("drawArc 200 200 100 0 90 MEDIUM", None),
            Ok(ScaraCmd::DrawArc {
                xc: 200.0,
                yc: 200.0,
                radius: 100.0,
                theta_start_deg: 0.0,
                theta_end_deg: 90.0,
                res: Resolution::Medium,
            })
        );
        assert_eq!(
            parse_command("drawTriangle 100 100 200 300 300 100 LOW", None),
            Ok(ScaraCmd::DrawTriangle {
                xbl: 100.0,
                ybl: 100.0,
                xt: 200.0,
                yt: 300.0,
                xbr: 300.0,
                ybr: 100.0,
                res: Resolution::Low,
            })
        );
    }

    #[test]
    fn test_transform_commands() {
        assert_eq!(
            parse_command("addRotation 45", None),
            Ok(ScaraCmd::AddRotation { deg: 45.0 })
        );
        assert_eq!(
            parse_command("addScaling 2 0.5", None),
            Ok(ScaraCmd::AddScaling { sx: 2.0, sy: 0.5 })
        );
        assert_eq!(
            parse_command("resetTransformMatrix", None),
            Ok(ScaraCmd::ResetTransformMatrix)
        );
    }
}
