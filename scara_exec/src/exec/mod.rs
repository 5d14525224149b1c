//! # Execution dispatcher
//!
//! Turns typed operator commands into equipment protocol lines and keeps
//! the mirrored [`ManipulatorState`] up to date.
//!
//! Drawing commands go through the path pipeline: sample the geometry,
//! map each waypoint through the workspace transform, resolve the mapped
//! waypoints into one arm configuration, then stream the joint demands.
//! A path no configuration can execute is rejected before anything is
//! sent, so the simulator never sees a partial plan for that segment.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod state;

pub use state::ManipulatorState;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use nalgebra::Vector2;
use thiserror::Error;

// Internal
use crate::kin::TransformAccumulator;
use crate::path::{self, PathError, ResolvedPath};
use scara_if::cmd::ScaraCmd;
use scara_if::eqpt::{EqptCmd, PenPos, Resolution};
use scara_if::net::{LinkError, RobotLink};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The execution dispatcher.
///
/// Owns the mirrored manipulator state, the workspace transform and the
/// link to the simulator.
pub struct Exec<L: RobotLink> {
    /// Mirrored manipulator state.
    pub state: ManipulatorState,

    /// Accumulated workspace transform applied to drawn geometry.
    pub transform: TransformAccumulator,

    /// The link commands are streamed over.
    pub link: L,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// What the session should do after a command has executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Keep accepting commands.
    Continue,

    /// The operator ended the session.
    EndSession,
}

/// Errors associated with executing a command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Could not send to the robot: {0}")]
    Link(#[from] LinkError),

    #[error(transparent)]
    Path(#[from] PathError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<L: RobotLink> Exec<L> {
    /// Create a new dispatcher in the power-on state.
    pub fn new(link: L) -> Self {
        Exec {
            state: ManipulatorState::default(),
            transform: TransformAccumulator::new(),
            link,
        }
    }

    /// Execute a single command.
    pub fn exec(&mut self, cmd: &ScaraCmd) -> Result<ExecOutcome, ExecError> {
        match cmd {
            ScaraCmd::MotorSpeed(speed) => {
                self.link.send(&EqptCmd::MotorSpeed(*speed))?;
                self.state.speed = *speed;
            }
            ScaraCmd::PenPos(pos) => {
                self.link.send(&match pos {
                    PenPos::Up => EqptCmd::PenUp,
                    PenPos::Down => EqptCmd::PenDown,
                })?;
                self.state.pen_pos = *pos;
            }
            ScaraCmd::PenColor(color) => {
                self.link.send(&EqptCmd::PenColor(*color))?;
                self.state.pen_color = *color;
            }
            ScaraCmd::CyclePenColors(switch) => {
                self.link.send(&EqptCmd::CyclePenColor(*switch))?;
                self.state.cycle = *switch;
            }
            ScaraCmd::ClearTrace => self.link.send(&EqptCmd::ClearTrace)?,
            ScaraCmd::ClearRemoteCommandLog => self.link.send(&EqptCmd::ClearRemoteCommandLog)?,
            ScaraCmd::ClearPositionLog => self.link.send(&EqptCmd::ClearPositionLog)?,
            ScaraCmd::ShutdownSimulation => {
                self.link.send(&EqptCmd::ShutdownSimulation)?;
                info!("Simulation shutdown requested");
            }
            ScaraCmd::EndRemoteConnection => {
                info!("Session ended by operator");
                return Ok(ExecOutcome::EndSession);
            }
            ScaraCmd::Home => {
                self.link.send(&EqptCmd::Home)?;
                self.state = ManipulatorState {
                    speed: self.state.speed,
                    pen_pos: self.state.pen_pos,
                    pen_color: self.state.pen_color,
                    cycle: self.state.cycle,
                    ..ManipulatorState::default()
                };
            }
            ScaraCmd::MoveTo { x, y } => {
                // A travel move is a line from the current position,
                // sampled at the default density.
                let start = self.state.position;
                self.run_line(&start, &Vector2::new(*x, *y), Resolution::Medium)?;
            }
            ScaraCmd::DrawLine { x0, y0, x1, y1, res } => {
                self.run_line(&Vector2::new(*x0, *y0), &Vector2::new(*x1, *y1), *res)?;
            }
            ScaraCmd::DrawArc {
                xc,
                yc,
                radius,
                theta_start_deg,
                theta_end_deg,
                res,
            } => {
                let points = path::sample_arc(
                    &Vector2::new(*xc, *yc),
                    *radius,
                    *theta_start_deg,
                    *theta_end_deg,
                    *res,
                );
                self.run_path(&points)?;
            }
            ScaraCmd::DrawRectangle { xbl, ybl, xtr, ytr, res } => {
                for (start, end) in path::rectangle_edges(*xbl, *ybl, *xtr, *ytr).iter() {
                    self.run_line(start, end, *res)?;
                }
            }
            ScaraCmd::DrawTriangle {
                xbl,
                ybl,
                xt,
                yt,
                xbr,
                ybr,
                res,
            } => {
                for (start, end) in path::triangle_edges(*xbl, *ybl, *xt, *yt, *xbr, *ybr).iter() {
                    self.run_line(start, end, *res)?;
                }
            }
            ScaraCmd::AddRotation { deg } => self.transform.add_rotation(*deg),
            ScaraCmd::AddTranslation { dx, dy } => self.transform.add_translation(*dx, *dy),
            ScaraCmd::AddScaling { sx, sy } => self.transform.add_scaling(*sx, *sy),
            ScaraCmd::ResetTransformMatrix => self.transform.reset(),
            ScaraCmd::QueryState => info!("Manipulator state:\n{}", self.state),
        }

        Ok(ExecOutcome::Continue)
    }

    /// Sample, resolve and stream a straight line.
    fn run_line(
        &mut self,
        start: &Vector2<f64>,
        end: &Vector2<f64>,
        res: Resolution,
    ) -> Result<(), ExecError> {
        let points = path::sample_line(start, end, res);
        self.run_path(&points)
    }

    /// Resolve sampled waypoints and stream the resulting joint demands.
    ///
    /// The mirrored state moves to the final waypoint on success. An
    /// empty path is a no-op.
    fn run_path(&mut self, points: &[Vector2<f64>]) -> Result<(), ExecError> {
        if points.is_empty() {
            debug!("Path too short to sample, nothing to do");
            return Ok(());
        }

        let mapped: Vec<Vector2<f64>> =
            points.iter().map(|p| self.transform.apply(p)).collect();

        let resolved = match path::resolve(&mapped) {
            Ok(r) => r,
            Err(e) => {
                warn!("Path rejected: {}", e);
                return Err(e.into());
            }
        };

        debug!(
            "Executing {} waypoint(s) in the {:?} arm configuration",
            resolved.joints.len(),
            resolved.config
        );

        self.emit_plan(&resolved)?;

        if let (Some(end), Some(joints)) = (points.last(), resolved.joints.last()) {
            self.state.position = *end;
            self.state.joints = *joints;
            self.state.config = resolved.config;
            // The pen drops after the first waypoint of every plan
            self.state.pen_pos = PenPos::Down;
        }

        Ok(())
    }

    /// Stream a resolved plan: pen up for the travel to the first
    /// waypoint, pen down there, then the remaining joint demands.
    fn emit_plan(&mut self, plan: &ResolvedPath) -> Result<(), ExecError> {
        for (i, joints) in plan.joints.iter().enumerate() {
            if i == 0 {
                self.link.send(&EqptCmd::PenUp)?;
            }

            self.link.send(&EqptCmd::RotateJoint {
                ang1_deg: joints.theta1_deg,
                ang2_deg: joints.theta2_deg,
            })?;

            if i == 0 {
                self.link.send(&EqptCmd::PenDown)?;
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::kin;
    use scara_if::eqpt::{MotorSpeed, Rgb, Switch};
    use scara_if::net::MemoryLink;

    fn new_exec() -> Exec<MemoryLink> {
        Exec::new(MemoryLink::default())
    }

    #[test]
    fn test_simple_commands() {
        let mut exec = new_exec();

        exec.exec(&ScaraCmd::MotorSpeed(MotorSpeed::High)).unwrap();
        exec.exec(&ScaraCmd::PenColor(Rgb { r: 0, g: 0, b: 255 }))
            .unwrap();
        exec.exec(&ScaraCmd::CyclePenColors(Switch::On)).unwrap();
        exec.exec(&ScaraCmd::ClearTrace).unwrap();

        assert_eq!(
            exec.link.lines,
            vec![
                "MOTOR_SPEED HIGH",
                "PEN_COLOR 0 0 255",
                "CYCLE_PEN_COLOR ON",
                "CLEAR_TRACE",
            ]
        );
        assert_eq!(exec.state.speed, MotorSpeed::High);
        assert_eq!(exec.state.pen_color, Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(exec.state.cycle, Switch::On);
    }

    #[test]
    fn test_pen_position() {
        let mut exec = new_exec();
        exec.exec(&ScaraCmd::PenPos(PenPos::Up)).unwrap();
        assert_eq!(exec.link.lines, vec!["PEN_UP"]);
        assert_eq!(exec.state.pen_pos, PenPos::Up);
    }

    #[test]
    fn test_end_session() {
        let mut exec = new_exec();
        let outcome = exec.exec(&ScaraCmd::EndRemoteConnection).unwrap();
        assert_eq!(outcome, ExecOutcome::EndSession);
        assert!(exec.link.lines.is_empty());
    }

    #[test]
    fn test_shutdown_keeps_session_open() {
        let mut exec = new_exec();
        let outcome = exec.exec(&ScaraCmd::ShutdownSimulation).unwrap();
        assert_eq!(outcome, ExecOutcome::Continue);
        assert_eq!(exec.link.lines, vec!["SHUTDOWN_SIMULATION"]);

        // Commands after a shutdown still execute
        exec.exec(&ScaraCmd::ClearTrace).unwrap();
        assert_eq!(exec.link.lines[1], "CLEAR_TRACE");
    }

    #[test]
    fn test_home() {
        let mut exec = new_exec();
        exec.exec(&ScaraCmd::MotorSpeed(MotorSpeed::Low)).unwrap();
        exec.exec(&ScaraCmd::Home).unwrap();

        assert_eq!(exec.link.lines[1], "HOME");
        assert_eq!(exec.state.position, Vector2::new(600.0, 0.0));
        assert_eq!(exec.state.joints.theta1_deg, 0.0);
        // Equipment settings survive homing
        assert_eq!(exec.state.speed, MotorSpeed::Low);
    }

    #[test]
    fn test_move_to_emission_order() {
        let mut exec = new_exec();
        exec.exec(&ScaraCmd::MoveTo { x: 400.0, y: 200.0 }).unwrap();

        // ~283 units at the default density is 9 interior points, 11
        // waypoints, framed by the pen lift and drop around the first.
        let lines = &exec.link.lines;
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "PEN_UP");
        assert!(lines[1].starts_with("ROTATE_JOINT ANG1 "));
        assert_eq!(lines[2], "PEN_DOWN");
        assert!(lines[3..].iter().all(|l| l.starts_with("ROTATE_JOINT")));

        assert_eq!(exec.state.position, Vector2::new(400.0, 200.0));
        assert_eq!(exec.state.config, kin::ArmConfig::Right);
    }

    #[test]
    fn test_unreachable_path_emits_nothing() {
        let mut exec = new_exec();
        let result = exec.exec(&ScaraCmd::MoveTo { x: 700.0, y: 0.0 });

        assert!(matches!(result, Err(ExecError::Path(PathError::Unreachable))));
        assert!(exec.link.lines.is_empty());
        // State stays where it was
        assert_eq!(exec.state.position, Vector2::new(600.0, 0.0));
    }

    #[test]
    fn test_draw_rectangle_edge_count() {
        let mut exec = new_exec();

        exec.exec(&ScaraCmd::DrawRectangle {
            xbl: 100.0,
            ybl: 100.0,
            xtr: 400.0,
            ytr: 300.0,
            res: Resolution::Low,
        })
        .unwrap();

        // Vertical edges (200 units, 3 interior points) stream 7 lines
        // each, horizontal edges (300 units, 5 interior points) 9 each.
        assert_eq!(exec.link.lines.len(), 32);

        // The traversal ends back at the bottom-left corner
        assert_eq!(exec.state.position, Vector2::new(100.0, 100.0));
    }

    #[test]
    fn test_transform_applies_to_drawing() {
        let mut exec = new_exec();
        exec.exec(&ScaraCmd::AddTranslation { dx: -100.0, dy: 0.0 })
            .unwrap();

        // A degenerate line at (500, 0) lands the effector at the mapped
        // point (400, 0), while the mirrored position stays in command
        // coordinates.
        exec.exec(&ScaraCmd::DrawLine {
            x0: 500.0,
            y0: 0.0,
            x1: 500.0,
            y1: 0.0,
            res: Resolution::Low,
        })
        .unwrap();

        let expected = kin::inverse(&Vector2::new(400.0, 0.0)).right.unwrap();
        assert!((exec.state.joints.theta1_deg - expected.theta1_deg).abs() < 1e-9);
        assert!((exec.state.joints.theta2_deg - expected.theta2_deg).abs() < 1e-9);
        assert_eq!(exec.state.position, Vector2::new(500.0, 0.0));
    }

    #[test]
    fn test_reset_transform() {
        let mut exec = new_exec();
        exec.exec(&ScaraCmd::AddScaling { sx: 2.0, sy: 2.0 }).unwrap();
        exec.exec(&ScaraCmd::ResetTransformMatrix).unwrap();
        assert_eq!(exec.transform, TransformAccumulator::new());
    }

    #[test]
    fn test_query_state_sends_nothing() {
        let mut exec = new_exec();
        let outcome = exec.exec(&ScaraCmd::QueryState).unwrap();
        assert_eq!(outcome, ExecOutcome::Continue);
        assert!(exec.link.lines.is_empty());
    }
}
