//! Actuator Pipeline Engine
//!
//! Drives the interpreter over a whole program and converts every waypoint
//! into a servo command. Unreachable points are recorded and skipped; the
//! rest of the program keeps going.

use std::fmt;
use std::iter;

use serde::Serialize;

use crate::config::MachineConfig;
use crate::interpolation::Waypoint;
use crate::kinematics::{Elbow, KinematicsError, ScaraKinematics};
use crate::machine::{ExecutionResult, Interpreter};

/// Integer servo angles sent to the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActuatorCommand {
    pub servo1: i32,
    pub servo2: i32,
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.servo1, self.servo2)
    }
}

/// A waypoint that could not be converted
#[derive(Debug, Clone, PartialEq)]
pub struct PointError {
    /// 1-based line in the program text
    pub line: usize,
    pub position: Waypoint,
    pub error: KinematicsError,
}

impl fmt::Display for PointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {}: Position ({:.2}, {:.2}) - {}",
            self.line, self.position.x, self.position.y, self.error
        )
    }
}

/// Everything a program run produced, including partial output on errors
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub commands: Vec<ActuatorCommand>,
    pub errors: Vec<PointError>,
    /// Whether an M2 stopped processing
    pub reached_end: bool,
}

impl Default for PipelineOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineOutput {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            errors: Vec::new(),
            reached_end: false,
        }
    }

    pub fn add_error(&mut self, line: usize, position: Waypoint, error: KinematicsError) {
        self.errors.push(PointError {
            line,
            position,
            error,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Converts G-code programs into actuator command streams
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: MachineConfig,
    kinematics: ScaraKinematics,
}

impl Pipeline {
    pub fn new(config: MachineConfig) -> Self {
        let kinematics = ScaraKinematics::from_config(&config.arm);
        Self { config, kinematics }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn kinematics(&self) -> &ScaraKinematics {
        &self.kinematics
    }

    /// The configured servo home pair, first and last in every stream
    pub fn home_command(&self) -> ActuatorCommand {
        ActuatorCommand {
            servo1: self.config.servo1.home,
            servo2: self.config.servo2.home,
        }
    }

    /// Solve, calibrate and clamp a single waypoint
    pub fn to_actuator(&self, waypoint: Waypoint) -> Result<ActuatorCommand, KinematicsError> {
        let angles = self.kinematics.inverse(waypoint.x, waypoint.y, Elbow::Up)?;
        Ok(ActuatorCommand {
            servo1: self.config.servo1.command_for(angles.theta1_deg),
            servo2: self.config.servo2.command_for(angles.theta2_deg),
        })
    }

    /// Run a complete program with a fresh interpreter
    pub fn process(&self, content: &str) -> PipelineOutput {
        let mut interpreter = Interpreter::new(self.config.clone());
        let mut output = PipelineOutput::new();
        output.commands.push(self.home_command());

        for (line_idx, line) in content.lines().enumerate() {
            let line_num = line_idx + 1;

            let Some(result) = interpreter.execute_line(line) else {
                continue;
            };

            match result {
                ExecutionResult::MoveLinear { waypoints, .. }
                | ExecutionResult::MoveArc { waypoints, .. }
                | ExecutionResult::Home { waypoints, .. } => {
                    self.append_waypoints(line_num, &waypoints, &mut output);
                }
                ExecutionResult::Dwell { seconds } => {
                    self.append_dwell(seconds, &mut output);
                }
                ExecutionResult::End => {
                    output.commands.push(self.home_command());
                    output.reached_end = true;
                    break;
                }
                ExecutionResult::Unknown { raw } => {
                    log::warn!("Line {}: ignoring unknown command '{}'", line_num, raw);
                }
                ExecutionResult::SetPosition(_)
                | ExecutionResult::Mode { .. }
                | ExecutionResult::Units(_)
                | ExecutionResult::ToolChange { .. } => {}
            }
        }

        log::info!(
            "Generated {} actuator commands ({} points skipped)",
            output.commands.len(),
            output.errors.len()
        );

        output
    }

    fn append_waypoints(
        &self,
        line_num: usize,
        waypoints: &[Waypoint],
        output: &mut PipelineOutput,
    ) {
        for &waypoint in waypoints {
            match self.to_actuator(waypoint) {
                Ok(command) => output.commands.push(command),
                Err(error) => {
                    log::warn!("Line {}: skipping point: {}", line_num, error);
                    output.add_error(line_num, waypoint, error);
                }
            }
        }
    }

    /// Hold the last pose by repeating it; the firmware has no real timer
    fn append_dwell(&self, seconds: f64, output: &mut PipelineOutput) {
        if seconds <= 0.0 {
            return;
        }

        let Some(&last) = output.commands.last() else {
            return;
        };

        let wanted = (seconds * self.config.dwell.repeats_per_second).floor();
        if wanted.is_nan() || wanted < 1.0 {
            return;
        }

        let max_repeats = self.config.dwell.max_repeats;
        let repeats = if wanted > max_repeats as f64 {
            log::warn!(
                "Dwell of {}s needs {:.0} repeats, capping at {}",
                seconds,
                wanted,
                max_repeats
            );
            max_repeats
        } else {
            wanted as usize
        };

        output.commands.extend(iter::repeat_n(last, repeats));
    }
}

/// Convert a program with the given machine configuration
pub fn convert_program(content: &str, config: &MachineConfig) -> PipelineOutput {
    Pipeline::new(config.clone()).process(content)
}
