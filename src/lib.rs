//! SCARA G-code converter
//!
//! Turns G-code programs into servo angle streams for a two-link planar arm.
//!
//! This library provides:
//! - Lenient G-code line parsing
//! - A modal interpreter (units, absolute/incremental, G92 offsets)
//! - Line and arc interpolation
//! - Closed-form SCARA kinematics
//! - The waypoint-to-servo pipeline and stream export

pub mod config;
pub mod interpolation;
pub mod kinematics;
pub mod machine;
pub mod parser;
pub mod pipeline;

// Re-exports for clean public API
pub use config::{Config, MachineConfig};
pub use interpolation::{ArcDirection, Waypoint};
pub use kinematics::{Elbow, JointAngles, KinematicsError, ScaraKinematics};
pub use machine::{ExecutionResult, Interpreter, MachineState};
pub use parser::{parse_line, ParsedCommand};
pub use pipeline::{ActuatorCommand, Pipeline, PipelineOutput};
