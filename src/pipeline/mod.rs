//! Waypoint-to-Actuator Pipeline
//!
//! From program text to the integer servo stream, plus the helpers that
//! write and summarize that stream.

pub mod engine;
pub mod export;

pub use engine::{convert_program, ActuatorCommand, Pipeline, PipelineOutput, PointError};
pub use export::{export_to_file, preview, write_actuator_stream, Statistics};
