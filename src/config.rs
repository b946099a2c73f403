//! Configuration management for the SCARA G-code converter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Machine configuration (arm geometry, motion limits, servo calibration)
//! - Config file resolution: explicit path, user config dir, embedded default

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::machine::Units;

/// Default machine configuration shipped with the binary
const EMBEDDED_MACHINE_TOML: &str = include_str!("../resources/machine.toml");

/// Command-line arguments for the converter
#[derive(Debug, Parser)]
#[command(name = "scara-gcode")]
#[command(about = "Convert G-code into servo angle pairs for a SCARA arm")]
#[command(version)]
pub struct Args {
    /// G-code program to convert ("-" reads stdin)
    pub input: PathBuf,

    /// Where to write the angle stream
    #[arg(
        short,
        long,
        default_value = "moves.txt",
        help = "Output file for angle pairs (\"-\" writes stdout)"
    )]
    pub output: PathBuf,

    /// Machine configuration file
    #[arg(long, help = "Machine configuration TOML file")]
    pub config: Option<PathBuf>,

    /// Print statistics as JSON
    #[arg(long)]
    pub stats: bool,

    /// Print the first N angle pairs
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Refuse to write output when any point was unreachable
    #[arg(long)]
    pub strict: bool,

    /// Log level for the converter
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub print_stats: bool,
    pub preview_lines: Option<usize>,
    pub strict: bool,
    pub log_level: String,
    /// Machine description resolved from the config file chain
    pub machine: MachineConfig,
    /// File the machine config came from, `None` for the embedded default
    pub machine_config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let (machine, machine_config_path) = match args.config {
            Some(path) => (MachineConfig::load_from_file(&path)?, Some(path)),
            None => match user_machine_config_path().filter(|p| p.is_file()) {
                Some(path) => (MachineConfig::load_from_file(&path)?, Some(path)),
                None => (MachineConfig::embedded(), None),
            },
        };

        Ok(Config {
            input: args.input,
            output: args.output,
            print_stats: args.stats,
            preview_lines: args.preview,
            strict: args.strict,
            log_level: args.log_level,
            machine,
            machine_config_path,
        })
    }
}

/// `~/.config/scara-gcode/machine.toml` on Linux, platform equivalent elsewhere
pub fn user_machine_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scara-gcode").join("machine.toml"))
}

/// Everything the core needs to know about the physical machine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "MachineFile")]
pub struct MachineConfig {
    pub arm: ArmConfig,
    pub motion: MotionConfig,
    /// Shoulder servo
    pub servo1: ServoConfig,
    /// Elbow servo
    pub servo2: ServoConfig,
    pub dwell: DwellConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            arm: ArmConfig::default(),
            motion: MotionConfig::default(),
            servo1: ServoConfig::SHOULDER,
            servo2: ServoConfig::ELBOW,
            dwell: DwellConfig::default(),
        }
    }
}

/// On-disk layout; servo sections only override the keys they name
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MachineFile {
    arm: ArmConfig,
    motion: MotionConfig,
    servo1: ServoSection,
    servo2: ServoSection,
    dwell: DwellConfig,
}

impl From<MachineFile> for MachineConfig {
    fn from(file: MachineFile) -> Self {
        Self {
            arm: file.arm,
            motion: file.motion,
            servo1: file.servo1.over(ServoConfig::SHOULDER),
            servo2: file.servo2.over(ServoConfig::ELBOW),
            dwell: file.dwell,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServoSection {
    min: Option<i32>,
    max: Option<i32>,
    home: Option<i32>,
    offset: Option<f64>,
}

impl ServoSection {
    fn over(self, base: ServoConfig) -> ServoConfig {
        ServoConfig {
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
            home: self.home.unwrap_or(base.home),
            offset: self.offset.unwrap_or(base.offset),
        }
    }
}

/// Link lengths, shoulder to elbow and elbow to wrist
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArmConfig {
    pub l1: f64,
    pub l2: f64,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self { l1: 6.0, l2: 6.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub default_feed_rate: f64,
    /// Ceiling for F words, also the speed of G0 moves
    pub max_feed_rate: f64,
    pub home_x: f64,
    pub home_y: f64,
    pub default_units: Units,
    /// Interpolation density for G0/G1/G28
    pub line_segments_per_unit: f64,
    /// Interpolation density for G2/G3
    pub arc_segments_per_unit: f64,
    /// Ceiling on segments for a single move, however long
    pub max_segments_per_move: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            default_feed_rate: 2.0,
            max_feed_rate: 10.0,
            home_x: 6.0,
            home_y: 6.0,
            default_units: Units::Inches,
            line_segments_per_unit: 5.0,
            arc_segments_per_unit: 10.0,
            max_segments_per_move: 10_000,
        }
    }
}

/// Limits and calibration of a single hobby servo, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServoConfig {
    pub min: i32,
    pub max: i32,
    pub home: i32,
    /// Added to the joint angle before clamping
    pub offset: f64,
}

impl ServoConfig {
    pub const SHOULDER: Self = Self {
        min: 0,
        max: 180,
        home: 75,
        offset: 0.0,
    };

    pub const ELBOW: Self = Self {
        min: 0,
        max: 180,
        home: 120,
        offset: 0.0,
    };

    /// Calibrate, clamp and round a joint angle into a servo command
    pub fn command_for(&self, angle_deg: f64) -> i32 {
        // an inverted range resolves to `max`
        let adjusted = (angle_deg + self.offset)
            .max(self.min as f64)
            .min(self.max as f64);
        adjusted.round_ties_even() as i32
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            bail!("[{}] min ({}) is greater than max ({})", name, self.min, self.max);
        }
        if !self.offset.is_finite() {
            bail!("[{}] offset must be a finite number", name);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DwellConfig {
    /// Duplicate angle pairs emitted per second of G4 dwell
    pub repeats_per_second: f64,
    /// Ceiling on duplicates for a single G4
    pub max_repeats: usize,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            repeats_per_second: 2.0,
            max_repeats: 1_200,
        }
    }
}

impl MachineConfig {
    /// Parse a machine config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MachineConfig =
            toml::from_str(content).context("Invalid machine configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the solver and servo mapping cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, length) in [("l1", self.arm.l1), ("l2", self.arm.l2)] {
            if !(length.is_finite() && length > 0.0) {
                bail!("[arm] {} must be a positive length, got {}", name, length);
            }
        }
        self.servo1.validate("servo1")?;
        self.servo2.validate("servo2")?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read machine config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load machine config {}", path.display()))?;
        log::debug!("Loaded machine config from {}", path.display());
        Ok(config)
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Self {
        match Self::from_toml_str(EMBEDDED_MACHINE_TOML) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded machine config: {:#}. Using built-in defaults.",
                    e
                );
                Self::default()
            }
        }
    }
}
