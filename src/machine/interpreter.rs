//! Command Interpreter
//!
//! Executes parsed commands against the modal state and turns motion
//! commands into waypoint sequences.

use crate::config::{MachineConfig, MotionConfig};
use crate::interpolation::{self, ArcDirection, Waypoint};
use crate::machine::state::{MachineState, Units};
use crate::parser::{self, ParsedCommand};

/// Outcome of a G92 command
#[derive(Debug, Clone, PartialEq)]
pub enum SetPosition {
    /// Bare G92: offset reset to zero
    ClearOffset,
    /// Current position redefined as `position`
    SetOffset { position: Waypoint, offset: Waypoint },
}

/// What a single command did, with only the data relevant to its kind
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    MoveLinear {
        waypoints: Vec<Waypoint>,
        speed: f64,
        rapid: bool,
    },
    MoveArc {
        waypoints: Vec<Waypoint>,
        center: Waypoint,
        speed: f64,
        direction: ArcDirection,
    },
    Dwell {
        seconds: f64,
    },
    /// G28. With an intermediate point the move is reported but not
    /// performed, so `waypoints` is empty.
    Home {
        waypoints: Vec<Waypoint>,
        intermediate: Option<Waypoint>,
        home: Waypoint,
    },
    SetPosition(SetPosition),
    Mode {
        absolute_mode: bool,
    },
    Units(Units),
    ToolChange {
        tool: i64,
    },
    End,
    Unknown {
        raw: String,
    },
}

impl ExecutionResult {
    /// Short upper-case name used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionResult::MoveLinear { .. } => "MOVE_LINEAR",
            ExecutionResult::MoveArc { .. } => "MOVE_ARC",
            ExecutionResult::Dwell { .. } => "DWELL",
            ExecutionResult::Home { .. } => "HOME",
            ExecutionResult::SetPosition(_) => "SET_POSITION",
            ExecutionResult::Mode { .. } => "MODE",
            ExecutionResult::Units(_) => "UNITS",
            ExecutionResult::ToolChange { .. } => "TOOL_CHANGE",
            ExecutionResult::End => "END",
            ExecutionResult::Unknown { .. } => "UNKNOWN",
        }
    }

    /// Waypoints produced by this command, empty for non-motion results
    pub fn waypoints(&self) -> &[Waypoint] {
        match self {
            ExecutionResult::MoveLinear { waypoints, .. }
            | ExecutionResult::MoveArc { waypoints, .. }
            | ExecutionResult::Home { waypoints, .. } => waypoints.as_slice(),
            _ => &[],
        }
    }
}

/// Apply one command to `state`, returning the successor state and the result.
///
/// Never fails: unknown codes become `ExecutionResult::Unknown`.
pub fn execute(
    state: &MachineState,
    command: &ParsedCommand,
    config: &MachineConfig,
) -> (MachineState, ExecutionResult) {
    let mut next = state.clone();
    next.command_count += 1;

    let result = match command.code.as_str() {
        "G0" => linear_move(&mut next, command, &config.motion, true),
        "G1" => linear_move(&mut next, command, &config.motion, false),
        "G2" => arc_move(&mut next, command, &config.motion, ArcDirection::Clockwise),
        "G3" => arc_move(
            &mut next,
            command,
            &config.motion,
            ArcDirection::CounterClockwise,
        ),
        "G4" => ExecutionResult::Dwell {
            seconds: command.get('P').unwrap_or(0.0),
        },
        "G20" => set_units(&mut next, Units::Inches),
        "G21" => set_units(&mut next, Units::Millimeters),
        "G28" => home(&mut next, command, &config.motion),
        "G90" => set_mode(&mut next, true),
        "G91" => set_mode(&mut next, false),
        "G92" => set_position(&mut next, command),
        "M2" => ExecutionResult::End,
        "M6" => ExecutionResult::ToolChange {
            tool: command.get('T').unwrap_or(0.0) as i64,
        },
        _ => ExecutionResult::Unknown {
            raw: command.raw.clone(),
        },
    };

    (next, result)
}

/// Target of a motion command in the internal frame
fn resolve_target(state: &MachineState, command: &ParsedCommand) -> Waypoint {
    let current = state.external_position();

    let external = if state.absolute_mode {
        Waypoint::new(
            command.get('X').unwrap_or(current.x),
            command.get('Y').unwrap_or(current.y),
        )
    } else {
        Waypoint::new(
            current.x + command.get('X').unwrap_or(0.0),
            current.y + command.get('Y').unwrap_or(0.0),
        )
    };

    state.to_internal(external)
}

fn update_feed_rate(state: &mut MachineState, command: &ParsedCommand, motion: &MotionConfig) {
    if let Some(feed) = command.get('F') {
        state.feed_rate = feed.min(motion.max_feed_rate);
    }
}

fn linear_move(
    state: &mut MachineState,
    command: &ParsedCommand,
    motion: &MotionConfig,
    rapid: bool,
) -> ExecutionResult {
    let target = resolve_target(state, command);
    update_feed_rate(state, command, motion);

    let speed = if rapid {
        motion.max_feed_rate
    } else {
        state.feed_rate
    };

    let waypoints = interpolation::line(
        state.current_position,
        target,
        motion.line_segments_per_unit,
        motion.max_segments_per_move,
    );
    state.current_position = target;

    ExecutionResult::MoveLinear {
        waypoints,
        speed,
        rapid,
    }
}

fn arc_move(
    state: &mut MachineState,
    command: &ParsedCommand,
    motion: &MotionConfig,
    direction: ArcDirection,
) -> ExecutionResult {
    let target = resolve_target(state, command);

    // I/J are relative to the position before the move
    let center = Waypoint::new(
        state.current_position.x + command.get('I').unwrap_or(0.0),
        state.current_position.y + command.get('J').unwrap_or(0.0),
    );

    update_feed_rate(state, command, motion);

    let waypoints = interpolation::arc(
        state.current_position,
        target,
        center,
        direction,
        motion.arc_segments_per_unit,
        motion.max_segments_per_move,
    );
    state.current_position = target;

    ExecutionResult::MoveArc {
        waypoints,
        center,
        speed: state.feed_rate,
        direction,
    }
}

fn home(
    state: &mut MachineState,
    command: &ParsedCommand,
    motion: &MotionConfig,
) -> ExecutionResult {
    let home = state.home_position;

    if command.has('X') || command.has('Y') {
        // Reported only: no waypoints and the position is left untouched
        let intermediate = Waypoint::new(
            command.get('X').unwrap_or(state.current_position.x),
            command.get('Y').unwrap_or(state.current_position.y),
        );
        return ExecutionResult::Home {
            waypoints: Vec::new(),
            intermediate: Some(intermediate),
            home,
        };
    }

    let waypoints = interpolation::line(
        state.current_position,
        home,
        motion.line_segments_per_unit,
        motion.max_segments_per_move,
    );
    state.current_position = home;

    ExecutionResult::Home {
        waypoints,
        intermediate: None,
        home,
    }
}

fn set_position(state: &mut MachineState, command: &ParsedCommand) -> ExecutionResult {
    if !command.has_parameters() {
        state.offset = Waypoint::default();
        return ExecutionResult::SetPosition(SetPosition::ClearOffset);
    }

    let current = state.external_position();
    let position = Waypoint::new(
        command.get('X').unwrap_or(current.x),
        command.get('Y').unwrap_or(current.y),
    );

    state.offset = Waypoint::new(
        state.current_position.x - position.x,
        state.current_position.y - position.y,
    );

    ExecutionResult::SetPosition(SetPosition::SetOffset {
        position,
        offset: state.offset,
    })
}

fn set_units(state: &mut MachineState, units: Units) -> ExecutionResult {
    state.units = units;
    ExecutionResult::Units(units)
}

fn set_mode(state: &mut MachineState, absolute_mode: bool) -> ExecutionResult {
    state.absolute_mode = absolute_mode;
    ExecutionResult::Mode { absolute_mode }
}

/// One motion program's worth of interpreter session
#[derive(Debug, Clone)]
pub struct Interpreter {
    config: MachineConfig,
    state: MachineState,
}

impl Interpreter {
    pub fn new(config: MachineConfig) -> Self {
        let state = MachineState::new(&config.motion);
        Self { config, state }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Position in the program's coordinate frame
    pub fn current_position(&self) -> Waypoint {
        self.state.external_position()
    }

    pub fn execute(&mut self, command: &ParsedCommand) -> ExecutionResult {
        let (next, result) = execute(&self.state, command, &self.config);
        log::debug!(
            "#{} {} -> {} ({} waypoints)",
            next.command_count,
            command.raw,
            result.kind(),
            result.waypoints().len()
        );
        self.state = next;
        result
    }

    /// Parse and execute a line, `None` for blank and comment-only lines
    pub fn execute_line(&mut self, line: &str) -> Option<ExecutionResult> {
        let command = parser::parse_line(line)?;
        Some(self.execute(&command))
    }

    /// Back to the power-on state
    pub fn reset(&mut self) {
        self.state = MachineState::new(&self.config.motion);
    }
}
