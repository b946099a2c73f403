//! Modal machine state
//!
//! Plain value type. Transitions are computed by `interpreter::execute`,
//! which returns a new state instead of mutating in place.

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::interpolation::Waypoint;

/// Length units selected by G20/G21.
///
/// Advisory only: nothing is rescaled when the units change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Inches,
    #[serde(alias = "mm")]
    Millimeters,
}

/// Persistent interpreter state across command lines
#[derive(Debug, Clone, PartialEq)]
pub struct MachineState {
    /// G90 (true) or G91 (false)
    pub absolute_mode: bool,
    pub units: Units,
    /// Arm position in the internal frame
    pub current_position: Waypoint,
    /// Internal minus external coordinates, set by G92
    pub offset: Waypoint,
    pub feed_rate: f64,
    pub home_position: Waypoint,
    pub command_count: u64,
}

impl MachineState {
    /// Power-on state for the given motion settings
    pub fn new(motion: &MotionConfig) -> Self {
        let home = Waypoint::new(motion.home_x, motion.home_y);
        Self {
            absolute_mode: true,
            units: motion.default_units,
            current_position: home,
            offset: Waypoint::default(),
            feed_rate: motion.default_feed_rate,
            home_position: home,
            command_count: 0,
        }
    }

    /// Convert a program coordinate into the internal frame.
    ///
    /// `internal = external + offset`, the inverse of G92's
    /// `offset = internal − requested`. Incremental targets are resolved in
    /// the external frame first, so the offset is applied exactly once.
    pub fn to_internal(&self, external: Waypoint) -> Waypoint {
        Waypoint::new(external.x + self.offset.x, external.y + self.offset.y)
    }

    /// Convert an internal coordinate into the program frame
    pub fn to_external(&self, internal: Waypoint) -> Waypoint {
        Waypoint::new(internal.x - self.offset.x, internal.y - self.offset.y)
    }

    /// Current position as the running program sees it
    pub fn external_position(&self) -> Waypoint {
        self.to_external(self.current_position)
    }
}
