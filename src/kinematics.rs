//! SCARA Kinematics
//!
//! Closed-form inverse and forward kinematics for a two-link planar arm.
//! Angles are exchanged in degrees, lengths in whatever unit the arm
//! configuration uses.

use serde::Serialize;
use thiserror::Error;

use crate::config::ArmConfig;
use crate::interpolation::Waypoint;

/// Below this distance from the base the target is treated as the origin.
const SINGULARITY_EPSILON: f64 = 0.001;

/// Reasons a Cartesian target cannot be turned into joint angles
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error("position ({x:.2}, {y:.2}) out of reach: distance {distance:.2} > max reach {max_reach:.2}")]
    OutOfReach {
        x: f64,
        y: f64,
        distance: f64,
        max_reach: f64,
    },

    #[error("position ({x:.2}, {y:.2}) too close: distance {distance:.2} < min reach {min_reach:.2}")]
    TooClose {
        x: f64,
        y: f64,
        distance: f64,
        min_reach: f64,
    },
}

/// Which of the two joint solutions to pick for a reachable target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Elbow {
    /// Positive elbow angle
    #[default]
    Up,
    /// Negative elbow angle
    Down,
}

/// Joint angles in degrees, before any servo calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointAngles {
    pub theta1_deg: f64,
    pub theta2_deg: f64,
}

/// Reach envelope and link lengths of the arm
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkspaceBounds {
    pub max_reach: f64,
    pub min_reach: f64,
    pub l1: f64,
    pub l2: f64,
}

/// Two-link planar arm solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaraKinematics {
    l1: f64,
    l2: f64,
    max_reach: f64,
    min_reach: f64,
}

impl ScaraKinematics {
    pub fn new(l1: f64, l2: f64) -> Self {
        Self {
            l1,
            l2,
            max_reach: l1 + l2,
            min_reach: (l1 - l2).abs(),
        }
    }

    pub fn from_config(arm: &ArmConfig) -> Self {
        Self::new(arm.l1, arm.l2)
    }

    /// Solve the joint angles that place the end effector at `(x, y)`.
    ///
    /// The elbow cosine is clamped to `[-1, 1]` so targets sitting exactly on
    /// the reach boundary survive floating-point drift.
    pub fn inverse(
        &self,
        x: f64,
        y: f64,
        elbow: Elbow,
    ) -> Result<JointAngles, KinematicsError> {
        let distance = x.hypot(y);

        if distance > self.max_reach {
            return Err(KinematicsError::OutOfReach {
                x,
                y,
                distance,
                max_reach: self.max_reach,
            });
        }

        if distance < self.min_reach {
            return Err(KinematicsError::TooClose {
                x,
                y,
                distance,
                min_reach: self.min_reach,
            });
        }

        if distance < SINGULARITY_EPSILON {
            return Ok(JointAngles {
                theta1_deg: 0.0,
                theta2_deg: 0.0,
            });
        }

        let cos_theta2 = ((x * x + y * y - self.l1 * self.l1 - self.l2 * self.l2)
            / (2.0 * self.l1 * self.l2))
            .clamp(-1.0, 1.0);

        let theta2 = match elbow {
            Elbow::Up => cos_theta2.acos(),
            Elbow::Down => -cos_theta2.acos(),
        };

        let k1 = self.l1 + self.l2 * theta2.cos();
        let k2 = self.l2 * theta2.sin();
        let theta1 = y.atan2(x) - k2.atan2(k1);

        Ok(JointAngles {
            theta1_deg: theta1.to_degrees(),
            theta2_deg: theta2.to_degrees(),
        })
    }

    /// End-effector position for the given joint angles
    pub fn forward(&self, theta1_deg: f64, theta2_deg: f64) -> Waypoint {
        let theta1 = theta1_deg.to_radians();
        let theta2 = theta2_deg.to_radians();
        let elbow = self.elbow_position(theta1_deg);

        Waypoint::new(
            elbow.x + self.l2 * (theta1 + theta2).cos(),
            elbow.y + self.l2 * (theta1 + theta2).sin(),
        )
    }

    /// Position of the elbow joint for a given shoulder angle
    pub fn elbow_position(&self, theta1_deg: f64) -> Waypoint {
        let theta1 = theta1_deg.to_radians();
        Waypoint::new(self.l1 * theta1.cos(), self.l1 * theta1.sin())
    }

    pub fn is_reachable(&self, x: f64, y: f64) -> bool {
        let distance = x.hypot(y);
        self.min_reach <= distance && distance <= self.max_reach
    }

    pub fn workspace_bounds(&self) -> WorkspaceBounds {
        WorkspaceBounds {
            max_reach: self.max_reach,
            min_reach: self.min_reach,
            l1: self.l1,
            l2: self.l2,
        }
    }
}
