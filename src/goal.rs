//! Navigation goal representation.

use std::fmt;

use crate::core::Pose2D;
use crate::semantic_map::GoalMask;

/// A navigation goal: a single absolute pose, or a binary mask of acceptable
/// destination cells over the global semantic map.
///
/// Modeled as a sum type so every consumption site matches exhaustively and
/// the "both or neither supplied" contract violation cannot be expressed.
#[derive(Clone, Debug, PartialEq)]
pub enum Goal {
    /// Absolute world pose to reach.
    Point(Pose2D),
    /// Binary grid over the map; reached when the robot's cell is marked.
    Mask(GoalMask),
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Point(pose) => write!(
                f,
                "point ({:.2}, {:.2}, {:.1}°)",
                pose.x,
                pose.y,
                pose.theta.to_degrees()
            ),
            Goal::Mask(mask) => write!(f, "mask ({} cells)", mask.count()),
        }
    }
}
