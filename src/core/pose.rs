//! 2D pose type for robot position and orientation.
//!
//! World frame, X-forward, counter-clockwise positive rotation.

use crate::utils::{angle_diff, normalize_angle};

use super::point::WorldPoint;

/// A 2D pose: position in meters plus heading in radians.
///
/// Theta is always kept normalized to (-π, π]. Only the robot driver mutates
/// the robot's pose; the controller reads it every control cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians (-π, π], CCW positive.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose; theta is normalized.
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Position component as a world point.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Apply `other` in this pose's frame.
    ///
    /// This is how a goal expressed relative to the robot becomes an absolute
    /// goal: rotate the offset by the robot's heading, translate, sum angles.
    #[inline]
    pub fn compose(&self, other: Pose2D) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            self.x + other.x * cos - other.y * sin,
            self.y + other.x * sin + other.y * cos,
            self.theta + other.theta,
        )
    }

    /// Euclidean distance between the position components.
    #[inline]
    pub fn distance(&self, other: &Pose2D) -> f32 {
        self.position().distance(&other.position())
    }

    /// Shortest angular difference to another pose's heading.
    #[inline]
    pub fn heading_error(&self, other: &Pose2D) -> f32 {
        angle_diff(self.theta, other.theta)
    }
}
