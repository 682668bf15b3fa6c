//! Core geometry types shared by every component.

mod point;
mod pose;

pub use point::{GridCoord, MapPoint, WorldPoint};
pub use pose::Pose2D;
