//! Point and coordinate types for the three frames the controller works in:
//! world (meters), continuous map (cells, f32), and grid (cell indices).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices into the semantic map)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (meters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters
    pub x: f32,
    /// Y coordinate in meters
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// L1 (Manhattan) distance to another point
    #[inline]
    pub fn l1_distance(&self, other: &WorldPoint) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Continuous map-frame coordinates (cells, f32).
///
/// Produced by `SemanticSlam::robot_to_map`; fractional positions are
/// meaningful for the learned exploration goal arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    /// X coordinate in cells (column)
    pub x: f32,
    /// Y coordinate in cells (row)
    pub y: f32,
}

impl MapPoint {
    /// Create a new map point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Round to the nearest grid cell
    #[inline]
    pub fn to_grid(&self) -> GridCoord {
        GridCoord::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Clamp both components into `[0, size - 1]`
    #[inline]
    pub fn clamp_to(&self, size: usize) -> MapPoint {
        let max = (size.saturating_sub(1)) as f32;
        MapPoint::new(self.x.clamp(0.0, max), self.y.clamp(0.0, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_point_distances() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
        assert!((a.l1_distance(&b) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_point_to_grid() {
        assert_eq!(MapPoint::new(2.4, 3.6).to_grid(), GridCoord::new(2, 4));
    }

    #[test]
    fn test_map_point_clamp() {
        let p = MapPoint::new(-1.0, 12.5).clamp_to(10);
        assert_eq!(p, MapPoint::new(0.0, 9.0));
    }

    #[test]
    fn test_grid_coord_manhattan() {
        let a = GridCoord::new(1, 2);
        let b = GridCoord::new(4, -2);
        assert_eq!(a.manhattan_distance(&b), 7);
    }
}
