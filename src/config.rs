//! Configuration loading for LakshyaNav

use crate::error::{NavError, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub object_search: ObjectSearchConfig,
    #[serde(default)]
    pub frontier: FrontierConfig,
    #[serde(default)]
    pub obstacle: ObstaclePatchConfig,
    #[serde(default)]
    pub recovery: RecoveryPolicy,
}

/// `go_to_object` loop tuning
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectSearchConfig {
    /// Total low-level step budget per object search (default: 250)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Step budget for a `go_to_absolute` call once the object is visible
    /// in the map (default: 50)
    #[serde(default = "default_map_hit_steps")]
    pub map_hit_steps: usize,

    /// Steps to keep pursuing a learned exploration goal before querying the
    /// policy again (default: 10)
    #[serde(default = "default_learned_goal_steps")]
    pub learned_goal_steps: usize,

    /// Goal-reached distance threshold in meters (default: 0.5)
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f32,

    /// Goal-reached heading threshold in degrees (default: 30)
    #[serde(default = "default_angle_threshold_deg")]
    pub angle_threshold_deg: f32,

    /// Record visualization snapshots during the search (default: true)
    #[serde(default = "default_visualize")]
    pub visualize: bool,
}

/// Frontier goal-mask tuning
#[derive(Clone, Debug, Deserialize)]
pub struct FrontierConfig {
    /// Radius in cells of the disk around the robot treated as already
    /// explored (default: 60)
    #[serde(default = "default_explored_disk_radius")]
    pub explored_disk_radius: usize,

    /// Radius in cells of the disk used to erode the frontier mask,
    /// suppressing single-pixel noise goals (default: 10)
    #[serde(default = "default_closing_radius")]
    pub closing_radius: usize,
}

/// Geometry of the obstacle patch inserted at a collision site
#[derive(Clone, Debug, Deserialize)]
pub struct ObstaclePatchConfig {
    /// Patch width in cells, perpendicular to the heading (default: 3)
    #[serde(default = "default_patch_width")]
    pub width: usize,

    /// Patch length in cells, along the heading (default: 2)
    #[serde(default = "default_patch_length")]
    pub length: usize,

    /// Cells of clearance between the robot and the patch (default: 2)
    #[serde(default = "default_patch_buffer")]
    pub buffer: usize,

    /// Cell size in meters (default: 0.05)
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

/// What to do when a collision occurred but no trackback pose is reachable.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPolicy {
    /// Stay in place and keep stepping toward the goal.
    #[default]
    HoldPosition,
    /// Terminate the episode, reporting `path_found = false`.
    AbortEpisode,
}

impl Default for ObjectSearchConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            map_hit_steps: default_map_hit_steps(),
            learned_goal_steps: default_learned_goal_steps(),
            distance_threshold: default_distance_threshold(),
            angle_threshold_deg: default_angle_threshold_deg(),
            visualize: default_visualize(),
        }
    }
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            explored_disk_radius: default_explored_disk_radius(),
            closing_radius: default_closing_radius(),
        }
    }
}

impl Default for ObstaclePatchConfig {
    fn default() -> Self {
        Self {
            width: default_patch_width(),
            length: default_patch_length(),
            buffer: default_patch_buffer(),
            cell_size: default_cell_size(),
        }
    }
}

// Default value functions
fn default_max_steps() -> usize {
    250
}
fn default_map_hit_steps() -> usize {
    50
}
fn default_learned_goal_steps() -> usize {
    10
}
fn default_distance_threshold() -> f32 {
    0.5
}
fn default_angle_threshold_deg() -> f32 {
    30.0
}
fn default_visualize() -> bool {
    true
}
fn default_explored_disk_radius() -> usize {
    60
}
fn default_closing_radius() -> usize {
    10
}
fn default_patch_width() -> usize {
    3
}
fn default_patch_length() -> usize {
    2
}
fn default_patch_buffer() -> usize {
    2
}
fn default_cell_size() -> f32 {
    0.05
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
