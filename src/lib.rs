//! # LakshyaNav
//!
//! Object-goal navigation controller: drives a mobile robot toward a
//! semantically specified target ("find a chair") by closing the loop between
//! an incrementally built semantic occupancy map, a short-term path planner,
//! a collision-recovery trackback mechanism, and learned or frontier
//! exploration.
//!
//! ## Architecture
//!
//! The controller consumes its collaborators through traits
//! ([`ShortTermPlanner`], [`SemanticSlam`], [`RobotDriver`], [`GoalPolicy`],
//! [`NavVisualizer`]) so it can run against remote proxies in production and
//! deterministic fakes in tests. The RPC transport that exposes the
//! controller remotely is out of scope; this crate is the engine behind that
//! surface.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use lakshya_nav::{ExplorationMethod, NavConfig, Navigation, NoopVisualizer};
//!
//! let mut nav = Navigation::new(planner, slam, robot, policy, NoopVisualizer, NavConfig::default());
//!
//! // Search for a chair, preferring map hits over learned exploration
//! nav.go_to_object("chair", ExplorationMethod::Learned)?;
//! ```
//!
//! ## Control flow
//!
//! `go_to_object` repeatedly queries the semantic map for the target
//! category; on a hit it delegates to `go_to_absolute` with a goal mask,
//! otherwise it picks an exploration goal (policy prediction or frontier
//! mask) and takes a single step toward it. `go_to_absolute` drives the
//! planner one waypoint at a time, inserting obstacles and tracking back to
//! a known-reachable pose when the driver reports a collision.

// Core geometry types
pub mod core;

// Known object categories
pub mod categories;

// Semantic map snapshots and goal masks
pub mod semantic_map;

// Goal representation
pub mod goal;

// Collaborator traits
pub mod interfaces;

// Configuration
pub mod config;

// Errors
pub mod error;

// Trackback collision recovery
pub mod trackback;

// Exploration goal selection
pub mod exploration;

// The navigation controller
pub mod navigation;

mod utils;

// Re-export commonly used types
pub use categories::{category_id, category_name, num_categories, CategoryId};
pub use config::{
    FrontierConfig, NavConfig, ObjectSearchConfig, ObstaclePatchConfig, RecoveryPolicy,
};
pub use core::{GridCoord, MapPoint, Pose2D, WorldPoint};
pub use error::{NavError, Result};
pub use goal::Goal;
pub use interfaces::{
    GoalPolicy, MapFeatures, MotionStatus, MoveKind, NavVisualizer, NoopVisualizer, Orientation,
    RobotDriver, SemanticSlam, ShortTermPlanner,
};
pub use navigation::{
    ExplorationMethod, GoToOptions, NavOutcome, NavState, Navigation, StopHandle,
};
pub use semantic_map::{
    GoalMask, SemanticMap, CATEGORY_CHANNEL_BASE, CHANNEL_EXPLORED, CHANNEL_OCCUPANCY,
};
pub use trackback::Trackback;
