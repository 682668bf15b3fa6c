//! Collaborator interfaces consumed by the navigation controller.
//!
//! The planner, SLAM subsystem, robot driver, goal policy, and visualization
//! recorder are external services. They are injected as trait implementations
//! so the controller can run against deterministic fakes in tests and against
//! remote proxies in production.

use crate::categories::CategoryId;
use crate::core::{MapPoint, Pose2D, WorldPoint};
use crate::goal::Goal;
use crate::semantic_map::{GoalMask, SemanticMap};

/// Outcome of a single driver motion command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionStatus {
    /// The waypoint was reached.
    Succeeded,
    /// The driver hit something unexpected before reaching the waypoint.
    Collision,
}

impl MotionStatus {
    /// Whether the motion completed successfully.
    pub fn is_succeeded(&self) -> bool {
        matches!(self, MotionStatus::Succeeded)
    }
}

/// Why a motion command is being issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Regular step toward the current goal.
    Normal,
    /// Recovery move back to a known-reachable pose; not validated against
    /// the episode's goal thresholds.
    Trackback,
}

/// Opaque map feature tensor handed from the SLAM subsystem to the policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapFeatures(pub Vec<f32>);

/// Opaque orientation tensor handed from the SLAM subsystem to the policy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Orientation(pub Vec<f32>);

/// Short-term path planner.
///
/// Plans a single incremental waypoint toward a larger goal; also owns the
/// goal-reached predicate so its notion of distance matches its planning.
pub trait ShortTermPlanner {
    /// Next waypoint toward the goal from `pose`, or `None` when the goal is
    /// provably unreachable.
    fn short_term_goal(&self, pose: Pose2D, goal: &Goal) -> Option<Pose2D>;

    /// Whether `pose` satisfies the goal.
    ///
    /// Point goals: Euclidean distance below `distance_threshold` (meters)
    /// and heading error below `angle_threshold` (radians). Mask goals: the
    /// pose's map cell is marked.
    fn goal_within_threshold(
        &self,
        pose: Pose2D,
        goal: &Goal,
        distance_threshold: f32,
        angle_threshold: f32,
    ) -> bool;
}

/// SLAM/mapping subsystem.
///
/// Responsible for serializing its own reads and writes: every query returns
/// a consistent snapshot, the controller holds no map locks.
pub trait SemanticSlam {
    /// Owned snapshot of the global semantic map.
    fn global_semantic_map(&self) -> SemanticMap;

    /// Feature tensor for the goal policy.
    fn semantic_map_features(&self) -> MapFeatures;

    /// Orientation tensor for the goal policy.
    fn orientation(&self) -> Orientation;

    /// Insert an obstacle at a world point.
    fn add_obstacle(&mut self, point: WorldPoint);

    /// World frame to continuous map-cell frame.
    fn robot_to_map(&self, point: WorldPoint) -> MapPoint;

    /// Continuous map-cell frame back to world frame.
    fn map_to_robot(&self, point: MapPoint) -> WorldPoint;

    /// `(global_map_size, local_map_size)` in cells.
    fn map_sizes(&self) -> (usize, usize);
}

/// Low-level motion controller.
pub trait RobotDriver {
    /// Current robot pose in the world frame.
    fn base_state(&self) -> Pose2D;

    /// Drive to an absolute pose; retries are the driver's business, the
    /// controller only observes the final status.
    fn go_to_absolute(&mut self, target: Pose2D, kind: MoveKind) -> MotionStatus;
}

/// Learned goal-selection policy (black box).
pub trait GoalPolicy {
    /// Predict an exploration target in the local map frame (cells).
    fn predict(
        &self,
        features: &MapFeatures,
        orientation: &Orientation,
        category: CategoryId,
        deterministic: bool,
    ) -> (f32, f32);
}

/// Visualization/snapshot recorder.
///
/// All methods default to no-ops so embedders that don't record anything can
/// use [`NoopVisualizer`].
pub trait NavVisualizer {
    /// Start a new recording episode (e.g. per object goal).
    fn begin_episode(&mut self, _label: &str) {}

    /// Record the goal mask chosen for the current high-level step.
    fn add_goal_mask(&mut self, _mask: &GoalMask) {}

    /// Record a snapshot of the semantic map after a control step.
    fn record_snapshot(&mut self, _map: &SemanticMap) {}

    /// Last rendered visualization image, if any.
    fn last_image(&self) -> Option<Vec<u8>> {
        None
    }
}

/// Visualizer that records nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopVisualizer;

impl NavVisualizer for NoopVisualizer {}
