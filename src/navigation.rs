//! Object-goal navigation controller.
//!
//! Orchestrates the closed loop between the short-term planner, the SLAM
//! subsystem, the robot driver, and the goal policy:
//!
//! - `go_to_absolute` / `go_to_relative`: drive to a point or mask goal one
//!   planner waypoint at a time, recovering from collisions by inserting
//!   obstacles and tracking back to a known-reachable pose.
//! - `go_to_object`: the high-level object search, preferring map hits over
//!   exploration and falling back to learned or frontier goal selection.
//! - `explore`: a minimal "wander until stuck" primitive.
//!
//! One logical thread of control: public operations are blocking and guarded
//! by a single-flight state transition; only the stop flag crosses threads.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::categories;
use crate::config::{NavConfig, RecoveryPolicy};
use crate::core::{Pose2D, WorldPoint};
use crate::error::{NavError, Result};
use crate::exploration::{exploration_goal, frontier_goal_mask};
use crate::goal::Goal;
use crate::interfaces::{
    GoalPolicy, MotionStatus, MoveKind, NavVisualizer, RobotDriver, SemanticSlam,
    ShortTermPlanner,
};
use crate::trackback::Trackback;

/// Controller lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    /// No command in flight.
    Idle = 0,
    /// A navigation command is executing.
    Busy = 1,
    /// A stop was requested; the active loop is winding down.
    Stopped = 2,
}

impl NavState {
    fn from_u8(v: u8) -> NavState {
        match v {
            1 => NavState::Busy,
            2 => NavState::Stopped,
            _ => NavState::Idle,
        }
    }
}

/// Shared lifecycle flags, observable across threads.
#[derive(Debug)]
struct ControlFlags {
    state: AtomicU8,
    stop: AtomicBool,
}

impl ControlFlags {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(NavState::Idle as u8),
            stop: AtomicBool::new(false),
        }
    }

    fn state(&self) -> NavState {
        NavState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Single-flight episode entry: any non-Busy state transitions to Busy.
    fn try_begin(&self) -> bool {
        let began = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                if v == NavState::Busy as u8 {
                    None
                } else {
                    Some(NavState::Busy as u8)
                }
            })
            .is_ok();
        if began {
            self.stop.store(false, Ordering::Release);
        }
        began
    }

    fn finish(&self) {
        self.state.store(NavState::Idle as u8, Ordering::Release);
        self.stop.store(false, Ordering::Release);
    }

    fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        let _ = self.state.compare_exchange(
            NavState::Busy as u8,
            NavState::Stopped as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

/// Cancellation handle usable from outside the controller's thread.
#[derive(Clone, Debug)]
pub struct StopHandle {
    flags: Arc<ControlFlags>,
}

impl StopHandle {
    /// Request cancellation of the active navigation command.
    ///
    /// Observed at iteration boundaries only: the in-flight motion command
    /// always completes first.
    pub fn stop(&self) {
        self.flags.request_stop();
    }
}

/// Resets the lifecycle state when an episode ends, however it ends.
struct EpisodeGuard {
    flags: Arc<ControlFlags>,
}

impl Drop for EpisodeGuard {
    fn drop(&mut self) {
        self.flags.finish();
    }
}

/// Exploration strategy for `go_to_object`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplorationMethod {
    /// Query the learned goal policy for where to look next.
    Learned,
    /// Target the frontier of the explored region.
    Frontier,
}

/// Result of a `go_to_absolute` episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavOutcome {
    /// False when the planner proved the goal unreachable (terminal for the
    /// episode) or a recovery abort fired.
    pub path_found: bool,
    /// Whether the goal predicate was satisfied.
    pub goal_reached: bool,
}

/// Per-call options for `go_to_absolute` / `go_to_relative`.
#[derive(Clone, Copy, Debug)]
pub struct GoToOptions {
    /// Goal-reached distance threshold in meters.
    pub distance_threshold: f32,
    /// Goal-reached heading threshold in radians.
    pub angle_threshold: f32,
    /// Maximum motion steps before giving up.
    pub max_steps: usize,
    /// Record a visualization snapshot after every step.
    pub visualize: bool,
}

impl Default for GoToOptions {
    fn default() -> Self {
        Self {
            distance_threshold: 0.5,
            angle_threshold: 30.0_f32.to_radians(),
            max_steps: usize::MAX,
            visualize: true,
        }
    }
}

/// The navigation controller.
///
/// Generic over its collaborators so tests can inject deterministic fakes.
pub struct Navigation<P, S, R, G, V> {
    planner: P,
    slam: S,
    robot: R,
    policy: G,
    vis: V,
    config: NavConfig,
    trackback: Trackback,
    flags: Arc<ControlFlags>,
    done_exploring: bool,
    map_size: usize,
}

impl<P, S, R, G, V> Navigation<P, S, R, G, V>
where
    P: ShortTermPlanner,
    S: SemanticSlam,
    R: RobotDriver,
    G: GoalPolicy,
    V: NavVisualizer,
{
    /// Create a controller around its collaborators.
    pub fn new(planner: P, slam: S, robot: R, policy: G, vis: V, config: NavConfig) -> Self {
        let (map_size, _) = slam.map_sizes();
        Self {
            planner,
            slam,
            robot,
            policy,
            vis,
            config,
            trackback: Trackback::new(),
            flags: Arc::new(ControlFlags::new()),
            done_exploring: false,
            map_size,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NavState {
        self.flags.state()
    }

    /// Whether a navigation command is currently executing.
    ///
    /// Best-effort poll for remote callers; overlapping commands are rejected
    /// with [`NavError::Busy`] regardless.
    pub fn is_busy(&self) -> bool {
        self.flags.state() == NavState::Busy
    }

    /// Request cancellation of the active command (iteration-boundary
    /// latency, see [`StopHandle::stop`]).
    pub fn stop(&self) {
        self.flags.request_stop();
    }

    /// Cancellation handle for the transport layer.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flags: Arc::clone(&self.flags),
        }
    }

    /// Whether `explore` has latched its done state.
    pub fn is_done_exploring(&self) -> bool {
        self.done_exploring
    }

    /// Clear the done-exploring latch.
    pub fn reset_explore(&mut self) {
        self.done_exploring = false;
    }

    /// Last rendered visualization image, if the visualizer keeps one.
    pub fn last_semantic_map_vis(&self) -> Option<Vec<u8>> {
        self.vis.last_image()
    }

    /// Drive to an absolute goal.
    ///
    /// Returns when the goal predicate is satisfied, the step budget is
    /// exhausted, the planner proves the goal unreachable, or a stop request
    /// is observed.
    pub fn go_to_absolute(&mut self, goal: &Goal, opts: &GoToOptions) -> Result<NavOutcome> {
        self.validate_goal(goal)?;
        let _guard = self.begin_episode()?;
        Ok(self.run_to_goal(goal, opts))
    }

    /// Drive to a goal expressed relative to the current pose.
    pub fn go_to_relative(&mut self, goal: Pose2D, opts: &GoToOptions) -> Result<NavOutcome> {
        let absolute = self.robot.base_state().compose(goal);
        self.go_to_absolute(&Goal::Point(absolute), opts)
    }

    /// Search for an object of the named category.
    ///
    /// Whenever the category is present in the semantic map, drives straight
    /// to it; otherwise explores with the chosen method. The final
    /// goal-reached status is logged, not returned: exploration never
    /// "fails", it only runs out of budget.
    pub fn go_to_object(&mut self, object_goal: &str, method: ExplorationMethod) -> Result<()> {
        let category = categories::category_id(object_goal)
            .ok_or_else(|| NavError::UnknownCategory(object_goal.to_string()))?;
        let _guard = self.begin_episode()?;

        info!(
            "starting go_to_object {} with {:?} exploration",
            object_goal, method
        );
        self.vis.begin_episode(object_goal);

        // new episode: forget previous reachability knowledge
        self.trackback.reset();
        self.done_exploring = false;

        let search = self.config.object_search.clone();
        let step_opts = GoToOptions {
            distance_threshold: search.distance_threshold,
            angle_threshold: search.angle_threshold_deg.to_radians(),
            max_steps: 1,
            visualize: search.visualize,
        };

        let mut goal_reached = false;
        let mut high_level_step = 0usize;
        let mut low_level_step = 0usize;
        let mut steps_with_goal_remaining = 0usize;
        let mut current_exploration_goal: Option<Pose2D> = None;

        while !goal_reached && low_level_step < search.max_steps {
            if self.flags.stop_requested() {
                break;
            }
            low_level_step += 1;

            let sem_map = self.slam.global_semantic_map();
            let category_mask = sem_map.category_mask(category);

            if category_mask.any() {
                // the object is already in the map, drive to it
                high_level_step += 1;
                info!(
                    "high-level step {}: {} found in the map ({} cells), driving to it",
                    high_level_step,
                    object_goal,
                    category_mask.count()
                );
                self.vis.add_goal_mask(&category_mask);
                let outcome = self.run_to_goal(
                    &Goal::Mask(category_mask),
                    &GoToOptions {
                        max_steps: search.map_hit_steps,
                        ..step_opts
                    },
                );
                goal_reached = outcome.goal_reached;
            } else {
                match method {
                    ExplorationMethod::Learned => {
                        if steps_with_goal_remaining == 0 {
                            high_level_step += 1;
                            steps_with_goal_remaining = search.learned_goal_steps;
                            let goal = exploration_goal(
                                &self.slam,
                                &self.policy,
                                self.robot.base_state(),
                                category,
                            );
                            info!(
                                "high-level step {}: no {} in the map, exploring toward \
                                 policy goal ({:.2}, {:.2})",
                                high_level_step, object_goal, goal.x, goal.y
                            );
                            current_exploration_goal = Some(goal);
                        } else {
                            steps_with_goal_remaining -= 1;
                        }
                        if let Some(goal) = current_exploration_goal {
                            // outcome deliberately unused: reaching the
                            // exploration goal is not reaching the object
                            let _ = self.run_to_goal(&Goal::Point(goal), &step_opts);
                        }
                    }
                    ExplorationMethod::Frontier => {
                        high_level_step += 1;
                        let robot_cell = self
                            .slam
                            .robot_to_map(self.robot.base_state().position())
                            .to_grid();
                        let frontier_mask =
                            frontier_goal_mask(&sem_map, robot_cell, &self.config.frontier);
                        info!(
                            "high-level step {}: no {} in the map, exploring toward the \
                             frontier ({} cells)",
                            high_level_step,
                            object_goal,
                            frontier_mask.count()
                        );
                        let _ = self.run_to_goal(&Goal::Mask(frontier_mask), &step_opts);
                    }
                }
            }
        }

        info!(
            "finished go_to_object {} after {} low-level steps, goal reached: {}",
            object_goal, low_level_step, goal_reached
        );
        Ok(())
    }

    /// Take one exploration step toward a far-away goal.
    ///
    /// Latches done-exploring the first time the planner reports the goal
    /// unreachable; after that, calls are no-ops until `reset_explore`.
    pub fn explore(&mut self, far_away_goal: Pose2D) -> Result<()> {
        if self.done_exploring {
            return Ok(());
        }
        let _guard = self.begin_episode()?;
        debug!("exploring one step");
        let outcome = self.run_to_goal(
            &Goal::Point(far_away_goal),
            &GoToOptions {
                max_steps: 1,
                ..GoToOptions::default()
            },
        );
        if !outcome.path_found {
            // no path and nothing unexplored left to open one up
            info!("exploration done");
            self.done_exploring = true;
        }
        Ok(())
    }

    fn validate_goal(&self, goal: &Goal) -> Result<()> {
        match goal {
            Goal::Point(_) => Ok(()),
            Goal::Mask(mask) => {
                if mask.size() != self.map_size {
                    Err(NavError::InvalidGoal(format!(
                        "goal mask is {}x{} but the global map is {}x{}",
                        mask.size(),
                        mask.size(),
                        self.map_size,
                        self.map_size
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn begin_episode(&self) -> Result<EpisodeGuard> {
        if !self.flags.try_begin() {
            return Err(NavError::Busy);
        }
        Ok(EpisodeGuard {
            flags: Arc::clone(&self.flags),
        })
    }

    /// The core control loop shared by every navigation entry point.
    ///
    /// Caller must hold the episode guard.
    fn run_to_goal(&mut self, goal: &Goal, opts: &GoToOptions) -> NavOutcome {
        let initial_loc = self.robot.base_state();
        let mut robot_loc = initial_loc;
        let mut path_found = true;
        let mut goal_reached = false;
        let mut steps_left = opts.max_steps;

        loop {
            // iteration boundary: cancellation, goal predicate, budget
            if self.flags.stop_requested() {
                debug!("stop observed, ending navigation toward {}", goal);
                break;
            }
            if self.planner.goal_within_threshold(
                robot_loc,
                goal,
                opts.distance_threshold,
                opts.angle_threshold,
            ) {
                goal_reached = true;
                break;
            }
            if steps_left == 0 {
                break;
            }

            let waypoint = match self.planner.short_term_goal(robot_loc, goal) {
                Some(wp) => wp,
                None => {
                    info!(
                        "no path to {} from ({:.2}, {:.2}), aborting move",
                        goal, robot_loc.x, robot_loc.y
                    );
                    path_found = false;
                    break;
                }
            };

            let status = self.robot.go_to_absolute(waypoint, MoveKind::Normal);
            robot_loc = self.robot.base_state();
            debug!(
                "step toward {}: waypoint ({:.2}, {:.2}), now at ({:.2}, {:.2}), status {:?}",
                goal, waypoint.x, waypoint.y, robot_loc.x, robot_loc.y, status
            );

            match status {
                MotionStatus::Succeeded => {
                    self.trackback.record(robot_loc);
                }
                MotionStatus::Collision => {
                    if !self.recover_from_collision(&mut robot_loc) {
                        path_found = false;
                        break;
                    }
                }
            }

            steps_left -= 1;

            if opts.visualize {
                let map = self.slam.global_semantic_map();
                self.vis.record_snapshot(&map);
            }
        }

        debug!(
            "navigation toward {} finished: started ({:.2}, {:.2}), ended ({:.2}, {:.2}), \
             path_found={}, goal_reached={}",
            goal, initial_loc.x, initial_loc.y, robot_loc.x, robot_loc.y, path_found, goal_reached
        );
        NavOutcome {
            path_found,
            goal_reached,
        }
    }

    /// Insert an obstacle patch at the collision site and retreat to the
    /// nearest known-reachable pose.
    ///
    /// Returns false only when the configured recovery policy aborts the
    /// episode.
    fn recover_from_collision(&mut self, robot_loc: &mut Pose2D) -> bool {
        warn!(
            "collision at ({:.2}, {:.2}), inserting obstacle patch",
            robot_loc.x, robot_loc.y
        );
        self.insert_obstacle_patch(*robot_loc);

        match self.trackback.recovery_location(&self.planner, *robot_loc) {
            Some(loc) => {
                info!("tracking back to ({:.2}, {:.2})", loc.x, loc.y);
                let status = self.robot.go_to_absolute(loc, MoveKind::Trackback);
                debug!("trackback status: {:?}", status);
                *robot_loc = self.robot.base_state();
                true
            }
            None => match self.config.recovery {
                RecoveryPolicy::HoldPosition => {
                    warn!("no reachable trackback location, holding position");
                    true
                }
                RecoveryPolicy::AbortEpisode => {
                    warn!("no reachable trackback location, aborting episode");
                    false
                }
            },
        }
    }

    /// Rectangular patch of obstacle cells just ahead of the robot, oriented
    /// along its heading.
    fn insert_obstacle_patch(&mut self, pose: Pose2D) {
        let patch = self.config.obstacle.clone();
        let (sin, cos) = pose.theta.sin_cos();
        let half_width = (patch.width / 2) as f32;

        for i in 0..patch.length {
            for j in 0..patch.width {
                let fwd = (i + patch.buffer) as f32;
                let lat = j as f32 - half_width;
                let wx = pose.x + patch.cell_size * (fwd * cos + lat * sin);
                let wy = pose.y + patch.cell_size * (fwd * sin - lat * cos);
                self.slam.add_obstacle(WorldPoint::new(wx, wy));
            }
        }
    }
}
