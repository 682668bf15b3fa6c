//! Deterministic fake collaborators shared by the integration tests.
//!
//! Fakes are handed to the controller as `Rc` clones so tests keep a handle
//! for scripting inputs and inspecting recorded calls.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use lakshya_nav::{
    CategoryId, Goal, GoalMask, GoalPolicy, GridCoord, MapFeatures, MapPoint, MotionStatus,
    MoveKind, NavVisualizer, Orientation, Pose2D, RobotDriver, SemanticMap, SemanticSlam,
    ShortTermPlanner, WorldPoint,
};

/// Local wrapper so the crate's traits can be implemented for shared fakes;
/// the orphan rule forbids implementing them directly for `Rc<T>`.
pub struct Shared<T>(pub Rc<T>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Scripted planner over a world where world coordinates equal map cells.
///
/// Steps `step_size` toward the goal (the first set cell for mask goals);
/// `unreachable` makes every query report "no path".
pub struct FakePlanner {
    pub unreachable: Cell<bool>,
    pub step_size: Cell<f32>,
    pub stg_queries: Cell<usize>,
    pub saw_point_goal: Cell<bool>,
    pub saw_mask_goal: Cell<bool>,
    pub last_mask: RefCell<Option<GoalMask>>,
}

impl FakePlanner {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            unreachable: Cell::new(false),
            step_size: Cell::new(1.0),
            stg_queries: Cell::new(0),
            saw_point_goal: Cell::new(false),
            saw_mask_goal: Cell::new(false),
            last_mask: RefCell::new(None),
        })
    }
}

fn first_set_cell(mask: &GoalMask) -> Option<(f32, f32)> {
    for row in 0..mask.size() {
        for col in 0..mask.size() {
            if mask.get(row, col) {
                return Some((col as f32, row as f32));
            }
        }
    }
    None
}

fn pose_cell(pose: Pose2D) -> GridCoord {
    GridCoord::new(pose.x.round() as i32, pose.y.round() as i32)
}

impl ShortTermPlanner for Shared<FakePlanner> {
    fn short_term_goal(&self, pose: Pose2D, goal: &Goal) -> Option<Pose2D> {
        self.stg_queries.set(self.stg_queries.get() + 1);
        if self.unreachable.get() {
            return None;
        }
        let (tx, ty, ttheta) = match goal {
            Goal::Point(p) => {
                self.saw_point_goal.set(true);
                (p.x, p.y, p.theta)
            }
            Goal::Mask(mask) => {
                self.saw_mask_goal.set(true);
                *self.last_mask.borrow_mut() = Some(mask.clone());
                let (x, y) = first_set_cell(mask)?;
                (x, y, 0.0)
            }
        };

        let dx = tx - pose.x;
        let dy = ty - pose.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let step = self.step_size.get();
        if dist <= step {
            Some(Pose2D::new(tx, ty, ttheta))
        } else {
            Some(Pose2D::new(
                pose.x + dx / dist * step,
                pose.y + dy / dist * step,
                ttheta,
            ))
        }
    }

    fn goal_within_threshold(
        &self,
        pose: Pose2D,
        goal: &Goal,
        distance_threshold: f32,
        angle_threshold: f32,
    ) -> bool {
        match goal {
            Goal::Point(p) => {
                pose.distance(p) < distance_threshold
                    && pose.heading_error(p).abs() < angle_threshold
            }
            Goal::Mask(mask) => mask.contains_cell(pose_cell(pose)),
        }
    }
}

/// In-memory map with identity world<->map transforms (1 m = 1 cell).
pub struct FakeSlam {
    pub map: RefCell<SemanticMap>,
    pub obstacles: RefCell<Vec<WorldPoint>>,
    pub feature_queries: Cell<usize>,
    map_size: usize,
    local_map_size: usize,
}

impl FakeSlam {
    pub fn new(channels: usize, map_size: usize, local_map_size: usize) -> Rc<Self> {
        Rc::new(Self {
            map: RefCell::new(SemanticMap::new(channels, map_size)),
            obstacles: RefCell::new(Vec::new()),
            feature_queries: Cell::new(0),
            map_size,
            local_map_size,
        })
    }

    /// Mark a category present at (row, col).
    pub fn mark_category(&self, category: CategoryId, row: usize, col: usize) {
        self.map
            .borrow_mut()
            .set(lakshya_nav::CATEGORY_CHANNEL_BASE + category, row, col, 1.0);
    }
}

impl SemanticSlam for Shared<FakeSlam> {
    fn global_semantic_map(&self) -> SemanticMap {
        // owned snapshot, copy-on-read
        self.map.borrow().clone()
    }

    fn semantic_map_features(&self) -> MapFeatures {
        self.feature_queries.set(self.feature_queries.get() + 1);
        MapFeatures::default()
    }

    fn orientation(&self) -> Orientation {
        Orientation::default()
    }

    fn add_obstacle(&mut self, point: WorldPoint) {
        self.obstacles.borrow_mut().push(point);
    }

    fn robot_to_map(&self, point: WorldPoint) -> MapPoint {
        MapPoint::new(point.x, point.y)
    }

    fn map_to_robot(&self, point: MapPoint) -> WorldPoint {
        WorldPoint::new(point.x, point.y)
    }

    fn map_sizes(&self) -> (usize, usize) {
        (self.map_size, self.local_map_size)
    }
}

/// Driver that teleports to the target on success and replays scripted
/// failure statuses.
pub struct FakeDriver {
    pub pose: Cell<Pose2D>,
    pub statuses: RefCell<VecDeque<MotionStatus>>,
    pub commands: RefCell<Vec<(Pose2D, MoveKind)>>,
    /// Invoked after every motion command (e.g. to request a stop mid-run).
    pub on_command: RefCell<Option<Box<dyn Fn()>>>,
}

impl FakeDriver {
    pub fn new(start: Pose2D) -> Rc<Self> {
        Rc::new(Self {
            pose: Cell::new(start),
            statuses: RefCell::new(VecDeque::new()),
            commands: RefCell::new(Vec::new()),
            on_command: RefCell::new(None),
        })
    }

    pub fn script_statuses(&self, statuses: &[MotionStatus]) {
        self.statuses.borrow_mut().extend(statuses.iter().copied());
    }

    pub fn commands_of_kind(&self, kind: MoveKind) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|(_, k)| *k == kind)
            .count()
    }
}

impl RobotDriver for Shared<FakeDriver> {
    fn base_state(&self) -> Pose2D {
        self.pose.get()
    }

    fn go_to_absolute(&mut self, target: Pose2D, kind: MoveKind) -> MotionStatus {
        self.commands.borrow_mut().push((target, kind));
        let status = self
            .statuses
            .borrow_mut()
            .pop_front()
            .unwrap_or(MotionStatus::Succeeded);
        if status.is_succeeded() {
            self.pose.set(target);
        }
        if let Some(hook) = self.on_command.borrow().as_ref() {
            hook();
        }
        status
    }
}

/// Policy returning a fixed local-frame prediction.
pub struct FakePolicy {
    pub output: Cell<(f32, f32)>,
    pub calls: Cell<usize>,
}

impl FakePolicy {
    pub fn new(output: (f32, f32)) -> Rc<Self> {
        Rc::new(Self {
            output: Cell::new(output),
            calls: Cell::new(0),
        })
    }
}

impl GoalPolicy for Shared<FakePolicy> {
    fn predict(
        &self,
        _features: &MapFeatures,
        _orientation: &Orientation,
        _category: CategoryId,
        _deterministic: bool,
    ) -> (f32, f32) {
        self.calls.set(self.calls.get() + 1);
        self.output.get()
    }
}

/// Visualizer that counts what it was asked to record.
#[derive(Default)]
pub struct RecordingVis {
    pub episodes: RefCell<Vec<String>>,
    pub goal_masks: Cell<usize>,
    pub snapshots: Cell<usize>,
}

impl RecordingVis {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl NavVisualizer for Shared<RecordingVis> {
    fn begin_episode(&mut self, label: &str) {
        self.episodes.borrow_mut().push(label.to_string());
    }

    fn add_goal_mask(&mut self, _mask: &GoalMask) {
        self.goal_masks.set(self.goal_masks.get() + 1);
    }

    fn record_snapshot(&mut self, _map: &SemanticMap) {
        self.snapshots.set(self.snapshots.get() + 1);
    }
}
