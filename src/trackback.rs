//! Trackback recorder for collision recovery.
//!
//! Remembers every pose the robot has successfully reached during an episode,
//! so that after a collision the controller can retreat to the nearest pose
//! the planner still knows how to reach.

use std::collections::HashSet;

use crate::core::Pose2D;
use crate::goal::Goal;
use crate::interfaces::ShortTermPlanner;

// Fixed-point quantization for deduplication: millimeters for position,
// 1e-4 rad for heading.
const POS_SCALE: f32 = 1000.0;
const ANGLE_SCALE: f32 = 10000.0;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
struct PoseKey {
    x_mm: i32,
    y_mm: i32,
    theta_fp: i32,
}

impl PoseKey {
    fn from_pose(pose: Pose2D) -> Self {
        Self {
            x_mm: (pose.x * POS_SCALE) as i32,
            y_mm: (pose.y * POS_SCALE) as i32,
            theta_fp: (pose.theta * ANGLE_SCALE) as i32,
        }
    }

    fn pose(&self) -> Pose2D {
        Pose2D::new(
            self.x_mm as f32 / POS_SCALE,
            self.y_mm as f32 / POS_SCALE,
            self.theta_fp as f32 / ANGLE_SCALE,
        )
    }
}

/// Set of previously confirmed-reachable poses.
///
/// Grows monotonically during a `go_to_absolute` episode; reset at the start
/// of each object search.
#[derive(Debug, Default)]
pub struct Trackback {
    locs: HashSet<PoseKey>,
}

impl Trackback {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pose the robot just reached. Idempotent.
    pub fn record(&mut self, pose: Pose2D) {
        self.locs.insert(PoseKey::from_pose(pose));
    }

    /// Forget all recorded poses (new episode).
    pub fn reset(&mut self) {
        self.locs.clear();
    }

    /// Number of distinct recorded poses.
    pub fn len(&self) -> usize {
        self.locs.len()
    }

    /// Whether no poses have been recorded.
    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }

    /// Nearest recorded pose (L1 distance on x, y) that the planner reports
    /// reachable from `current`, or `None` if no stored pose qualifies.
    ///
    /// Reachability is filtered before selection, so an unreachable pose is
    /// never returned no matter how close it is.
    pub fn recovery_location<P>(&self, planner: &P, current: Pose2D) -> Option<Pose2D>
    where
        P: ShortTermPlanner + ?Sized,
    {
        self.locs
            .iter()
            .map(|key| key.pose())
            .filter(|cand| {
                planner
                    .short_term_goal(current, &Goal::Point(*cand))
                    .is_some()
            })
            .min_by(|a, b| {
                let da = current.position().l1_distance(&a.position());
                let db = current.position().l1_distance(&b.position());
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}
