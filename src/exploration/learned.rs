//! Learned exploration goal selection.
//!
//! Converts a goal-policy prediction (a point in the local map frame) into an
//! absolute world-frame point goal: center the local window on the robot's
//! global cell, clamp to the map, and transform back to world coordinates.

use tracing::debug;

use crate::categories::CategoryId;
use crate::core::{MapPoint, Pose2D};
use crate::interfaces::{GoalPolicy, SemanticSlam};

/// Query the policy and convert its local-frame prediction into a world-frame
/// exploration goal (heading 0).
pub fn exploration_goal<S, G>(
    slam: &S,
    policy: &G,
    robot_pose: Pose2D,
    category: CategoryId,
) -> Pose2D
where
    S: SemanticSlam,
    G: GoalPolicy,
{
    let (map_size, local_map_size) = slam.map_sizes();

    let features = slam.semantic_map_features();
    let orientation = slam.orientation();
    let (local_x, local_y) = policy.predict(&features, &orientation, category, false);

    let robot_cell = slam.robot_to_map(robot_pose.position());
    let half_local = (local_map_size / 2) as f32;
    let global = MapPoint::new(
        robot_cell.x + local_x - half_local,
        robot_cell.y + local_y - half_local,
    )
    .clamp_to(map_size);

    let world = slam.map_to_robot(global);
    debug!(
        "policy goal: local ({:.1}, {:.1}) -> global cell ({:.1}, {:.1}) -> world ({:.2}, {:.2})",
        local_x, local_y, global.x, global.y, world.x, world.y
    );
    Pose2D::new(world.x, world.y, 0.0)
}
