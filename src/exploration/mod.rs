//! Exploration goal selection.
//!
//! Two ways to pick where to look next when the target object is not in the
//! map yet: a learned goal policy, or classical frontier exploration.

mod frontier;
mod learned;

pub use frontier::frontier_goal_mask;
pub use learned::exploration_goal;
