//! Frontier goal-mask construction.
//!
//! The frontier branch of an object search targets the unexplored region of
//! the map. Two corrections make the raw unexplored mask usable as a goal:
//! a disk around the robot is cleared (its immediate surroundings are
//! explored by assumption even if the map lags), and the mask is eroded by a
//! disk so isolated unexplored pixels do not become goals.

use crate::config::FrontierConfig;
use crate::core::GridCoord;
use crate::semantic_map::{GoalMask, SemanticMap};

/// Build the frontier goal mask for the current map and robot cell.
pub fn frontier_goal_mask(
    map: &SemanticMap,
    robot_cell: GridCoord,
    config: &FrontierConfig,
) -> GoalMask {
    let mut mask = map.unexplored_mask();
    clear_disk(&mut mask, robot_cell, config.explored_disk_radius as i32);
    erode_by_disk(&mask, config.closing_radius as i32)
}

/// Clear all cells within `radius` of `center`.
fn clear_disk(mask: &mut GoalMask, center: GridCoord, radius: i32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let x = center.x + dx;
            let y = center.y + dy;
            if x >= 0 && y >= 0 {
                mask.set(y as usize, x as usize, false);
            }
        }
    }
}

/// Binary erosion by a disk structuring element.
///
/// A cell survives only if every in-bounds cell within the disk is set.
/// Out-of-bounds neighbors are ignored, matching a clipped dilation of the
/// complement.
fn erode_by_disk(mask: &GoalMask, radius: i32) -> GoalMask {
    let size = mask.size();
    let offsets = disk_offsets(radius);
    let mut out = GoalMask::new(size);

    for row in 0..size as i32 {
        for col in 0..size as i32 {
            if !mask.get(row as usize, col as usize) {
                continue;
            }
            let keep = offsets.iter().all(|&(dy, dx)| {
                let y = row + dy;
                let x = col + dx;
                if y < 0 || x < 0 || y >= size as i32 || x >= size as i32 {
                    true
                } else {
                    mask.get(y as usize, x as usize)
                }
            });
            if keep {
                out.set(row as usize, col as usize, true);
            }
        }
    }
    out
}

fn disk_offsets(radius: i32) -> Vec<(i32, i32)> {
    let r2 = radius * radius;
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                offsets.push((dy, dx));
            }
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic_map::CHANNEL_EXPLORED;

    fn half_explored_map(size: usize) -> SemanticMap {
        // left half explored, right half unexplored
        let mut map = SemanticMap::new(4, size);
        for row in 0..size {
            for col in 0..size / 2 {
                map.set(CHANNEL_EXPLORED, row, col, 1.0);
            }
        }
        map
    }

    #[test]
    fn test_unexplored_region_targeted() {
        let map = half_explored_map(40);
        let config = FrontierConfig {
            explored_disk_radius: 3,
            closing_radius: 2,
        };
        let mask = frontier_goal_mask(&map, GridCoord::new(5, 20), &config);

        // deep inside the unexplored half survives erosion
        assert!(mask.get(20, 35));
        // explored half is never a goal
        assert!(!mask.get(20, 5));
    }

    #[test]
    fn test_robot_disk_cleared() {
        // fully unexplored map, robot sitting in the middle
        let map = SemanticMap::new(4, 40);
        let config = FrontierConfig {
            explored_disk_radius: 10,
            closing_radius: 0,
        };
        let mask = frontier_goal_mask(&map, GridCoord::new(20, 20), &config);

        assert!(!mask.get(20, 20));
        assert!(!mask.get(20, 25));
        assert!(mask.get(20, 35));
    }

    #[test]
    fn test_single_pixel_noise_eroded() {
        // one stray unexplored pixel in an otherwise explored map
        let mut map = SemanticMap::new(4, 20);
        for row in 0..20 {
            for col in 0..20 {
                map.set(CHANNEL_EXPLORED, row, col, 1.0);
            }
        }
        map.set(CHANNEL_EXPLORED, 10, 10, 0.0);

        let config = FrontierConfig {
            explored_disk_radius: 2,
            closing_radius: 1,
        };
        let mask = frontier_goal_mask(&map, GridCoord::new(0, 0), &config);
        assert!(!mask.any());
    }
}
