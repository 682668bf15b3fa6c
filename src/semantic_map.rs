//! Semantic occupancy map snapshot and binary goal masks.
//!
//! The map is a `[channel, row, col]` grid owned by the SLAM collaborator;
//! the controller only ever sees owned snapshots (copy-on-read), so a
//! concurrent map update can never be observed mid-read.

use serde::{Deserialize, Serialize};

use crate::categories::CategoryId;
use crate::core::GridCoord;

/// Channel holding the occupancy layer.
pub const CHANNEL_OCCUPANCY: usize = 0;
/// Channel holding the explored layer (0 = unexplored).
pub const CHANNEL_EXPLORED: usize = 1;
/// First category presence channel; category `c` lives in channel `BASE + c`.
pub const CATEGORY_CHANNEL_BASE: usize = 4;

/// Snapshot of the global semantic map.
///
/// Square grid of `size * size` cells per channel. Category presence channels
/// are binary (a cell is "present" when its value is 1.0).
#[derive(Clone, Debug, PartialEq)]
pub struct SemanticMap {
    channels: usize,
    size: usize,
    data: Vec<f32>,
}

impl SemanticMap {
    /// Create an all-zero map with the given channel count and side length.
    pub fn new(channels: usize, size: usize) -> Self {
        Self {
            channels,
            size,
            data: vec![0.0; channels * size * size],
        }
    }

    /// Side length of the square grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn index(&self, channel: usize, row: usize, col: usize) -> usize {
        (channel * self.size + row) * self.size + col
    }

    /// Read a cell; out-of-range channels or cells read as 0.0.
    pub fn get(&self, channel: usize, row: usize, col: usize) -> f32 {
        if channel >= self.channels || row >= self.size || col >= self.size {
            return 0.0;
        }
        self.data[self.index(channel, row, col)]
    }

    /// Write a cell; out-of-range writes are ignored.
    pub fn set(&mut self, channel: usize, row: usize, col: usize, value: f32) {
        if channel >= self.channels || row >= self.size || col >= self.size {
            return;
        }
        let idx = self.index(channel, row, col);
        self.data[idx] = value;
    }

    /// Binary presence mask for a category (cells equal to 1.0).
    ///
    /// A category whose channel is missing yields an all-false mask.
    pub fn category_mask(&self, category: CategoryId) -> GoalMask {
        self.channel_mask(CATEGORY_CHANNEL_BASE + category, |v| v == 1.0)
    }

    /// Mask of unexplored cells (explored channel equal to 0).
    pub fn unexplored_mask(&self) -> GoalMask {
        self.channel_mask(CHANNEL_EXPLORED, |v| v == 0.0)
    }

    fn channel_mask(&self, channel: usize, pred: impl Fn(f32) -> bool) -> GoalMask {
        let mut mask = GoalMask::new(self.size);
        if channel >= self.channels {
            return mask;
        }
        for row in 0..self.size {
            for col in 0..self.size {
                if pred(self.data[self.index(channel, row, col)]) {
                    mask.set(row, col, true);
                }
            }
        }
        mask
    }
}

/// Binary grid over the semantic map marking acceptable goal cells.
///
/// Always the same square shape as the global map it was derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalMask {
    size: usize,
    cells: Vec<bool>,
}

impl GoalMask {
    /// Create an all-false mask with the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Side length of the square mask.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Read a cell; out-of-bounds reads as false.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        self.cells[row * self.size + col]
    }

    /// Read the cell under a grid coordinate (x = col, y = row).
    #[inline]
    pub fn contains_cell(&self, cell: GridCoord) -> bool {
        if cell.x < 0 || cell.y < 0 {
            return false;
        }
        self.get(cell.y as usize, cell.x as usize)
    }

    /// Write a cell; out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = value;
        }
    }

    /// Whether any cell is set.
    pub fn any(&self) -> bool {
        self.cells.iter().any(|&c| c)
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
