//! Grid geometry: bounds, distances, neighborhoods, range queries.
//!
//! The grid is pure spatial geometry with no mutable state. The coordinate
//! convention is X right, Y up, origin at the bottom-left cell (0, 0).

use serde::{Deserialize, Serialize};

use crate::types::GridPos;

/// Rectangular battle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Euclidean distance between two cells.
    pub fn distance(&self, a: GridPos, b: GridPos) -> f64 {
        a.distance_to(b)
    }

    /// Manhattan distance between two cells.
    pub fn manhattan_distance(&self, a: GridPos, b: GridPos) -> i32 {
        a.manhattan_distance_to(b)
    }

    /// In-bounds neighbors of a cell: the four cardinal cells, plus the
    /// four diagonals when `diagonals` is set.
    pub fn neighbors(&self, pos: GridPos, diagonals: bool) -> Vec<GridPos> {
        let mut out = Vec::with_capacity(if diagonals { 8 } else { 4 });
        for dy in -1..=1 {
            for dx in -1..=1i32 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if !diagonals && dx != 0 && dy != 0 {
                    continue;
                }
                let p = pos.offset(dx, dy);
                if self.in_bounds(p) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// All in-bounds cells within Euclidean `max_range` of `center`,
    /// including the center itself.
    pub fn positions_in_range(&self, center: GridPos, max_range: f64) -> Vec<GridPos> {
        let mut out = Vec::new();
        if max_range < 0.0 {
            return out;
        }
        let r = max_range.floor() as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                let p = center.offset(dx, dy);
                if self.in_bounds(p) && center.distance_to(p) <= max_range {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Convert a grid position to screen coordinates (Y down, origin
    /// top-left) for rendering collaborators.
    pub fn to_screen(&self, pos: GridPos) -> (i32, i32) {
        (pos.x, self.height - 1 - pos.y)
    }
}
