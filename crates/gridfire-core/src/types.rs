//! Fundamental simulation types: teams, entity ids, grid coordinates.

use serde::{Deserialize, Serialize};

/// One of the two opposing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// The opposing team.
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    /// Both teams, in canonical order.
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];
}

/// Unique entity identifier. Assigned monotonically by the world that owns
/// the entity; never reused within a world's lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer grid coordinate. X increases to the right, Y increases upward,
/// origin at the bottom-left corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by a delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another cell.
    pub fn distance_to(self, other: GridPos) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Manhattan distance to another cell.
    pub fn manhattan_distance_to(self, other: GridPos) -> i32 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDir {
    North,
    South,
    East,
    West,
}

impl MoveDir {
    /// Grid delta for this direction (Y up).
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::North => (0, 1),
            MoveDir::South => (0, -1),
            MoveDir::East => (1, 0),
            MoveDir::West => (-1, 0),
        }
    }

    /// All four directions, in canonical order.
    pub const ALL: [MoveDir; 4] = [MoveDir::North, MoveDir::South, MoveDir::East, MoveDir::West];
}

/// Overall outcome of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    InProgress,
    BlueWins,
    RedWins,
    Draw,
}

impl GameResult {
    /// The winning team, if the result names one.
    pub fn winner(self) -> Option<Team> {
        match self {
            GameResult::BlueWins => Some(Team::Blue),
            GameResult::RedWins => Some(Team::Red),
            GameResult::InProgress | GameResult::Draw => None,
        }
    }
}
