//! Actions submitted by agents, and the gameplay-level reasons they fail.
//!
//! Gameplay invalidity is never a fatal condition: an illegal action is
//! recorded with a failure reason and resolution continues for the rest of
//! the turn.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, MoveDir};

/// One entity's intent for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Do nothing. Always legal for a live entity.
    Wait,
    /// Step one cell in a cardinal direction.
    Move { dir: MoveDir },
    /// Fire a missile at a visible enemy.
    Shoot { target_id: EntityId },
    /// Switch a SAM's radar on or off.
    Toggle { on: bool },
}

/// Why a validated action was refused at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFailure {
    /// Actor cannot move (immobile kind).
    NoMoveCapability,
    /// Actor has no weapons.
    NoShootCapability,
    /// Destination lies outside the grid.
    OutOfBounds,
    /// Destination already holds a live entity.
    CellOccupied,
    /// Actor has no toggleable radar.
    CannotToggle,
    /// Actor is out of missiles.
    NoMissiles,
    /// SAM still serving its post-fire cooldown.
    OnCooldown,
    /// Target is not in the actor team's current observation set, or is
    /// not an enemy.
    TargetNotVisible,
    /// Target is already dead or does not exist.
    TargetDead,
    /// Target is beyond the actor's missile range.
    OutOfRange,
}

impl ActionFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionFailure::NoMoveCapability => "no_move_capability",
            ActionFailure::NoShootCapability => "no_shoot_capability",
            ActionFailure::OutOfBounds => "out_of_bounds",
            ActionFailure::CellOccupied => "cell_occupied",
            ActionFailure::CannotToggle => "cannot_toggle",
            ActionFailure::NoMissiles => "no_missiles",
            ActionFailure::OnCooldown => "on_cooldown",
            ActionFailure::TargetNotVisible => "target_not_visible",
            ActionFailure::TargetDead => "target_dead",
            ActionFailure::OutOfRange => "out_of_range",
        }
    }
}
