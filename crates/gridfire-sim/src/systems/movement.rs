//! Movement resolution: moves, radar toggles, and waits.
//!
//! Actions are executed in a deterministic shuffle drawn from the world's
//! RNG stream rather than in id order, so that two entities contending
//! for the same cell do not systematically favor the lower id. The
//! second-resolved mover simply fails with an occupancy reason.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use gridfire_core::actions::{Action, ActionFailure};
use gridfire_core::types::{EntityId, GridPos};

use crate::world::WorldState;

/// Outcome of one entity's movement-phase action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub entity_id: EntityId,
    pub action: Action,
    pub old_pos: GridPos,
    /// Position after resolution. Equals `old_pos` unless a move succeeded.
    pub new_pos: GridPos,
    pub success: bool,
    pub failure: Option<ActionFailure>,
}

/// Aggregate outcome of the movement phase for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementOutcome {
    pub results: Vec<MoveResult>,
    /// True if at least one entity changed cell; drives the stagnation
    /// counter.
    pub any_moved: bool,
}

/// Resolve all movement-phase actions (`Move`, `Toggle`, `Wait`) for a
/// turn. Every submitted action is re-validated against live capability
/// and current occupancy, regardless of any advisory legal-action list.
/// Shoot actions are left for the combat phase.
pub fn resolve_actions(
    world: &mut WorldState,
    actions: &BTreeMap<EntityId, Action>,
    randomize_order: bool,
) -> MovementOutcome {
    let mut actors: Vec<EntityId> = world
        .alive_entities()
        .filter(|e| {
            matches!(
                actions.get(&e.id),
                Some(Action::Wait) | Some(Action::Move { .. }) | Some(Action::Toggle { .. })
            )
        })
        .map(|e| e.id)
        .collect();

    if randomize_order {
        actors.shuffle(world.rng_mut());
    }

    let mut results = Vec::with_capacity(actors.len());
    let mut any_moved = false;

    for id in actors {
        let action = match actions.get(&id) {
            Some(action) => *action,
            None => continue,
        };
        if let Some(result) = resolve_single(world, id, action) {
            if result.success && result.new_pos != result.old_pos {
                any_moved = true;
            }
            results.push(result);
        }
    }

    if any_moved {
        world.turns_without_movement = 0;
    } else {
        world.turns_without_movement += 1;
    }

    MovementOutcome { results, any_moved }
}

fn resolve_single(world: &mut WorldState, id: EntityId, action: Action) -> Option<MoveResult> {
    let entity = world.entity(id)?;
    let (old_pos, can_move, is_sam) = (entity.pos, entity.can_move(), entity.sam().is_some());

    let failure = match action {
        Action::Wait => None,
        Action::Move { dir } => {
            if !can_move {
                Some(ActionFailure::NoMoveCapability)
            } else {
                let (dx, dy) = dir.delta();
                let dest = old_pos.offset(dx, dy);
                if !world.grid().in_bounds(dest) {
                    Some(ActionFailure::OutOfBounds)
                } else if world.occupant(dest).is_some() {
                    Some(ActionFailure::CellOccupied)
                } else {
                    if let Some(entity) = world.entity_mut(id) {
                        entity.pos = dest;
                    }
                    None
                }
            }
        }
        Action::Toggle { on } => {
            if !is_sam {
                Some(ActionFailure::CannotToggle)
            } else {
                if let Some(sam) = world.entity_mut(id).and_then(|e| e.sam_mut()) {
                    sam.radar_on = on;
                }
                None
            }
        }
        // Filtered out by the caller.
        Action::Shoot { .. } => return None,
    };

    let new_pos = world.entity(id).map(|e| e.pos).unwrap_or(old_pos);
    Some(MoveResult {
        entity_id: id,
        action,
        old_pos,
        new_pos,
        success: failure.is_none(),
        failure,
    })
}
