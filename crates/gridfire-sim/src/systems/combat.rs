//! Combat resolution: shot validation, hit rolls, and staged kills.
//!
//! A valid shot always costs a missile (and starts a SAM's cooldown)
//! whether or not it hits. Hits never remove the target immediately: they
//! stage the kill so that every shot this turn is evaluated against the
//! same pre-combat alive set, letting simultaneous mutual kills both
//! succeed. Staged kills are applied in one pass after the last shot.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use gridfire_core::actions::{Action, ActionFailure};
use gridfire_core::entity::WeaponStats;
use gridfire_core::types::EntityId;

use crate::world::WorldState;

/// Hit probability at `distance`: linear falloff from `base` at zero to
/// `min_p` at `max_range`, and `min_p` for anything beyond.
pub fn hit_probability(distance: f64, max_range: f64, base: f64, min_p: f64) -> f64 {
    if max_range <= 0.0 {
        return 0.0;
    }
    let frac = (distance / max_range).clamp(0.0, 1.0);
    base - (base - min_p) * frac
}

/// Outcome of a single shoot action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub attacker_id: EntityId,
    pub target_id: EntityId,
    /// Whether the shot was actually fired (not whether it hit).
    pub success: bool,
    pub hit: Option<bool>,
    pub distance: Option<f64>,
    pub hit_probability: Option<f64>,
    pub failure: Option<ActionFailure>,
    /// Human-readable account for downstream logging.
    pub log: String,
}

/// Aggregate outcome of the combat phase for one turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub shots: Vec<ShotResult>,
    pub death_logs: Vec<String>,
    /// Entities whose deaths were applied this turn, in kill order.
    pub killed: Vec<EntityId>,
    /// True if at least one shot was fired; drives the stalemate counter.
    pub combat_occurred: bool,
}

/// Resolve all shoot actions for a turn, then apply staged kills.
pub fn resolve_combat(
    world: &mut WorldState,
    actions: &BTreeMap<EntityId, Action>,
    randomize_order: bool,
) -> CombatOutcome {
    let mut shooters: Vec<(EntityId, EntityId)> = world
        .alive_entities()
        .filter_map(|e| match actions.get(&e.id) {
            Some(Action::Shoot { target_id }) => Some((e.id, *target_id)),
            _ => None,
        })
        .collect();

    if randomize_order {
        shooters.shuffle(world.rng_mut());
    }

    let mut shots = Vec::with_capacity(shooters.len());
    for (attacker_id, target_id) in shooters {
        shots.push(resolve_shot(world, attacker_id, target_id));
    }

    let (death_logs, killed) = apply_pending_kills(world);

    let combat_occurred = shots.iter().any(|s| s.success);
    if combat_occurred {
        world.turns_without_shooting = 0;
    } else {
        world.turns_without_shooting += 1;
    }

    CombatOutcome {
        shots,
        death_logs,
        killed,
        combat_occurred,
    }
}

fn blocked(
    attacker_id: EntityId,
    target_id: EntityId,
    failure: ActionFailure,
    log: String,
) -> ShotResult {
    ShotResult {
        attacker_id,
        target_id,
        success: false,
        hit: None,
        distance: None,
        hit_probability: None,
        failure: Some(failure),
        log,
    }
}

fn resolve_shot(world: &mut WorldState, attacker_id: EntityId, target_id: EntityId) -> ShotResult {
    let (attacker_label, attacker_team, attacker_pos, weapon, on_cooldown) =
        match world.entity(attacker_id) {
            Some(a) => (
                a.label(),
                a.team,
                a.pos,
                a.weapon().copied(),
                a.sam().is_some_and(|s| s.remaining_cooldown > 0),
            ),
            None => {
                return blocked(
                    attacker_id,
                    target_id,
                    ActionFailure::TargetDead,
                    format!("attacker #{attacker_id} vanished before firing"),
                )
            }
        };

    let weapon: WeaponStats = match weapon {
        Some(w) => w,
        None => {
            return blocked(
                attacker_id,
                target_id,
                ActionFailure::NoShootCapability,
                format!("{attacker_label} has no weapons"),
            )
        }
    };
    if weapon.missiles == 0 {
        return blocked(
            attacker_id,
            target_id,
            ActionFailure::NoMissiles,
            format!("{attacker_label} is out of missiles"),
        );
    }
    if on_cooldown {
        return blocked(
            attacker_id,
            target_id,
            ActionFailure::OnCooldown,
            format!("{attacker_label} is still on cooldown"),
        );
    }

    let (target_label, target_team, target_pos) = match world.entity(target_id) {
        Some(t) if t.alive => (t.label(), t.team, t.pos),
        _ => {
            return blocked(
                attacker_id,
                target_id,
                ActionFailure::TargetDead,
                format!("{attacker_label} target #{target_id} is dead or unknown"),
            )
        }
    };

    // The target must be an enemy the attacker's team currently sees.
    let visible = target_team != attacker_team
        && world.team_view(attacker_team).contains(target_id);
    if !visible {
        return blocked(
            attacker_id,
            target_id,
            ActionFailure::TargetNotVisible,
            format!("{attacker_label} cannot see {target_label}"),
        );
    }

    let distance = attacker_pos.distance_to(target_pos);
    if distance > weapon.max_range {
        return blocked(
            attacker_id,
            target_id,
            ActionFailure::OutOfRange,
            format!(
                "{attacker_label} target {target_label} out of range (d={distance:.1})"
            ),
        );
    }

    // The shot is valid: the missile is spent regardless of outcome.
    if let Some(attacker) = world.entity_mut(attacker_id) {
        if let Some(w) = attacker.weapon_mut() {
            w.missiles -= 1;
        }
        if let Some(sam) = attacker.sam_mut() {
            sam.start_cooldown();
        }
    }

    let prob = hit_probability(
        distance,
        weapon.max_range,
        weapon.base_hit_prob,
        weapon.min_hit_prob,
    );
    let roll: f64 = world.rng_mut().gen();
    let hit = roll <= prob;

    if hit {
        world.mark_for_kill(target_id);
    }

    world
        .team_view_mut(target_team)
        .record_enemy_fired(attacker_id);

    let verdict = if hit { "HIT" } else { "MISS" };
    let log = format!(
        "{attacker_label} fires at {target_label} (d={distance:.1}, p={prob:.2}, \
         roll={roll:.2}) -> {verdict}"
    );

    ShotResult {
        attacker_id,
        target_id,
        success: true,
        hit: Some(hit),
        distance: Some(distance),
        hit_probability: Some(prob),
        failure: None,
        log,
    }
}

/// Flip staged kills to dead, in the order they were marked. Each kill is
/// applied at most once even if several shots hit the same target.
fn apply_pending_kills(world: &mut WorldState) -> (Vec<String>, Vec<EntityId>) {
    let pending: Vec<EntityId> = world.pending_kills().to_vec();
    let mut logs = Vec::new();
    let mut killed = Vec::new();

    for id in pending {
        if let Some(entity) = world.entity_mut(id) {
            if entity.alive {
                entity.alive = false;
                logs.push(format!("{} was destroyed!", entity.label()));
                killed.push(id);
            }
        }
    }

    world.clear_pending_kills();
    (logs, killed)
}
