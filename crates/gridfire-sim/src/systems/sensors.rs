//! Sensor sweep: rebuilds both teams' fog-of-war views from scratch.
//!
//! Visibility is driven entirely by the observer's active radar: every
//! alive entity within an observer's range is recorded for the observer's
//! team, with the minimum observer distance and the union of all observer
//! ids. Two special rules from the unit model:
//!
//! - A SAM with its radar off emits nothing and reflects nothing: it is
//!   skipped by every sweep, friendly or enemy, and only its own
//!   self-observation keeps it on its team's plot.
//! - A decoy is reported as an Aircraft to the opposing team; its own
//!   team always sees the true kind.
//!
//! The enemy-fired history on each team view is combat's to maintain and
//! is never touched here.

use std::collections::BTreeSet;

use gridfire_core::entity::EntityKind;
use gridfire_core::observations::Observation;
use gridfire_core::types::{EntityId, GridPos, Team};

use crate::world::WorldState;

struct Contact {
    id: EntityId,
    team: Team,
    kind: EntityKind,
    pos: GridPos,
    active_radar: f64,
}

/// Discard both teams' current observations and rebuild them from the
/// current positions and radar states. The only sensing entry point used
/// by the turn pipeline.
pub fn refresh_all_observations(world: &mut WorldState) {
    for team in Team::ALL {
        world.team_view_mut(team).reset();
    }

    let contacts: Vec<Contact> = world
        .alive_entities()
        .map(|e| Contact {
            id: e.id,
            team: e.team,
            kind: e.kind(),
            pos: e.pos,
            active_radar: e.active_radar_range(),
        })
        .collect();

    // Entities always see themselves, radar or not.
    for contact in &contacts {
        let obs = Observation {
            entity_id: contact.id,
            kind: contact.kind,
            team: contact.team,
            pos: contact.pos,
            distance: 0.0,
            seen_by: BTreeSet::from([contact.id]),
        };
        world.team_view_mut(contact.team).merge(obs);
    }

    for observer in &contacts {
        if observer.active_radar <= 0.0 {
            continue;
        }
        for target in &contacts {
            if target.id == observer.id {
                continue;
            }
            // Dark SAMs are invisible to every sweep.
            if target.kind == EntityKind::Sam && target.active_radar <= 0.0 {
                continue;
            }
            let distance = observer.pos.distance_to(target.pos);
            if distance > observer.active_radar {
                continue;
            }
            let perceived = apparent_kind(target.kind, target.team, observer.team);
            let obs = Observation {
                entity_id: target.id,
                kind: perceived,
                team: target.team,
                pos: target.pos,
                distance,
                seen_by: BTreeSet::from([observer.id]),
            };
            world.team_view_mut(observer.team).merge(obs);
        }
    }
}

/// The kind a target presents to an observer. Enemy decoys masquerade as
/// aircraft; friendlies always see the truth.
fn apparent_kind(true_kind: EntityKind, target_team: Team, observer_team: Team) -> EntityKind {
    if target_team != observer_team && true_kind == EntityKind::Decoy {
        EntityKind::Aircraft
    } else {
        true_kind
    }
}

/// Whether `observer` currently sees `target`. Utility for agents and
/// validation; the pipeline itself works from the team views.
pub fn can_observe(world: &WorldState, observer_id: EntityId, target_id: EntityId) -> bool {
    if observer_id == target_id {
        return false;
    }
    let (observer, target) = match (world.entity(observer_id), world.entity(target_id)) {
        (Some(o), Some(t)) if o.alive && t.alive => (o, t),
        _ => return false,
    };
    if target.kind() == EntityKind::Sam && target.active_radar_range() <= 0.0 {
        return false;
    }
    let range = observer.active_radar_range();
    range > 0.0 && observer.pos.distance_to(target.pos) <= range
}
