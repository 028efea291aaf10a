//! Fog-of-war layer: per-team observations rebuilt every turn.
//!
//! An observation records what a team currently knows about one entity.
//! The kind may be deceptive (enemy decoys report as aircraft). Each
//! turn's observation set wholesale replaces the previous one; nothing is
//! merged across turns. The only state that survives the rebuild is the
//! append-only record of enemies known to have fired.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::types::{EntityId, GridPos, Team};

/// What a team currently sees of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub entity_id: EntityId,
    /// Perceived kind: the true kind for friendlies, possibly deceptive
    /// for enemies.
    pub kind: EntityKind,
    pub team: Team,
    pub pos: GridPos,
    /// Distance from the nearest observer that sees this entity.
    pub distance: f64,
    /// Every observer that currently sees this entity.
    pub seen_by: BTreeSet<EntityId>,
}

impl Observation {
    pub fn is_friendly(&self, observer_team: Team) -> bool {
        self.team == observer_team
    }

    pub fn is_enemy(&self, observer_team: Team) -> bool {
        self.team != observer_team
    }
}

/// One team's aggregated view of the battlefield.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamView {
    /// Current-turn observations, keyed by observed entity.
    observations: BTreeMap<EntityId, Observation>,
    /// Enemy ids known to have fired at least once. Append-only; survives
    /// turns and entity death.
    enemy_fired: BTreeSet<EntityId>,
}

impl TeamView {
    /// Drop the current turn's observations. The fired history is kept.
    pub fn reset(&mut self) {
        self.observations.clear();
    }

    /// Add an observation, merging with any existing one for the same
    /// entity: keep the minimum distance and the union of observers.
    pub fn merge(&mut self, obs: Observation) {
        match self.observations.get_mut(&obs.entity_id) {
            Some(existing) => {
                if obs.distance < existing.distance {
                    existing.distance = obs.distance;
                }
                existing.seen_by.extend(obs.seen_by);
            }
            None => {
                self.observations.insert(obs.entity_id, obs);
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Observation> {
        self.observations.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.observations.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.values()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Ids of all observed enemies of `observer_team`.
    pub fn enemy_ids(&self, observer_team: Team) -> Vec<EntityId> {
        self.observations
            .values()
            .filter(|o| o.is_enemy(observer_team))
            .map(|o| o.entity_id)
            .collect()
    }

    /// Ids of all observed friendlies of `observer_team`.
    pub fn friendly_ids(&self, observer_team: Team) -> Vec<EntityId> {
        self.observations
            .values()
            .filter(|o| o.is_friendly(observer_team))
            .map(|o| o.entity_id)
            .collect()
    }

    /// Record that an enemy entity has fired. Monotonic.
    pub fn record_enemy_fired(&mut self, id: EntityId) {
        self.enemy_fired.insert(id);
    }

    pub fn has_enemy_fired(&self, id: EntityId) -> bool {
        self.enemy_fired.contains(&id)
    }

    pub fn enemy_fired_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.enemy_fired.iter().copied()
    }
}
