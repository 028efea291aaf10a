//! World state: the entity registry and everything resolvers mutate.
//!
//! There is exactly one authoritative `WorldState` per match. Resolvers
//! mutate it in place in the fixed pipeline order; callers that need a
//! stable view take a deep clone. The id counter and RNG stream live here
//! so that parallel matches never contaminate each other.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use gridfire_core::actions::Action;
use gridfire_core::entity::{Entity, EntityBody};
use gridfire_core::grid::Grid;
use gridfire_core::observations::TeamView;
use gridfire_core::types::{EntityId, GridPos, MoveDir, Team};

use crate::scenario::EntitySpec;
use crate::systems::victory::VictoryReason;

/// Complete mutable state of one match.
///
/// `Clone` produces a fully independent deep copy: no back-references, no
/// shared mutable state with the original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub(crate) grid: Grid,
    /// Registry keyed by id. Ids are assigned monotonically and never
    /// reused; dead entities stay registered.
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) next_id: u32,
    pub turn: u32,
    pub turns_without_shooting: u32,
    pub turns_without_movement: u32,
    /// Kills staged during combat, in the order they were marked. Applied
    /// exactly once after all shots for the turn are evaluated.
    pub(crate) pending_kills: Vec<EntityId>,
    pub(crate) blue_view: TeamView,
    pub(crate) red_view: TeamView,
    /// The match's single RNG stream, consumed in documented order
    /// (movement shuffle, combat shuffle, hit rolls).
    pub(crate) rng: ChaCha8Rng,
    pub game_over: bool,
    pub winner: Option<Team>,
    pub game_over_reason: Option<VictoryReason>,
}

impl WorldState {
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            entities: BTreeMap::new(),
            next_id: 0,
            turn: 0,
            turns_without_shooting: 0,
            turns_without_movement: 0,
            pending_kills: Vec::new(),
            blue_view: TeamView::default(),
            red_view: TeamView::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            game_over: false,
            winner: None,
            game_over_reason: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The next id the registry will assign.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Register a new entity, assigning the next id.
    pub fn spawn(&mut self, spec: EntitySpec) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            Entity {
                id,
                team: spec.team,
                pos: spec.pos,
                alive: true,
                body: spec.body,
            },
        );
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All entities, dead or alive, in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn alive_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(|e| e.alive)
    }

    pub fn alive_team_entities(&self, team: Team) -> impl Iterator<Item = &Entity> {
        self.alive_entities().filter(move |e| e.team == team)
    }

    /// The live entity occupying a cell, if any.
    pub fn occupant(&self, pos: GridPos) -> Option<EntityId> {
        self.alive_entities().find(|e| e.pos == pos).map(|e| e.id)
    }

    /// Stage an entity for death. The kill is applied after all combat for
    /// the turn has been evaluated, never immediately.
    pub fn mark_for_kill(&mut self, id: EntityId) {
        if !self.pending_kills.contains(&id) {
            self.pending_kills.push(id);
        }
    }

    /// Kills staged this turn, in marking order.
    pub fn pending_kills(&self) -> &[EntityId] {
        &self.pending_kills
    }

    pub(crate) fn clear_pending_kills(&mut self) {
        self.pending_kills.clear();
    }

    pub fn team_view(&self, team: Team) -> &TeamView {
        match team {
            Team::Blue => &self.blue_view,
            Team::Red => &self.red_view,
        }
    }

    pub(crate) fn team_view_mut(&mut self, team: Team) -> &mut TeamView {
        match team {
            Team::Blue => &mut self.blue_view,
            Team::Red => &mut self.red_view,
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Serve one turn of cooldown on every live SAM.
    pub(crate) fn tick_cooldowns(&mut self) {
        for entity in self.entities.values_mut() {
            if !entity.alive {
                continue;
            }
            if let EntityBody::Sam(sam) = &mut entity.body {
                sam.tick_cooldown();
            }
        }
    }

    /// Advisory legal-action query for agents. Always includes `Wait`;
    /// the resolvers independently re-validate every submitted action, so
    /// nothing here is enforced.
    pub fn allowed_actions(&self, id: EntityId) -> Vec<Action> {
        let entity = match self.entities.get(&id) {
            Some(e) if e.alive => e,
            _ => return Vec::new(),
        };

        let mut actions = vec![Action::Wait];

        if entity.can_move() {
            for dir in MoveDir::ALL {
                let (dx, dy) = dir.delta();
                let dest = entity.pos.offset(dx, dy);
                if self.grid.in_bounds(dest) && self.occupant(dest).is_none() {
                    actions.push(Action::Move { dir });
                }
            }
        }

        if let Some(sam) = entity.sam() {
            actions.push(Action::Toggle { on: !sam.radar_on });
        }

        if let Some(weapon) = entity.weapon() {
            let on_cooldown = entity.sam().is_some_and(|s| s.remaining_cooldown > 0);
            if entity.can_shoot() && weapon.missiles > 0 && !on_cooldown {
                let view = self.team_view(entity.team);
                for target_id in view.enemy_ids(entity.team) {
                    let in_range = self
                        .entities
                        .get(&target_id)
                        .filter(|t| t.alive)
                        .is_some_and(|t| {
                            self.grid.distance(entity.pos, t.pos) <= weapon.max_range
                        });
                    if in_range {
                        actions.push(Action::Shoot { target_id });
                    }
                }
            }
        }

        actions
    }
}
