//! Turn engine: the fixed per-turn pipeline over one authoritative world.
//!
//! One `CombatEngine` runs one match. Each `step` consumes a map of
//! entity id to action and executes, atomically and synchronously:
//! intake validation, cooldown tick, movement, sensor refresh, combat,
//! victory check. Once the match ends the engine is terminal: further
//! steps return the stored final outcome without mutating anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gridfire_core::actions::Action;
use gridfire_core::grid::Grid;
use gridfire_core::types::{EntityId, GameResult, Team};

use crate::scenario::{Scenario, ScenarioError};
use crate::systems::combat::{self, CombatOutcome};
use crate::systems::movement::{self, MovementOutcome};
use crate::systems::sensors;
use crate::systems::victory::{VictoryConditions, VictoryResult};
use crate::world::WorldState;

/// Why an action never entered the resolver pipeline. Distinct from
/// gameplay failures: these are malformed submissions, not legal moves
/// that happened to be impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// No entity with this id exists in the match.
    UnknownEntity,
    /// The entity is dead and cannot act.
    DeadEntity,
}

/// An action refused at intake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RejectedAction {
    pub entity_id: EntityId,
    pub action: Action,
    pub reason: RejectReason,
}

/// Per-team reward signal: +1 win, -1 loss, 0 for draw or in-progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRewards {
    pub blue: f64,
    pub red: f64,
}

impl TeamRewards {
    fn from_victory(victory: &VictoryResult) -> Self {
        match victory.result {
            GameResult::BlueWins => Self {
                blue: 1.0,
                red: -1.0,
            },
            GameResult::RedWins => Self {
                blue: -1.0,
                red: 1.0,
            },
            GameResult::Draw | GameResult::InProgress => Self::default(),
        }
    }

    pub fn for_team(&self, team: Team) -> f64 {
        match team {
            Team::Blue => self.blue,
            Team::Red => self.red,
        }
    }
}

/// Raw resolver outputs for one step, for downstream logging/analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub rejected: Vec<RejectedAction>,
    pub movement: MovementOutcome,
    pub combat: CombatOutcome,
    pub victory: VictoryResult,
}

/// Everything a step produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Deep copy of the post-step world; shares nothing with the live one.
    pub state: WorldState,
    pub rewards: TeamRewards,
    pub done: bool,
    pub info: StepInfo,
}

/// Orchestrates one match from scenario to terminal state.
pub struct CombatEngine {
    world: WorldState,
    victory: VictoryConditions,
    terminal: Option<StepOutcome>,
}

impl CombatEngine {
    /// Start a fresh match from a scenario descriptor. Entities are
    /// spawned in scenario order (so ids are stable), then an initial
    /// sensor sweep fills both team views.
    pub fn new(scenario: &Scenario) -> Result<Self, ScenarioError> {
        scenario.validate()?;

        let grid = Grid::new(scenario.grid_width, scenario.grid_height);
        let mut world = WorldState::new(grid, scenario.seed);
        for spec in &scenario.entities {
            world.spawn(spec.clone());
        }
        sensors::refresh_all_observations(&mut world);

        log::debug!(
            "new match: {}x{} grid, {} entities, seed {}",
            scenario.grid_width,
            scenario.grid_height,
            scenario.entities.len(),
            scenario.seed
        );

        Ok(Self {
            world,
            victory: VictoryConditions {
                max_stalemate_turns: scenario.max_stalemate_turns,
                max_no_move_turns: scenario.max_no_move_turns,
                max_turns: scenario.max_turns,
                check_missile_exhaustion: scenario.check_missile_exhaustion,
            },
            terminal: None,
        })
    }

    /// Resume a match from a previously decoded world. The scenario still
    /// supplies the victory thresholds and must agree with the world's
    /// grid.
    pub fn resume(scenario: &Scenario, mut world: WorldState) -> Result<Self, ScenarioError> {
        let grid = *world.grid();
        if grid.width != scenario.grid_width || grid.height != scenario.grid_height {
            return Err(ScenarioError::GridMismatch {
                world_width: grid.width,
                world_height: grid.height,
                width: scenario.grid_width,
                height: scenario.grid_height,
            });
        }
        sensors::refresh_all_observations(&mut world);

        Ok(Self {
            world,
            victory: VictoryConditions {
                max_stalemate_turns: scenario.max_stalemate_turns,
                max_no_move_turns: scenario.max_no_move_turns,
                max_turns: scenario.max_turns,
                check_missile_exhaustion: scenario.check_missile_exhaustion,
            },
            terminal: None,
        })
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn is_game_over(&self) -> bool {
        self.world.game_over
    }

    pub fn winner(&self) -> Option<Team> {
        self.world.winner
    }

    /// Execute one turn. Intake-invalid actions (unknown or dead ids) are
    /// rejected before the pipeline and never reach a resolver; everything
    /// else is re-validated by the resolvers themselves.
    pub fn step(&mut self, actions: &BTreeMap<EntityId, Action>) -> StepOutcome {
        if let Some(terminal) = &self.terminal {
            return terminal.clone();
        }
        if self.world.game_over {
            // Resumed from an already-finished snapshot.
            let outcome = self.terminal_outcome();
            self.terminal = Some(outcome.clone());
            return outcome;
        }

        let mut accepted = BTreeMap::new();
        let mut rejected = Vec::new();
        for (&entity_id, &action) in actions {
            match self.world.entity(entity_id) {
                None => rejected.push(RejectedAction {
                    entity_id,
                    action,
                    reason: RejectReason::UnknownEntity,
                }),
                Some(e) if !e.alive => rejected.push(RejectedAction {
                    entity_id,
                    action,
                    reason: RejectReason::DeadEntity,
                }),
                Some(_) => {
                    accepted.insert(entity_id, action);
                }
            }
        }

        self.world.turn += 1;
        self.world.tick_cooldowns();

        let movement = movement::resolve_actions(&mut self.world, &accepted, true);
        sensors::refresh_all_observations(&mut self.world);
        let combat = combat::resolve_combat(&mut self.world, &accepted, true);
        let victory = self.victory.check_all(&self.world);

        if victory.is_game_over {
            self.world.game_over = true;
            self.world.winner = victory.winner;
            self.world.game_over_reason = victory.reason;
            log::info!(
                "match over on turn {}: {:?} ({:?})",
                self.world.turn,
                victory.result,
                victory.reason
            );
        }

        let outcome = StepOutcome {
            state: self.world.clone(),
            rewards: TeamRewards::from_victory(&victory),
            done: victory.is_game_over,
            info: StepInfo {
                rejected,
                movement,
                combat,
                victory,
            },
        };

        if outcome.done {
            self.terminal = Some(outcome.clone());
        }
        outcome
    }

    fn terminal_outcome(&self) -> StepOutcome {
        let victory = self.victory.check_all(&self.world);
        StepOutcome {
            state: self.world.clone(),
            rewards: TeamRewards::from_victory(&victory),
            done: true,
            info: StepInfo {
                rejected: Vec::new(),
                movement: MovementOutcome::default(),
                combat: CombatOutcome::default(),
                victory,
            },
        }
    }
}
