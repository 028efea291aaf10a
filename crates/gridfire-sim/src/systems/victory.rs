//! Victory conditions: stateless, priority-ordered end-of-turn check.

use serde::{Deserialize, Serialize};

use gridfire_core::entity::EntityKind;
use gridfire_core::types::{GameResult, Team};

use crate::world::WorldState;

/// Why the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryReason {
    /// A team's AWACS was destroyed (or both, for a draw).
    AwacsDestroyed,
    /// No live shooter on either team has ammo left.
    MissileExhaustion,
    /// Too many consecutive turns without a shot fired.
    CombatStalemate,
    /// Too many consecutive turns without any movement.
    MovementStagnation,
    /// The configured turn cap was reached.
    TurnLimit,
}

/// Result of one victory check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VictoryResult {
    pub result: GameResult,
    pub winner: Option<Team>,
    pub reason: Option<VictoryReason>,
    pub is_game_over: bool,
}

impl VictoryResult {
    fn game_continues() -> Self {
        Self {
            result: GameResult::InProgress,
            winner: None,
            reason: None,
            is_game_over: false,
        }
    }

    fn ended(result: GameResult, reason: VictoryReason) -> Self {
        Self {
            result,
            winner: result.winner(),
            reason: Some(reason),
            is_game_over: true,
        }
    }
}

/// Victory thresholds for a match. Stateless: `check_all` reads the world
/// and never mutates anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VictoryConditions {
    pub max_stalemate_turns: u32,
    pub max_no_move_turns: u32,
    pub max_turns: Option<u32>,
    pub check_missile_exhaustion: bool,
}

impl VictoryConditions {
    /// Evaluate all end conditions in strict priority order, stopping at
    /// the first match: AWACS destruction, missile exhaustion, combat
    /// stalemate, movement stagnation, turn limit.
    pub fn check_all(&self, world: &WorldState) -> VictoryResult {
        let blue_awacs = team_has_awacs(world, Team::Blue);
        let red_awacs = team_has_awacs(world, Team::Red);
        match (blue_awacs, red_awacs) {
            (false, false) => {
                return VictoryResult::ended(GameResult::Draw, VictoryReason::AwacsDestroyed)
            }
            (false, true) => {
                return VictoryResult::ended(GameResult::RedWins, VictoryReason::AwacsDestroyed)
            }
            (true, false) => {
                return VictoryResult::ended(GameResult::BlueWins, VictoryReason::AwacsDestroyed)
            }
            (true, true) => {}
        }

        if self.check_missile_exhaustion && all_shooters_empty(world) {
            return VictoryResult::ended(GameResult::Draw, VictoryReason::MissileExhaustion);
        }

        if world.turns_without_shooting > self.max_stalemate_turns {
            return VictoryResult::ended(GameResult::Draw, VictoryReason::CombatStalemate);
        }

        if world.turns_without_movement > self.max_no_move_turns {
            return VictoryResult::ended(GameResult::Draw, VictoryReason::MovementStagnation);
        }

        if let Some(cap) = self.max_turns {
            if world.turn >= cap {
                return VictoryResult::ended(GameResult::Draw, VictoryReason::TurnLimit);
            }
        }

        VictoryResult::game_continues()
    }
}

fn team_has_awacs(world: &WorldState, team: Team) -> bool {
    world
        .alive_team_entities(team)
        .any(|e| e.kind() == EntityKind::Awacs)
}

/// True when every alive shooting-capable entity on both teams has zero
/// ammo (vacuously true when no shooters remain).
fn all_shooters_empty(world: &WorldState) -> bool {
    world
        .alive_entities()
        .filter(|e| e.can_shoot())
        .all(|e| e.weapon().map(|w| w.missiles == 0).unwrap_or(true))
}
