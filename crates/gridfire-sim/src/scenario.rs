//! Scenario descriptors: everything needed to start a reproducible match.
//!
//! A scenario carries the grid dimensions, victory thresholds, RNG seed,
//! and the full initial entity list with explicit stats. It is consumed
//! once when an engine is created; scenario *files* and their loading
//! belong to outer layers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gridfire_core::entity::{AircraftStats, AwacsStats, EntityBody, SamStats, WeaponStats};
use gridfire_core::types::{GridPos, Team};

/// An entity to spawn at match start. Ids are assigned by the world in
/// list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub team: Team,
    pub pos: GridPos,
    pub body: EntityBody,
}

/// A complete, self-contained match definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Turns without a shot fired before the match is drawn.
    pub max_stalemate_turns: u32,
    /// Turns without any movement before the match is drawn.
    pub max_no_move_turns: u32,
    /// Optional hard cap on total turns; reaching it draws the match.
    pub max_turns: Option<u32>,
    /// Draw the match early once no live shooter has ammo left.
    pub check_missile_exhaustion: bool,
    /// RNG seed. Same seed + same actions = same match.
    pub seed: u64,
    pub entities: Vec<EntitySpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            max_stalemate_turns: 60,
            max_no_move_turns: 15,
            max_turns: None,
            check_missile_exhaustion: true,
            seed: 42,
            entities: Vec::new(),
        }
    }
}

/// Why a scenario descriptor was rejected.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidGrid { width: i32, height: i32 },
    #[error("entity {index} at {pos} is outside the grid")]
    EntityOutOfBounds { index: usize, pos: GridPos },
    #[error("entities {first} and {second} both start at {pos}")]
    DuplicatePosition {
        first: usize,
        second: usize,
        pos: GridPos,
    },
    #[error("entity {index}: radar range cannot be negative, got {range}")]
    NegativeRadarRange { index: usize, range: f64 },
    #[error("entity {index}: missile range must be positive, got {range}")]
    NonPositiveMissileRange { index: usize, range: f64 },
    #[error("entity {index}: hit probability {value} outside [0, 1]")]
    InvalidHitProbability { index: usize, value: f64 },
    #[error("entity {index}: min hit probability {min_p} exceeds base {base}")]
    MinAboveBase { index: usize, min_p: f64, base: f64 },
    #[error(
        "resumed world grid {world_width}x{world_height} does not match \
         scenario grid {width}x{height}"
    )]
    GridMismatch {
        world_width: i32,
        world_height: i32,
        width: i32,
        height: i32,
    },
}

impl Scenario {
    /// Structural validation of the descriptor. Does not touch any world.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ScenarioError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for (index, spec) in self.entities.iter().enumerate() {
            let pos = spec.pos;
            if pos.x < 0 || pos.x >= self.grid_width || pos.y < 0 || pos.y >= self.grid_height {
                return Err(ScenarioError::EntityOutOfBounds { index, pos });
            }
            for (earlier, other) in self.entities[..index].iter().enumerate() {
                if other.pos == pos {
                    return Err(ScenarioError::DuplicatePosition {
                        first: earlier,
                        second: index,
                        pos,
                    });
                }
            }
            validate_body(index, &spec.body)?;
        }

        Ok(())
    }
}

fn validate_body(index: usize, body: &EntityBody) -> Result<(), ScenarioError> {
    let (radar_range, weapon) = match body {
        EntityBody::Aircraft(a) => (a.radar_range, Some(&a.weapon)),
        EntityBody::Sam(s) => (s.radar_range, Some(&s.weapon)),
        EntityBody::Awacs(a) => (a.radar_range, None),
        EntityBody::Decoy => (0.0, None),
    };

    if radar_range < 0.0 {
        return Err(ScenarioError::NegativeRadarRange {
            index,
            range: radar_range,
        });
    }

    if let Some(weapon) = weapon {
        if weapon.max_range <= 0.0 {
            return Err(ScenarioError::NonPositiveMissileRange {
                index,
                range: weapon.max_range,
            });
        }
        for value in [weapon.base_hit_prob, weapon.min_hit_prob] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioError::InvalidHitProbability { index, value });
            }
        }
        if weapon.min_hit_prob > weapon.base_hit_prob {
            return Err(ScenarioError::MinAboveBase {
                index,
                min_p: weapon.min_hit_prob,
                base: weapon.base_hit_prob,
            });
        }
    }

    Ok(())
}

/// Combined-arms fixture on a 20x13 grid: AWACS, aircraft, SAMs, and a
/// red decoy. Used by tests and demos.
pub fn demo_battle() -> Scenario {
    let fighter = |team: Team, x: i32, y: i32| EntitySpec {
        team,
        pos: GridPos::new(x, y),
        body: EntityBody::Aircraft(AircraftStats {
            radar_range: 5.0,
            weapon: WeaponStats {
                missiles: 4,
                max_range: 4.0,
                base_hit_prob: 0.8,
                min_hit_prob: 0.1,
            },
        }),
    };
    let battery = |team: Team, x: i32, y: i32, radar_on: bool| EntitySpec {
        team,
        pos: GridPos::new(x, y),
        body: EntityBody::Sam(SamStats {
            radar_range: 8.0,
            weapon: WeaponStats {
                missiles: 6,
                max_range: 6.0,
                base_hit_prob: 0.8,
                min_hit_prob: 0.1,
            },
            cooldown_steps: 5,
            remaining_cooldown: 0,
            radar_on,
        }),
    };
    let awacs = |team: Team, x: i32, y: i32| EntitySpec {
        team,
        pos: GridPos::new(x, y),
        body: EntityBody::Awacs(AwacsStats { radar_range: 9.0 }),
    };

    Scenario {
        grid_width: 20,
        grid_height: 13,
        max_stalemate_turns: 60,
        max_no_move_turns: 100,
        max_turns: Some(50),
        check_missile_exhaustion: true,
        seed: 42,
        entities: vec![
            awacs(Team::Blue, 1, 10),
            fighter(Team::Blue, 5, 10),
            fighter(Team::Blue, 5, 12),
            battery(Team::Blue, 2, 2, true),
            awacs(Team::Red, 19, 10),
            fighter(Team::Red, 15, 10),
            fighter(Team::Red, 15, 8),
            EntitySpec {
                team: Team::Red,
                pos: GridPos::new(16, 10),
                body: EntityBody::Decoy,
            },
            battery(Team::Red, 18, 12, false),
        ],
    }
}
