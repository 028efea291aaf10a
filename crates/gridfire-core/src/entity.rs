//! Entity model: the closed set of unit kinds and their capability contract.
//!
//! Entities are a tagged variant over the four unit kinds. Capability
//! questions (can it move, can it shoot, what does its radar currently
//! cover) are answered by exhaustive matching on the body, never by
//! runtime type checks. A decoy's deceptive appearance is applied by the
//! sensor sweep when building the opposing team's observations; it is not
//! stored as entity state.

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, GridPos, Team};

/// The true kind of a unit (or, in an observation, its perceived kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Aircraft,
    Awacs,
    Sam,
    Decoy,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Aircraft => "Aircraft",
            EntityKind::Awacs => "AWACS",
            EntityKind::Sam => "SAM",
            EntityKind::Decoy => "Decoy",
        }
    }
}

/// Missile loadout shared by the armed kinds (Aircraft, SAM).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Remaining missiles. Non-increasing over a match.
    pub missiles: u32,
    /// Maximum engagement range (grid distance).
    pub max_range: f64,
    /// Hit probability at distance 0.
    pub base_hit_prob: f64,
    /// Hit probability at and beyond `max_range`.
    pub min_hit_prob: f64,
}

/// Aircraft: mobile, armed, fixed radar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftStats {
    pub radar_range: f64,
    pub weapon: WeaponStats,
}

/// AWACS: mobile sensor platform, unarmed. Its destruction is the primary
/// loss condition for its team (checked by the victory rules, not here).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwacsStats {
    pub radar_range: f64,
}

/// SAM: stationary, armed, toggleable radar with a post-fire cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamStats {
    pub radar_range: f64,
    pub weapon: WeaponStats,
    /// Turns of cooldown served after each shot.
    pub cooldown_steps: u32,
    /// Turns of cooldown still to serve; 0 means ready to fire.
    pub remaining_cooldown: u32,
    /// Radar power state. Off means zero sensor coverage and no radar
    /// signature for enemies to detect.
    pub radar_on: bool,
}

impl SamStats {
    /// Begin the post-fire cooldown.
    pub fn start_cooldown(&mut self) {
        self.remaining_cooldown = self.cooldown_steps;
    }

    /// Serve one turn of cooldown.
    pub fn tick_cooldown(&mut self) {
        self.remaining_cooldown = self.remaining_cooldown.saturating_sub(1);
    }
}

/// Kind-specific state, tagged by unit kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityBody {
    Aircraft(AircraftStats),
    Awacs(AwacsStats),
    Sam(SamStats),
    /// Unarmed, sensorless lure. Appears as an Aircraft to enemy observers.
    Decoy,
}

/// A unit on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub team: Team,
    pub pos: GridPos,
    pub alive: bool,
    pub body: EntityBody,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self.body {
            EntityBody::Aircraft(_) => EntityKind::Aircraft,
            EntityBody::Awacs(_) => EntityKind::Awacs,
            EntityBody::Sam(_) => EntityKind::Sam,
            EntityBody::Decoy => EntityKind::Decoy,
        }
    }

    pub fn can_move(&self) -> bool {
        match self.body {
            EntityBody::Aircraft(_) | EntityBody::Awacs(_) | EntityBody::Decoy => true,
            EntityBody::Sam(_) => false,
        }
    }

    pub fn can_shoot(&self) -> bool {
        match self.body {
            EntityBody::Aircraft(_) | EntityBody::Sam(_) => true,
            EntityBody::Awacs(_) | EntityBody::Decoy => false,
        }
    }

    /// Configured radar range, ignoring power state.
    pub fn radar_range(&self) -> f64 {
        match self.body {
            EntityBody::Aircraft(a) => a.radar_range,
            EntityBody::Awacs(a) => a.radar_range,
            EntityBody::Sam(s) => s.radar_range,
            EntityBody::Decoy => 0.0,
        }
    }

    /// Effective radar range this turn: a SAM with its radar off covers
    /// nothing, everything else covers its configured range.
    pub fn active_radar_range(&self) -> f64 {
        match self.body {
            EntityBody::Sam(s) if !s.radar_on => 0.0,
            _ => self.radar_range(),
        }
    }

    /// Weapon loadout for the armed kinds.
    pub fn weapon(&self) -> Option<&WeaponStats> {
        match &self.body {
            EntityBody::Aircraft(a) => Some(&a.weapon),
            EntityBody::Sam(s) => Some(&s.weapon),
            EntityBody::Awacs(_) | EntityBody::Decoy => None,
        }
    }

    pub fn weapon_mut(&mut self) -> Option<&mut WeaponStats> {
        match &mut self.body {
            EntityBody::Aircraft(a) => Some(&mut a.weapon),
            EntityBody::Sam(s) => Some(&mut s.weapon),
            EntityBody::Awacs(_) | EntityBody::Decoy => None,
        }
    }

    pub fn sam(&self) -> Option<&SamStats> {
        match &self.body {
            EntityBody::Sam(s) => Some(s),
            _ => None,
        }
    }

    pub fn sam_mut(&mut self) -> Option<&mut SamStats> {
        match &mut self.body {
            EntityBody::Sam(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable label like `Aircraft#3(BLUE)`, used in combat logs.
    pub fn label(&self) -> String {
        let team = match self.team {
            Team::Blue => "BLUE",
            Team::Red => "RED",
        };
        format!("{}#{}({})", self.kind().as_str(), self.id, team)
    }
}
