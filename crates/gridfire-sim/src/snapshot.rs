//! Portable world snapshots for mid-match persistence and resume.
//!
//! The encoding is a versioned envelope around the full `WorldState`,
//! RNG stream included, so a resumed match continues bit-for-bit where
//! the original left off. Decode validates the payload structurally and
//! either yields a complete world or an error, never a partially built
//! one, and never a mutation of any live state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gridfire_core::types::{EntityId, GridPos};

use crate::world::WorldState;

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Versioned, serializable envelope around a world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortableWorld {
    pub schema_version: u32,
    pub world: WorldState,
}

/// Why a snapshot failed to decode.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported snapshot schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
    #[error("entity {id} at {pos} lies outside the {width}x{height} grid")]
    EntityOutOfBounds {
        id: EntityId,
        pos: GridPos,
        width: i32,
        height: i32,
    },
    #[error("entities {first} and {second} both occupy {pos}")]
    DuplicateCell {
        first: EntityId,
        second: EntityId,
        pos: GridPos,
    },
    #[error("id counter {next_id} is not above the highest assigned id {max_id}")]
    IdCounterBehind { next_id: u32, max_id: u32 },
}

impl WorldState {
    /// Wrap this world in a versioned envelope. Deep copy; the live world
    /// keeps evolving independently.
    pub fn to_portable(&self) -> PortableWorld {
        PortableWorld {
            schema_version: SCHEMA_VERSION,
            world: self.clone(),
        }
    }

    /// Unwrap and validate a portable world.
    pub fn from_portable(portable: PortableWorld) -> Result<WorldState, SnapshotError> {
        if portable.schema_version != SCHEMA_VERSION {
            return Err(SnapshotError::SchemaVersion {
                found: portable.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        validate_world(&portable.world)?;
        Ok(portable.world)
    }
}

/// Encode a world to its JSON snapshot form.
pub fn encode(world: &WorldState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&world.to_portable())?)
}

/// Decode a JSON snapshot into a fully validated world.
pub fn decode(payload: &str) -> Result<WorldState, SnapshotError> {
    let portable: PortableWorld = serde_json::from_str(payload)?;
    WorldState::from_portable(portable)
}

fn validate_world(world: &WorldState) -> Result<(), SnapshotError> {
    let grid = world.grid();
    let mut max_id: Option<u32> = None;
    let mut occupied: Vec<(GridPos, EntityId)> = Vec::new();

    for entity in world.entities() {
        max_id = Some(max_id.map_or(entity.id.0, |m| m.max(entity.id.0)));
        if !entity.alive {
            continue;
        }
        if !grid.in_bounds(entity.pos) {
            return Err(SnapshotError::EntityOutOfBounds {
                id: entity.id,
                pos: entity.pos,
                width: grid.width,
                height: grid.height,
            });
        }
        if let Some(&(pos, first)) = occupied.iter().find(|(pos, _)| *pos == entity.pos) {
            return Err(SnapshotError::DuplicateCell {
                first,
                second: entity.id,
                pos,
            });
        }
        occupied.push((entity.pos, entity.id));
    }

    if let Some(max_id) = max_id {
        if world.next_id() <= max_id {
            return Err(SnapshotError::IdCounterBehind {
                next_id: world.next_id(),
                max_id,
            });
        }
    }

    Ok(())
}
