//! Turn resolution engine for GRIDFIRE.
//!
//! Owns the authoritative `WorldState` per match and runs the fixed
//! per-turn pipeline: cooldowns, movement, sensing, combat, victory.
//! Fully deterministic: identical seed and action sequence reproduce
//! identical results bit for bit.

pub mod engine;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use engine::CombatEngine;
pub use gridfire_core as core;
