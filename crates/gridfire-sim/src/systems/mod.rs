//! Resolvers that operate on the world state each turn.
//!
//! Each resolver is invoked exactly once per turn, in the fixed pipeline
//! order: movement, sensing, combat, victory. Resolvers own no state of
//! their own; everything lives in `WorldState`.

pub mod combat;
pub mod movement;
pub mod sensors;
pub mod victory;
