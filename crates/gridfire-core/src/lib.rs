//! Core types and definitions for the GRIDFIRE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid geometry, teams, the entity model, actions, and the fog-of-war
//! observation layer. It has no dependency on the resolver pipeline or
//! any runtime framework.

pub mod actions;
pub mod entity;
pub mod grid;
pub mod observations;
pub mod types;

#[cfg(test)]
mod tests;
