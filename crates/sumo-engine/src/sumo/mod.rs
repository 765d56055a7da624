//! The sumo game built on the engine: arena, shared torso, ragdolls, scoring.

pub mod arena;
pub mod collision;
pub mod game;
pub mod ragdoll;
pub mod torso;
