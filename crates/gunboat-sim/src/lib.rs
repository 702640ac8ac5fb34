//! Simulation engine for the gunboat arena.
//!
//! Owns the hecs ECS world, runs systems at a fixed 50 Hz tick,
//! and produces `ArenaSnapshot`s for displays and tests.

pub mod engine;
pub mod handle;
pub mod pilot;
pub mod scoreboard;
pub mod servo;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use gunboat_ai as ai;
pub use gunboat_core as core;
