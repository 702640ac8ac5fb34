//! Decision layer for gunboat agents.
//!
//! Missions, the mission arbitrator, shared gunnery and the closed set of
//! agent controllers. Everything here drives a boat through the [`Helm`]
//! trait and has no ECS dependency.

pub mod arbitrator;
pub mod controllers;
pub mod error;
pub mod gunnery;
pub mod helm;
pub mod mission;
pub mod missions;

pub use gunboat_core as core;

pub use arbitrator::MissionArbitrator;
pub use controllers::registry::{AgentProfile, SpawnContext};
pub use controllers::Controller;
pub use error::ControlFault;
pub use helm::Helm;
pub use mission::{Mission, MissionStatus};

#[cfg(test)]
mod tests;
