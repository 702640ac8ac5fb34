//! Agent controllers: the closed set of behaviours a boat can be driven by.

pub mod hunter;
pub mod player;
pub mod pro;
pub mod registry;
pub mod sitting_duck;
pub mod sniper;
pub mod spin;
pub mod vengeful;

use gunboat_core::commands::PadState;
use gunboat_core::constants::{BOAT_CONTACT_STALE_SECS, POWERUP_CONTACT_STALE_SECS};
use gunboat_core::contact::TargetContact;
use gunboat_core::enums::{AgentKind, ContactKind};
use gunboat_core::types::FactionId;

use crate::error::ControlFault;
use crate::helm::Helm;

/// Drives one boat. The simulation calls `update` every frame and `update1`
/// once per second, after pruning the boat's contacts with `is_stale`.
pub trait Controller: Send + Sync {
    fn kind(&self) -> AgentKind;

    /// Radar filter: which hits enter the contact table.
    fn accepts(&self, contact: &TargetContact, own_faction: Option<FactionId>) -> bool {
        contact.is_hostile_to(own_faction)
    }

    /// Prune predicate run at 1 Hz.
    fn is_stale(&self, contact: &TargetContact, now: f64) -> bool {
        let limit = match contact.kind {
            ContactKind::Boat => BOAT_CONTACT_STALE_SECS,
            ContactKind::Powerup(_) => POWERUP_CONTACT_STALE_SECS,
        };
        contact.age(now) > limit
    }

    /// Called once when the boat spawns.
    fn start(&mut self, _helm: &mut dyn Helm) -> Result<(), ControlFault> {
        Ok(())
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault>;

    fn update1(&mut self, _helm: &mut dyn Helm) -> Result<(), ControlFault> {
        Ok(())
    }

    /// Fresh virtual-controller state for pad-driven boats.
    fn on_input(&mut self, _pad: &PadState) {}

    /// Called when the boat is destroyed, with the killer's name if any.
    fn on_killed(&mut self, _killer: Option<&str>) {}

    /// Name of the mission currently flown, for mission-driven agents.
    fn active_mission(&self) -> Option<&'static str> {
        None
    }

    /// Virtual controller slot held by this boat.
    fn pad(&self) -> Option<usize> {
        None
    }
}
