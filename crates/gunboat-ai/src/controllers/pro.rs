//! Fast radar, chases the nearest boat and keeps a steady stream of 1-energy rounds on it.

use glam::DVec2;
use gunboat_core::contact::TargetContact;
use gunboat_core::enums::AgentKind;
use gunboat_core::types::direction_to_heading;

use super::Controller;
use crate::error::{ensure_finite, ControlFault};
use crate::helm::Helm;

const INITIAL_GUN_AZIMUTH: f64 = 120.0;
const RADAR_RPM: f64 = 1000.0;
const STANDOFF: f64 = 25.0;
const SHOT_ENERGY: f64 = 1.0;
const MAX_CONTACT_AGE: f64 = 1.5;

pub struct ProController;

impl Default for ProController {
    fn default() -> Self {
        Self::new()
    }
}

impl ProController {
    pub fn new() -> Self {
        Self
    }
}

impl Controller for ProController {
    fn kind(&self) -> AgentKind {
        AgentKind::Pro
    }

    fn is_stale(&self, contact: &TargetContact, now: f64) -> bool {
        contact.age(now) > MAX_CONTACT_AGE
    }

    fn start(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        helm.set_gun_azimuth(INITIAL_GUN_AZIMUTH);
        helm.set_radar_rotation_speed(RADAR_RPM);
        Ok(())
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        let now = helm.now();
        let target = helm
            .contacts()
            .nearest(helm.position(), now, |c| c.kind.is_boat())
            .map(|c| c.estimated_position(now));

        // With nothing in sight, head home to the origin.
        let destination = match target {
            Some(position) => {
                let azimuth = ensure_finite(
                    "pro gun azimuth",
                    helm.direction_to_azimuth(position - helm.position()),
                )?;
                helm.set_gun_azimuth(azimuth);
                helm.fire(SHOT_ENERGY);
                position
            }
            None => DVec2::ZERO,
        };

        helm.set_heading(direction_to_heading(destination - helm.position()));
        let local = helm.world_to_local_position(destination);
        helm.set_thrust(local.y - STANDOFF, local.x);
        Ok(())
    }
}
