//! Circles with radar and gun locked dead ahead, firing at whatever crosses the gun line.

use gunboat_core::contact::TargetContact;
use gunboat_core::enums::{AgentKind, ContactKind, PowerupKind};
use gunboat_core::types::{delta_angle, direction_to_heading};

use super::Controller;
use crate::error::ControlFault;
use crate::helm::Helm;

/// Contacts older than this are ignored and pruned (s).
const MAX_CONTACT_AGE: f64 = 1.0;
/// Gun-line tolerance (deg).
const GUN_LINE_TOLERANCE: f64 = 0.5;

pub struct SpinController;

impl SpinController {
    /// Energy to spend on a contact crossing the gun line, if it is worth a shot.
    fn shot_energy(contact: &TargetContact, energy: f64) -> Option<f64> {
        match contact.kind {
            ContactKind::Powerup(PowerupKind::Health) if energy > 15.0 => Some(5.0),
            ContactKind::Powerup(PowerupKind::Energy) if energy < 20.0 => Some(5.0),
            ContactKind::Boat if energy > 10.0 => Some(energy * 0.25),
            _ => None,
        }
    }
}

impl Controller for SpinController {
    fn kind(&self) -> AgentKind {
        AgentKind::Spin
    }

    fn is_stale(&self, contact: &TargetContact, now: f64) -> bool {
        contact.age(now) > MAX_CONTACT_AGE
    }

    fn start(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        helm.set_radar_azimuth(0.0);
        helm.set_gun_azimuth(0.0);
        helm.set_thrust(1.0, 0.0);
        helm.set_rudder(1.0);
        Ok(())
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        let now = helm.now();
        let gun_position = helm.gun_position();
        let gun_heading = helm.gun_heading();
        let energy = helm.energy().stored();

        let shot = helm
            .contacts()
            .valid()
            .filter(|c| c.age(now) <= MAX_CONTACT_AGE)
            .filter(|c| {
                let bearing = direction_to_heading(c.estimated_position(now) - gun_position);
                delta_angle(gun_heading, bearing).abs() < GUN_LINE_TOLERANCE
            })
            .find_map(|c| Self::shot_energy(c, energy));

        if let Some(energy) = shot {
            helm.fire(energy);
        }
        Ok(())
    }
}
