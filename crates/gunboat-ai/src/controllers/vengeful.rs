//! Pursues only the boat that last killed one of its kind.

use glam::DVec2;
use gunboat_core::contact::TargetContact;
use gunboat_core::enums::AgentKind;
use gunboat_core::types::{delta_angle, direction_to_heading, FactionId};

use super::Controller;
use crate::error::{ensure_finite, ControlFault};
use crate::gunnery::{aim_margin, solve_intercept, BurstFire};
use crate::helm::Helm;

const MAX_TARGET_AGE: f64 = 1.0;
const PATROL_RPM: f64 = 180.0;
const STANDOFF: f64 = 100.0;
const AIM_TOLERANCE: f64 = 3.0;
const RADAR_WOBBLE_RATE: f64 = 20.0;
const RADAR_WOBBLE: f64 = 15.0;

pub struct VengefulController {
    grudge: Option<String>,
    burst: BurstFire,
}

impl VengefulController {
    pub fn new(grudge: Option<String>) -> Self {
        Self {
            grudge,
            burst: BurstFire::default(),
        }
    }

    pub fn grudge(&self) -> Option<&str> {
        self.grudge.as_deref()
    }

    fn patrol(&self, helm: &mut dyn Helm) {
        helm.set_radar_rotation_speed(PATROL_RPM);
        helm.set_heading(direction_to_heading(-helm.position()));
        let origin = helm.world_to_local_position(DVec2::ZERO);
        helm.set_thrust(origin.y, origin.x);
    }

    fn engage(&mut self, helm: &mut dyn Helm, target: &TargetContact) -> Result<(), ControlFault> {
        let now = helm.now();
        let estimated = target.estimated_position(now);
        let relative = estimated - helm.position();

        helm.set_heading(direction_to_heading(relative));
        let local = helm.world_to_local_position(estimated);
        helm.set_thrust(local.y - STANDOFF, local.x);

        let radar_bearing = direction_to_heading(estimated - helm.radar_position());
        helm.set_radar_heading(radar_bearing + (now * RADAR_WOBBLE_RATE).sin() * RADAR_WOBBLE);

        let solution = solve_intercept(target, now, helm.gun_position(), helm.velocity());
        let azimuth = ensure_finite(
            "vengeful intercept azimuth",
            helm.direction_to_azimuth(solution.aim_point - helm.gun_position()),
        )?;
        helm.set_gun_azimuth(azimuth);

        let aim_error = delta_angle(helm.gun_azimuth(), azimuth).abs();
        if aim_error < aim_margin(AIM_TOLERANCE, relative.length()) {
            if self.burst.is_committed_next() {
                let fragments = helm.energy().stored().floor() as u32;
                helm.fire_shotgun(fragments);
            }
            let full = helm.energy().stored();
            self.burst.fire(helm, full);
        }
        Ok(())
    }
}

impl Controller for VengefulController {
    fn kind(&self) -> AgentKind {
        AgentKind::Vengeful
    }

    fn accepts(&self, contact: &TargetContact, _own_faction: Option<FactionId>) -> bool {
        contact.kind.is_boat() && self.grudge.as_deref() == Some(contact.display_name.as_str())
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        let now = helm.now();
        let target = helm
            .contacts()
            .valid()
            .filter(|c| c.age(now) <= MAX_TARGET_AGE)
            .max_by(|a, b| a.observed_at.total_cmp(&b.observed_at))
            .cloned();
        match target {
            Some(target) => self.engage(helm, &target),
            None => {
                self.patrol(helm);
                Ok(())
            }
        }
    }

    fn on_killed(&mut self, killer: Option<&str>) {
        if let Some(killer) = killer {
            self.grudge = Some(killer.to_owned());
        }
    }
}
