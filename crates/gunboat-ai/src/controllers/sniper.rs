//! Holds a corner of the arena facing the centre and picks boats off at range.
//!
//! Boats it has already fired on go to the back of the queue, so fresh
//! targets are preferred. Vengeful boats are left alone.

use glam::DVec2;
use gunboat_core::contact::{ContactId, TargetContact};
use gunboat_core::enums::AgentKind;
use gunboat_core::types::{delta_angle, direction_to_heading};

use super::registry;
use super::Controller;
use crate::error::{ensure_finite, ControlFault};
use crate::gunnery::{aim_margin, solve_intercept};
use crate::helm::Helm;

/// Station distance from the origin along each axis (m).
const CORNER_OFFSET: f64 = 115.0;
/// Inside this radius the sniper drives outward instead of station-keeping.
const INNER_RADIUS: f64 = 100.0;
/// Radar sweep half-width (deg) and rate (rpm).
const SWEEP_HALF_WIDTH: f64 = 45.0;
const SWEEP_RPM: f64 = 60.0;
const AIM_TOLERANCE: f64 = 3.0;
const MAX_SHOT_ENERGY: f64 = 5.0;
const POINT_BLANK: f64 = 100.0;
const MAX_FRAGMENTS: u32 = 15;
/// All contacts go stale after this long (s).
const MAX_CONTACT_AGE: f64 = 3.0;

pub struct SniperController {
    victims: Vec<ContactId>,
    radar_direction: f64,
}

impl Default for SniperController {
    fn default() -> Self {
        Self::new()
    }
}

impl SniperController {
    pub fn new() -> Self {
        Self {
            victims: Vec::new(),
            radar_direction: 1.0,
        }
    }

    pub fn victims(&self) -> &[ContactId] {
        &self.victims
    }

    fn is_quarry(contact: &TargetContact) -> bool {
        let vengeful = registry::display_name(AgentKind::Vengeful);
        contact.valid && contact.kind.is_boat() && !contact.display_name.contains(vengeful.as_str())
    }

    /// Nearest quarry to the gun, preferring boats not yet fired upon.
    fn select_target(&self, helm: &dyn Helm) -> Option<TargetContact> {
        let now = helm.now();
        let gun = helm.gun_position();
        let by_range = |c: &&TargetContact| c.estimated_position(now).distance_squared(gun);
        let nearest = |fresh: bool| {
            helm.contacts()
                .iter()
                .filter(|c| Self::is_quarry(c))
                .filter(|c| self.victims.contains(&c.id) != fresh)
                .min_by(|a, b| by_range(a).total_cmp(&by_range(b)))
                .cloned()
        };
        nearest(true).or_else(|| nearest(false))
    }

    fn keep_station(&self, helm: &mut dyn Helm) {
        let position = helm.position();
        let quadrant = ((direction_to_heading(position) / 90.0).floor() + 0.5) * 90.0;
        if position.length() < INNER_RADIUS {
            helm.set_thrust(1.0, 0.0);
            helm.set_heading(quadrant);
        } else {
            let corner = DVec2::new(position.x.signum(), position.y.signum()) * CORNER_OFFSET;
            let local = helm.world_to_local_position(corner) / 10.0;
            helm.set_thrust(local.y, local.x);
            helm.set_heading(quadrant - 180.0);
        }
    }

    fn sweep_radar(&mut self, helm: &mut dyn Helm) {
        let azimuth = helm.radar_azimuth();
        if self.radar_direction > 0.0 && azimuth > SWEEP_HALF_WIDTH {
            self.radar_direction = -1.0;
            helm.set_radar_rotation_speed(-SWEEP_RPM);
        } else if self.radar_direction < 0.0 && azimuth < -SWEEP_HALF_WIDTH {
            self.radar_direction = 1.0;
            helm.set_radar_rotation_speed(SWEEP_RPM);
        }
    }

    fn mark_victim(&mut self, id: ContactId) {
        self.victims.retain(|v| *v != id);
        self.victims.push(id);
    }
}

impl Controller for SniperController {
    fn kind(&self) -> AgentKind {
        AgentKind::Sniper
    }

    fn is_stale(&self, contact: &TargetContact, now: f64) -> bool {
        contact.age(now) > MAX_CONTACT_AGE
    }

    fn start(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        helm.set_radar_rotation_speed(SWEEP_RPM);
        Ok(())
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        self.keep_station(helm);
        self.sweep_radar(helm);

        let Some(target) = self.select_target(&*helm) else {
            return Ok(());
        };
        let solution = solve_intercept(&target, helm.now(), helm.gun_position(), helm.velocity());
        let azimuth = ensure_finite(
            "sniper intercept azimuth",
            helm.direction_to_azimuth(solution.aim_point - helm.gun_position()),
        )?;
        helm.set_gun_azimuth(azimuth);

        let aim_error = delta_angle(helm.gun_azimuth(), azimuth).abs();
        if aim_error < aim_margin(AIM_TOLERANCE, solution.distance) {
            let energy = helm.energy().stored();
            if helm.fire(energy.min(MAX_SHOT_ENERGY)) {
                self.mark_victim(target.id);
            }
            if solution.distance < POINT_BLANK {
                let fragments = (helm.energy().stored().floor() as u32).min(MAX_FRAGMENTS);
                helm.fire_shotgun(fragments);
            }
        }
        Ok(())
    }

    fn update1(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        let contacts = helm.contacts();
        self.victims.retain(|id| contacts.contains(*id));
        Ok(())
    }
}
