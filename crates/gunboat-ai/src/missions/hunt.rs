//! Hunt: pick the most threatening hostile boat, close to standoff range and
//! engage it with burst fire and the shotgun.

use gunboat_core::contact::ContactId;
use gunboat_core::math::smooth_clamp;
use gunboat_core::types::{delta_angle, direction_to_heading};

use super::search_origin;
use crate::gunnery::{aim_margin, shotgun_fragments_for_range, solve_intercept, BurstFire};
use crate::helm::Helm;
use crate::mission::{Mission, MissionStatus};

/// Distance the hunter tries to hold from its target (m).
const APPROACH_DISTANCE: f64 = 80.0;
/// Linear aim tolerance at the target (m).
const AIM_TOLERANCE: f64 = 1.0;
/// Seconds of lookahead when ranking threats.
const THREAT_LOOKAHEAD: f64 = 3.0;
/// Squared range at which a threat stops counting (m²).
const THREAT_RANGE_SQ: f64 = 1_000_000.0;
/// Range at which the nearest-target term reaches zero (m).
const NEAREST_RANGE: f64 = 1_000.0;

const HUNGER_WEIGHT: f64 = 0.3;
const THREAT_WEIGHT: f64 = 0.2;
const NEAREST_WEIGHT: f64 = 0.6;

/// Radar wobble frequency around the target bearing (rad/s).
const RADAR_WOBBLE_RATE: f64 = 15.0;
const RADAR_WOBBLE_MAX: f64 = 45.0;

pub struct HuntMission {
    target: Option<ContactId>,
    burst: BurstFire,
    acquired_at: f64,
}

impl Default for HuntMission {
    fn default() -> Self {
        Self::new()
    }
}

impl HuntMission {
    pub fn new() -> Self {
        Self {
            target: None,
            burst: BurstFire::default(),
            acquired_at: f64::NEG_INFINITY,
        }
    }

    pub fn target(&self) -> Option<ContactId> {
        self.target
    }

    /// Ranks hostile boats by threat, selects the worst as the target and
    /// returns the summed threat level.
    fn update_targets(&mut self, helm: &dyn Helm) -> f64 {
        let now = helm.now();
        let origin = search_origin(helm);
        let own_faction = helm.faction();

        if let Some(id) = self.target {
            if helm.contacts().get_valid(id).is_none() {
                self.target = None;
            }
        }

        let mut general_threat = 0.0;
        let mut worst: Option<(ContactId, f64)> = None;
        for contact in helm.contacts().valid() {
            if !contact.kind.is_boat() || !contact.is_hostile_to(own_faction) {
                continue;
            }
            let future = contact.projected_position(now, THREAT_LOOKAHEAD);
            let threat = (1.0 - future.distance_squared(origin) / THREAT_RANGE_SQ).clamp(0.0, 1.0);
            general_threat += threat;
            if worst.map_or(true, |(_, t)| threat > t) {
                worst = Some((contact.id, threat));
            }
        }
        if let Some((id, _)) = worst {
            self.target = Some(id);
        }
        general_threat
    }

    /// Re-checks the current target, steering the radar onto it. Returns
    /// false if there is nothing worth pursuing.
    fn confirm_target(&mut self, helm: &mut dyn Helm) -> bool {
        let tracked = self
            .target
            .is_some_and(|id| helm.contacts().get_valid(id).is_some());
        if !tracked {
            self.update_targets(&*helm);
        }
        let Some(id) = self.target else {
            return false;
        };
        let Some(contact) = helm.contacts().get_valid(id).cloned() else {
            self.target = None;
            return false;
        };

        let now = helm.now();
        let relative = contact.estimated_position(now) - helm.radar_position();
        let distance = relative.length().max(f64::EPSILON);
        let age = contact.age(now);
        let margin = ((age * 10.0 / distance).atan().to_degrees() + 10.0).clamp(0.0, RADAR_WOBBLE_MAX);
        let radar_heading = direction_to_heading(relative) + (now * RADAR_WOBBLE_RATE).sin() * margin;
        helm.set_radar_heading(radar_heading);

        if contact.observed_at > self.acquired_at {
            let looking = delta_angle(helm.radar_heading(), radar_heading).abs() < 1.0;
            if (looking && age > 0.25) || age > 1.0 {
                helm.contacts_mut().invalidate(id);
                self.target = None;
                self.update_targets(&*helm);
                return false;
            }
        }
        true
    }

    fn prosecute(&mut self, helm: &mut dyn Helm) {
        let Some(contact) = self.target.and_then(|id| helm.contacts().get_valid(id).cloned()) else {
            return;
        };
        let solution = solve_intercept(&contact, helm.now(), helm.gun_position(), helm.velocity());

        let intercept_azimuth = helm.direction_to_azimuth(solution.aim_point - helm.gun_position());
        helm.set_rudder(intercept_azimuth / 5.0);
        let mut local = helm.world_to_local_position(solution.aim_point);
        local.y -= APPROACH_DISTANCE;
        helm.set_thrust(local.y, local.x);
        helm.set_gun_azimuth(intercept_azimuth);

        let aim_error = delta_angle(helm.gun_azimuth(), intercept_azimuth).abs();
        if aim_error < aim_margin(AIM_TOLERANCE, solution.distance) {
            if let Some(fragments) = shotgun_fragments_for_range(solution.distance) {
                helm.fire_shotgun(fragments);
            }
            let full = helm.energy().stored();
            self.burst.fire(helm, full);
        }
    }
}

impl Mission for HuntMission {
    fn name(&self) -> &'static str {
        "Hunt"
    }

    fn compute_priority(&mut self, helm: &dyn Helm) -> f64 {
        let now = helm.now();
        let since_kill = helm
            .last_kill_time()
            .map_or(f64::INFINITY, |t| now - t);
        let hunger = smooth_clamp((since_kill - 10.0) / 10.0 + 0.5);
        let general_threat = self.update_targets(helm);

        let Some(contact) = self.target.and_then(|id| helm.contacts().get_valid(id)) else {
            return 0.0;
        };
        let distance = contact.estimated_position(now).distance(helm.position());
        let nearest = smooth_clamp(1.0 - distance / NEAREST_RANGE);

        HUNGER_WEIGHT * hunger + THREAT_WEIGHT * general_threat + NEAREST_WEIGHT * nearest
    }

    fn update(&mut self, helm: &mut dyn Helm) -> MissionStatus {
        if !self.confirm_target(helm) {
            return MissionStatus::Abort;
        }
        self.prosecute(helm);
        MissionStatus::Continue
    }

    fn on_acquired_priority(&mut self, helm: &mut dyn Helm) {
        self.acquired_at = helm.now();
    }

    fn on_lost_priority(&mut self, _helm: &mut dyn Helm) {
        self.target = None;
        self.burst.reset();
    }
}
