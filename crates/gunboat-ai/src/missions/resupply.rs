//! Refuel and Repair: run down the nearest powerup of one kind.

use gunboat_core::contact::ContactId;
use gunboat_core::enums::{ContactKind, PowerupKind};
use gunboat_core::math::remap;

use super::search_origin;
use crate::helm::Helm;
use crate::mission::{Mission, MissionStatus};

/// Weight of the resource deficit term.
const DEFICIT_WEIGHT: f64 = 0.75;
/// Bonus for a nearby pickup, fading to zero at `PROXIMITY_RANGE`.
const PROXIMITY_BONUS: f64 = 0.25;
const PROXIMITY_RANGE: f64 = 500.0;
/// A pickup this close that has not been re-observed recently is assumed gone.
const ARRIVAL_RADIUS: f64 = 10.0;
const ARRIVAL_STALE_SECS: f64 = 1.5;
/// Radar request while resupplying: as fast as the mast allows.
const SWEEP_RPM: f64 = 100_000.0;

pub struct ResupplyMission {
    kind: PowerupKind,
    target: Option<ContactId>,
}

impl ResupplyMission {
    pub fn new(kind: PowerupKind) -> Self {
        Self { kind, target: None }
    }

    /// Tops up energy.
    pub fn refuel() -> Self {
        Self::new(PowerupKind::Energy)
    }

    /// Tops up health.
    pub fn repair() -> Self {
        Self::new(PowerupKind::Health)
    }

    pub fn target(&self) -> Option<ContactId> {
        self.target
    }

    fn fraction(&self, helm: &dyn Helm) -> f64 {
        match self.kind {
            PowerupKind::Energy => helm.energy_fraction(),
            PowerupKind::Health => helm.health_fraction(),
        }
    }

    fn update_target(&mut self, helm: &dyn Helm) {
        let wanted = ContactKind::Powerup(self.kind);
        self.target = helm
            .contacts()
            .nearest(search_origin(helm), helm.now(), |c| c.kind == wanted)
            .map(|c| c.id);
    }
}

impl Mission for ResupplyMission {
    fn name(&self) -> &'static str {
        match self.kind {
            PowerupKind::Energy => "Refuel",
            PowerupKind::Health => "Repair",
        }
    }

    fn compute_priority(&mut self, helm: &dyn Helm) -> f64 {
        self.update_target(helm);
        let Some(contact) = self.target.and_then(|id| helm.contacts().get_valid(id)) else {
            return 0.0;
        };
        let deficit = 1.0 - self.fraction(helm);
        let distance = contact.position.distance(search_origin(helm));
        DEFICIT_WEIGHT * deficit * deficit
            + remap(distance, 0.0, PROXIMITY_RANGE, PROXIMITY_BONUS, 0.0)
    }

    fn update(&mut self, helm: &mut dyn Helm) -> MissionStatus {
        let Some(contact) = self.target.and_then(|id| helm.contacts().get_valid(id).cloned()) else {
            return MissionStatus::Abort;
        };

        let now = helm.now();
        if contact.position.distance(helm.position()) < ARRIVAL_RADIUS
            && contact.age(now) > ARRIVAL_STALE_SECS
        {
            helm.contacts_mut().invalidate(contact.id);
            self.target = None;
            return MissionStatus::Abort;
        }

        let local = helm.world_to_local_position(contact.position);
        let azimuth = local.x.atan2(local.y).to_degrees();
        helm.set_rudder(azimuth);
        helm.set_thrust(local.y, local.x);
        MissionStatus::Continue
    }

    fn on_acquired_priority(&mut self, helm: &mut dyn Helm) {
        helm.set_radar_rotation_speed(SWEEP_RPM);
        helm.set_gun_azimuth(0.0);
    }

    fn on_lost_priority(&mut self, _helm: &mut dyn Helm) {
        self.target = None;
    }
}
