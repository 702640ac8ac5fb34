//! [`Helm`] over a live boat's components for one decision step.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use gunboat_ai::{Controller, Helm};
use gunboat_core::components::{Body, Boat, Controls, Gun, Radar};
use gunboat_core::constants::*;
use gunboat_core::contact::ContactTable;
use gunboat_core::enums::{RadarMode, SteeringMode};
use gunboat_core::resource::ResourceCache;
use gunboat_core::types::{heading_to_direction, normalize_azimuth, normalize_heading, FactionId};

use crate::pilot::Pilot;
use crate::systems::sensors::radar_range;

/// A shot accepted by the gun, turned into projectiles after the decision step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub shooter: Entity,
    /// Energy carried by each round.
    pub energy: f64,
    pub rounds: u32,
    /// Scatter each round with a Gaussian angular error.
    pub spread: bool,
}

/// Borrowed view of one boat. Hull state is read-only; commands write the
/// control components and queue fire orders.
pub struct BoatHandle<'a> {
    pub entity: Entity,
    pub now: f64,
    pub body: &'a Body,
    pub boat: &'a mut Boat,
    pub controls: &'a mut Controls,
    pub gun: &'a mut Gun,
    pub radar: &'a mut Radar,
    pub orders: &'a mut Vec<FireOrder>,
}

impl BoatHandle<'_> {
    fn finite(&self, what: &'static str, value: f64) -> Option<f64> {
        if value.is_finite() {
            Some(value)
        } else {
            debug!(boat = %self.boat.name, what, value, "ignoring non-finite command");
            None
        }
    }
}

impl Helm for BoatHandle<'_> {
    fn name(&self) -> &str {
        &self.boat.name
    }

    fn faction(&self) -> Option<FactionId> {
        self.boat.faction
    }

    fn now(&self) -> f64 {
        self.now
    }

    fn dt(&self) -> f64 {
        DT
    }

    fn last_kill_time(&self) -> Option<f64> {
        self.boat.last_kill_at
    }

    fn health(&self) -> &ResourceCache {
        &self.boat.health
    }

    fn energy(&self) -> &ResourceCache {
        &self.boat.energy
    }

    fn position(&self) -> DVec2 {
        self.body.position
    }

    fn heading(&self) -> f64 {
        self.body.heading
    }

    fn velocity(&self) -> DVec2 {
        self.body.velocity
    }

    fn gun_position(&self) -> DVec2 {
        self.body.position + heading_to_direction(self.body.heading) * GUN_OFFSET
    }

    fn gun_azimuth(&self) -> f64 {
        self.gun.servo.angle
    }

    fn radar_position(&self) -> DVec2 {
        self.body.position + heading_to_direction(self.body.heading) * RADAR_OFFSET
    }

    fn radar_azimuth(&self) -> f64 {
        self.radar.servo.angle
    }

    fn radar_range(&self) -> f64 {
        radar_range(self.radar.servo.velocity)
    }

    fn contacts(&self) -> &ContactTable {
        &self.radar.contacts
    }

    fn contacts_mut(&mut self) -> &mut ContactTable {
        &mut self.radar.contacts
    }

    fn set_heading(&mut self, heading: f64) {
        if let Some(heading) = self.finite("heading", heading) {
            self.controls.steering = SteeringMode::Heading;
            self.controls.target_heading = normalize_heading(heading);
        }
    }

    fn set_rudder(&mut self, rudder: f64) {
        if let Some(rudder) = self.finite("rudder", rudder) {
            self.controls.steering = SteeringMode::Rudder;
            self.controls.rudder = rudder.clamp(-1.0, 1.0);
        }
    }

    fn set_thrust(&mut self, forward: f64, lateral: f64) {
        if let (Some(forward), Some(lateral)) = (
            self.finite("forward thrust", forward),
            self.finite("lateral thrust", lateral),
        ) {
            self.controls.thrust = DVec2::new(lateral.clamp(-1.0, 1.0), forward.clamp(-1.0, 1.0));
        }
    }

    fn set_gun_azimuth(&mut self, azimuth: f64) {
        if let Some(azimuth) = self.finite("gun azimuth", azimuth) {
            self.gun.command = normalize_azimuth(azimuth).clamp(-GUN_AZIMUTH_LIMIT, GUN_AZIMUTH_LIMIT);
        }
    }

    fn set_radar_rotation_speed(&mut self, rpm: f64) {
        if let Some(rpm) = self.finite("radar rpm", rpm) {
            self.radar.mode = RadarMode::ContinuousSweep;
            self.radar.command = (rpm * RADAR_DEG_PER_RPM)
                .clamp(-RADAR_MAX_ANGULAR_VELOCITY, RADAR_MAX_ANGULAR_VELOCITY);
        }
    }

    fn set_radar_azimuth(&mut self, azimuth: f64) {
        if let Some(azimuth) = self.finite("radar azimuth", azimuth) {
            self.radar.mode = RadarMode::RelativeAzimuth;
            self.radar.command = normalize_azimuth(azimuth);
        }
    }

    fn set_radar_heading(&mut self, heading: f64) {
        if let Some(heading) = self.finite("radar heading", heading) {
            self.radar.mode = RadarMode::AbsoluteHeading;
            self.radar.command = normalize_heading(heading);
        }
    }

    fn fire(&mut self, energy: f64) -> bool {
        let Some(energy) = self.finite("fire energy", energy) else {
            return false;
        };
        let energy = energy.clamp(FIRE_ENERGY_MIN, FIRE_ENERGY_MAX);
        if self.now < self.gun.next_fire_at || !self.boat.energy.try_take(energy) {
            return false;
        }
        self.gun.next_fire_at = self.now + FIRE_BASE_DELAY * energy.sqrt();
        self.orders.push(FireOrder {
            shooter: self.entity,
            energy,
            rounds: 1,
            spread: false,
        });
        true
    }

    fn fire_shotgun(&mut self, fragments: u32) -> bool {
        let fragments = fragments.clamp(SHOTGUN_MIN_FRAGMENTS, SHOTGUN_MAX_FRAGMENTS);
        let cost = f64::from(fragments) * SHOTGUN_FRAGMENT_ENERGY;
        if self.now < self.gun.next_shotgun_at || !self.boat.energy.try_take(cost) {
            return false;
        }
        self.gun.next_shotgun_at = self.now + SHOTGUN_DELAY_PER_FRAGMENT * f64::from(fragments);
        self.orders.push(FireOrder {
            shooter: self.entity,
            energy: SHOTGUN_FRAGMENT_ENERGY,
            rounds: fragments,
            spread: true,
        });
        true
    }

    fn self_destruct(&mut self) {
        self.boat.self_destruct = true;
    }
}

/// Runs `f` with the controller and a handle over one boat.
///
/// Returns `None` if `entity` is not a live boat.
pub fn with_pilot<R>(
    world: &mut World,
    entity: Entity,
    now: f64,
    orders: &mut Vec<FireOrder>,
    f: impl FnOnce(&mut dyn Controller, &mut BoatHandle<'_>) -> R,
) -> Option<R> {
    let (body, boat, controls, gun, radar, pilot) = world
        .query_one_mut::<(&Body, &mut Boat, &mut Controls, &mut Gun, &mut Radar, &mut Pilot)>(
            entity,
        )
        .ok()?;
    let mut handle = BoatHandle {
        entity,
        now,
        body,
        boat,
        controls,
        gun,
        radar,
        orders,
    };
    Some(f(pilot.controller.as_mut(), &mut handle))
}
