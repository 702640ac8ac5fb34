//! The per-boat command and sensor surface that missions and controllers drive.
//!
//! The simulation implements [`Helm`] over a live boat for the duration of
//! one decision step. Commands clamp silently to physical limits; the last
//! command of each family issued in a tick wins.

use glam::DVec2;
use gunboat_core::contact::ContactTable;
use gunboat_core::resource::ResourceCache;
use gunboat_core::types::{
    direction_to_heading, heading_to_direction, local_to_world_direction, normalize_azimuth,
    normalize_heading, world_to_local_direction, FactionId,
};

pub trait Helm {
    // --- Identity and clock ---
    fn name(&self) -> &str;
    fn faction(&self) -> Option<FactionId>;
    /// Simulation time in seconds.
    fn now(&self) -> f64;
    /// Length of the current frame in seconds.
    fn dt(&self) -> f64;
    /// Time of this boat's most recent kill, if any.
    fn last_kill_time(&self) -> Option<f64>;

    // --- Resources ---
    fn health(&self) -> &ResourceCache;
    fn energy(&self) -> &ResourceCache;

    // --- Hull ---
    fn position(&self) -> DVec2;
    /// Degrees clockwise from north, `[0, 360)`.
    fn heading(&self) -> f64;
    fn velocity(&self) -> DVec2;

    // --- Gun ---
    fn gun_position(&self) -> DVec2;
    /// Actual (servo-tracked) gun azimuth relative to the hull.
    fn gun_azimuth(&self) -> f64;

    // --- Radar ---
    fn radar_position(&self) -> DVec2;
    /// Actual radar azimuth relative to the hull.
    fn radar_azimuth(&self) -> f64;
    /// Current detection range. Shrinks as the radar spins faster.
    fn radar_range(&self) -> f64;
    fn contacts(&self) -> &ContactTable;
    fn contacts_mut(&mut self) -> &mut ContactTable;

    // --- Commands ---
    fn set_heading(&mut self, heading: f64);
    fn set_rudder(&mut self, rudder: f64);
    fn set_thrust(&mut self, forward: f64, lateral: f64);
    fn set_gun_azimuth(&mut self, azimuth: f64);
    /// Spin the radar continuously. Positive is clockwise.
    fn set_radar_rotation_speed(&mut self, rpm: f64);
    /// Hold the radar at an azimuth relative to the hull.
    fn set_radar_azimuth(&mut self, azimuth: f64);
    /// Hold the radar at an absolute heading.
    fn set_radar_heading(&mut self, heading: f64);
    /// Fire the main gun. Returns false without side effects if the gun is
    /// cooling down or the energy is not available.
    fn fire(&mut self, energy: f64) -> bool;
    /// Fire a spread of low-energy fragments.
    fn fire_shotgun(&mut self, fragments: u32) -> bool;
    fn self_destruct(&mut self);

    // --- Derived ---
    fn health_fraction(&self) -> f64 {
        self.health().fraction()
    }

    fn energy_fraction(&self) -> f64 {
        self.energy().fraction()
    }

    fn forward(&self) -> DVec2 {
        heading_to_direction(self.heading())
    }

    fn gun_heading(&self) -> f64 {
        normalize_heading(self.heading() + self.gun_azimuth())
    }

    fn radar_heading(&self) -> f64 {
        normalize_heading(self.heading() + self.radar_azimuth())
    }

    /// Azimuth of a world direction relative to the hull, `(-180, 180]`.
    fn direction_to_azimuth(&self, direction: DVec2) -> f64 {
        normalize_azimuth(direction_to_heading(direction) - self.heading())
    }

    fn azimuth_to_direction(&self, azimuth: f64) -> DVec2 {
        heading_to_direction(azimuth + self.heading())
    }

    /// World position expressed in the body frame (`x` right, `y` forward).
    fn world_to_local_position(&self, world: DVec2) -> DVec2 {
        world_to_local_direction(self.heading(), world - self.position())
    }

    fn local_to_world_position(&self, local: DVec2) -> DVec2 {
        self.position() + local_to_world_direction(self.heading(), local)
    }
}
