//! Fundamental geometric and simulation types.
//!
//! The arena is planar. Headings are degrees clockwise from +Y ("north"),
//! in `[0, 360)`. Azimuths are degrees relative to a boat's own heading,
//! in `(-180, 180]`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * self.dt();
    }

    /// True on the ticks where the once-per-second work runs (tick 0 included).
    pub fn is_decision_tick(&self) -> bool {
        self.tick % crate::constants::TICK_RATE as u64 == 0
    }
}

/// Faction identifier. Boats sharing a faction never target or damage each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub u32);

/// Converts a direction to a heading in `[0, 360)`. A zero vector maps to 0.
pub fn direction_to_heading(direction: DVec2) -> f64 {
    if direction.length_squared() == 0.0 || !direction.is_finite() {
        return 0.0;
    }
    normalize_heading(direction.x.atan2(direction.y).to_degrees())
}

/// Converts a heading in degrees to a unit direction.
pub fn heading_to_direction(heading: f64) -> DVec2 {
    let radians = heading.to_radians();
    DVec2::new(radians.sin(), radians.cos())
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wraps any angle into `(-180, 180]`.
pub fn normalize_azimuth(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = normalize_heading(degrees + 180.0) - 180.0;
    if wrapped <= -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `current` to `target`, in `(-180, 180]`.
pub fn delta_angle(current: f64, target: f64) -> f64 {
    normalize_azimuth(target - current)
}

/// Unit vector pointing to the right of a heading.
pub fn heading_to_right(heading: f64) -> DVec2 {
    let radians = heading.to_radians();
    DVec2::new(radians.cos(), -radians.sin())
}

/// Rotates a body-frame vector (`x` = right, `y` = forward) into the world frame.
pub fn local_to_world_direction(heading: f64, local: DVec2) -> DVec2 {
    heading_to_right(heading) * local.x + heading_to_direction(heading) * local.y
}

/// Rotates a world-frame vector into the body frame (`x` = right, `y` = forward).
pub fn world_to_local_direction(heading: f64, world: DVec2) -> DVec2 {
    DVec2::new(
        world.dot(heading_to_right(heading)),
        world.dot(heading_to_direction(heading)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_headings() {
        assert!((direction_to_heading(DVec2::new(0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((direction_to_heading(DVec2::new(1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((direction_to_heading(DVec2::new(0.0, -1.0)) - 180.0).abs() < 1e-9);
        assert!((direction_to_heading(DVec2::new(-1.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_local_world_round_trip_axes() {
        let heading = 90.0;
        let world = local_to_world_direction(heading, DVec2::new(0.0, 1.0));
        assert!((world - DVec2::new(1.0, 0.0)).length() < 1e-9, "forward at 90° is east");
        let right = local_to_world_direction(heading, DVec2::new(1.0, 0.0));
        assert!((right - DVec2::new(0.0, -1.0)).length() < 1e-9, "right at 90° is south");
        let back = world_to_local_direction(heading, DVec2::new(1.0, 0.0));
        assert!((back - DVec2::new(0.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_delta_angle_shortest_path() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-9);
        assert!((delta_angle(0.0, 180.0) - 180.0).abs() < 1e-9);
    }
}
