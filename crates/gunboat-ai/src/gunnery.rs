//! Shared gun-laying helpers: intercept prediction, aim tolerance and burst fire.

use glam::DVec2;
use gunboat_core::constants::MUZZLE_VELOCITY;
use gunboat_core::contact::TargetContact;

use crate::helm::Helm;

/// Predicted firing solution against a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptSolution {
    /// Contact position extrapolated to now.
    pub estimated_position: DVec2,
    /// Range from the gun to the estimated position.
    pub distance: f64,
    /// Flight time of a round over `distance`.
    pub intercept_time: f64,
    /// Where the contact will be when the round arrives.
    pub intercept_position: DVec2,
    /// Point to lay the gun on. Rounds inherit the shooter's velocity, so the
    /// shooter's own drift over the flight time is subtracted.
    pub aim_point: DVec2,
}

/// Solves a single-step lead against `contact` for a gun at `gun_position`
/// moving with `own_velocity`.
pub fn solve_intercept(
    contact: &TargetContact,
    now: f64,
    gun_position: DVec2,
    own_velocity: DVec2,
) -> InterceptSolution {
    let estimated_position = contact.estimated_position(now);
    let distance = estimated_position.distance(gun_position);
    let intercept_time = distance / MUZZLE_VELOCITY;
    let intercept_position = estimated_position + contact.velocity * intercept_time;
    InterceptSolution {
        estimated_position,
        distance,
        intercept_time,
        intercept_position,
        aim_point: intercept_position - own_velocity * intercept_time,
    }
}

/// Angular aim tolerance in degrees for a linear tolerance `k` metres at `distance`.
///
/// Tightens with range. Zero or negative distance allows any aim.
pub fn aim_margin(k: f64, distance: f64) -> f64 {
    if distance <= 0.0 {
        return 90.0;
    }
    (k / distance).atan().to_degrees()
}

/// Shotgun fragment count for the range bands used at close quarters.
pub fn shotgun_fragments_for_range(distance: f64) -> Option<u32> {
    if distance < 100.0 {
        Some(15)
    } else if distance < 200.0 {
        Some(10)
    } else if distance < 400.0 {
        Some(5)
    } else {
        None
    }
}

/// Two cheap rounds screen each full-energy round against incoming fire.
///
/// The counter only advances on shots that actually left the barrel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BurstFire {
    round: u8,
}

impl BurstFire {
    const SCREEN_ROUNDS: u8 = 2;

    /// Fires the next round of the pattern. `full_energy` is used for the
    /// committed round. Returns whether anything was fired.
    pub fn fire(&mut self, helm: &mut dyn Helm, full_energy: f64) -> bool {
        if self.round < Self::SCREEN_ROUNDS {
            if helm.fire(0.0) {
                self.round += 1;
                return true;
            }
            false
        } else if helm.fire(full_energy) {
            self.round = 0;
            true
        } else {
            false
        }
    }

    /// True when the next shot is the committed one.
    pub fn is_committed_next(&self) -> bool {
        self.round >= Self::SCREEN_ROUNDS
    }

    pub fn reset(&mut self) {
        self.round = 0;
    }
}
