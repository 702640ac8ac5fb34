//! Boat driven by a virtual controller.

use gunboat_core::commands::PadState;
use gunboat_core::constants::GUN_AZIMUTH_LIMIT;
use gunboat_core::enums::AgentKind;

use super::Controller;
use crate::error::ControlFault;
use crate::helm::Helm;

/// Stick deflection below which steering and gun slew are ignored.
const STICK_THRESHOLD: f64 = 0.5;
const TRIGGER_THRESHOLD: f64 = 0.5;
/// Stick gain on rudder and thrust (saturates well before full deflection).
const STICK_GAIN: f64 = 4.0;
/// Gun slew at full right-stick deflection (deg/s).
const GUN_SLEW_RATE: f64 = 90.0;
const SHOT_ENERGY: f64 = 1.0;
const SHOTGUN_FRAGMENTS: u32 = 5;

pub struct PlayerController {
    pad: Option<usize>,
    input: PadState,
    gun_target: f64,
}

impl PlayerController {
    pub fn new(pad: Option<usize>) -> Self {
        Self {
            pad,
            input: PadState::default(),
            gun_target: 0.0,
        }
    }
}

impl Controller for PlayerController {
    fn kind(&self) -> AgentKind {
        AgentKind::Player
    }

    fn update(&mut self, helm: &mut dyn Helm) -> Result<(), ControlFault> {
        if self.pad.is_none() {
            return Ok(());
        }
        let input = self.input;

        let (steer, throttle) = input.left_axis;
        let rudder = if steer.abs() > STICK_THRESHOLD {
            steer * STICK_GAIN
        } else {
            0.0
        };
        helm.set_rudder(rudder);
        helm.set_thrust(throttle * STICK_GAIN, 0.0);

        let slew = input.right_axis.0;
        if slew.abs() > STICK_THRESHOLD {
            self.gun_target = (self.gun_target + slew * GUN_SLEW_RATE * helm.dt())
                .clamp(-GUN_AZIMUTH_LIMIT, GUN_AZIMUTH_LIMIT);
            helm.set_gun_azimuth(self.gun_target);
        }

        if input.right_trigger > TRIGGER_THRESHOLD {
            helm.fire(SHOT_ENERGY);
        }
        if input.left_trigger > TRIGGER_THRESHOLD {
            helm.fire_shotgun(SHOTGUN_FRAGMENTS);
        }
        Ok(())
    }

    fn on_input(&mut self, pad: &PadState) {
        self.input = pad.sanitized();
    }

    fn on_killed(&mut self, _killer: Option<&str>) {
        self.input = PadState::default();
    }

    fn pad(&self) -> Option<usize> {
        self.pad
    }
}
