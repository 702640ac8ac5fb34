//! Commands sent from outside the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::AgentKind;

/// State of one virtual controller: two sticks and two triggers.
///
/// Axes are `(x, y)` in `[-1, 1]`, triggers in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PadState {
    pub left_axis: (f64, f64),
    pub right_axis: (f64, f64),
    pub left_trigger: f64,
    pub right_trigger: f64,
}

impl PadState {
    /// Copy with every value clamped to its range and non-finite values zeroed.
    pub fn sanitized(&self) -> Self {
        fn axis(v: f64) -> f64 {
            if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
        }
        fn trigger(v: f64) -> f64 {
            if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
        }
        Self {
            left_axis: (axis(self.left_axis.0), axis(self.left_axis.1)),
            right_axis: (axis(self.right_axis.0), axis(self.right_axis.1)),
            left_trigger: trigger(self.left_trigger),
            right_trigger: trigger(self.right_trigger),
        }
    }
}

/// All external actions on the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArenaCommand {
    /// Spawn one boat of the given kind on a free grid cell.
    SpawnBoat { kind: AgentKind },
    /// Update the state of a virtual controller slot.
    SetPadState { pad: usize, state: PadState },
    /// Destroy the boat with this display name. Counts as a death with no killer.
    SelfDestruct { name: String },
    Pause,
    Resume,
}
