//! ECS components for hecs entities.
//!
//! Components are plain data. Behaviour lives in the simulation systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::contact::{ContactId, ContactTable};
use crate::enums::{AgentKind, PowerupKind, RadarMode, SteeringMode};
use crate::resource::ResourceCache;
use crate::types::FactionId;

/// Planar rigid body. Heading in degrees clockwise from north, angular
/// velocity in degrees per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
    pub angular_velocity: f64,
    pub mass: f64,
    pub yaw_inertia: f64,
    pub linear_drag: f64,
    pub angular_drag: f64,
    pub radius: f64,
    /// World-frame force accumulated for the current tick (N).
    pub force: DVec2,
    /// Yaw torque accumulated for the current tick (N·m, positive clockwise).
    pub torque: f64,
}

impl Body {
    /// A gunboat hull at rest.
    pub fn boat(position: DVec2, heading: f64) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            heading,
            angular_velocity: 0.0,
            mass: BOAT_MASS,
            yaw_inertia: BOAT_YAW_INERTIA,
            linear_drag: BOAT_LINEAR_DRAG,
            angular_drag: BOAT_ANGULAR_DRAG,
            radius: BOAT_RADIUS,
            force: DVec2::ZERO,
            torque: 0.0,
        }
    }
}

/// Identity, resources and lifecycle flags of a boat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boat {
    pub name: String,
    pub kind: AgentKind,
    pub faction: Option<FactionId>,
    /// Hull and accent colours, `0xRRGGBB`.
    pub colors: (u32, u32),
    pub health: ResourceCache,
    pub energy: ResourceCache,
    pub last_kill_at: Option<f64>,
    /// Set when health runs out; the boat is removed at cleanup.
    pub destroyed: bool,
    pub killed_by: Option<Attacker>,
    pub self_destruct: bool,
}

/// Who dealt a blow, captured when the shot was fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attacker {
    pub id: ContactId,
    pub name: String,
    pub kind: AgentKind,
    pub faction: Option<FactionId>,
}

/// Most recent steering, thrust commands. Persist until overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Controls {
    pub steering: SteeringMode,
    /// Rudder deflection in `[-1, 1]`.
    pub rudder: f64,
    /// Heading tracked in `SteeringMode::Heading`.
    pub target_heading: f64,
    /// Body-frame thrust fractions: `x` lateral (right), `y` forward.
    pub thrust: DVec2,
}

/// Angle tracker state for a servo-driven mount.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ServoState {
    /// Current azimuth relative to the hull (degrees).
    pub angle: f64,
    /// Current angular velocity (degrees per second).
    pub velocity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gun {
    /// Commanded azimuth relative to the hull, within the traverse limit.
    pub command: f64,
    pub servo: ServoState,
    pub next_fire_at: f64,
    pub next_shotgun_at: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Radar {
    pub mode: RadarMode,
    /// Sweep rate (deg/s) in continuous mode, otherwise the goal angle.
    pub command: f64,
    pub servo: ServoState,
    /// Headings swept during the last tick, ordered by sweep direction.
    pub sweep_min: f64,
    pub sweep_max: f64,
    pub contacts: ContactTable,
}

/// A powerup crate floating in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PowerupKind,
    pub position: DVec2,
    /// Damage the crate absorbs before it is collected by the shooter.
    pub integrity: ResourceCache,
    /// Resource granted on collection.
    pub amount: f64,
}

impl Pickup {
    pub fn new(kind: PowerupKind, position: DVec2) -> Self {
        Self {
            kind,
            position,
            integrity: ResourceCache::full(POWERUP_HEALTH),
            amount: POWERUP_AMOUNT,
        }
    }
}

/// A round in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub source: Attacker,
    pub energy: f64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub expires_at: f64,
}
