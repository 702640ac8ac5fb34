//! Events emitted by the simulation.
//!
//! Events are collected in a per-tick outbox and drained into the snapshot
//! once the tick's mutations are complete.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AgentKind, PowerupKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    BoatSpawned {
        name: String,
        kind: AgentKind,
        position: DVec2,
    },
    /// A boat's health was depleted. `killer` is `None` when the damage had no live source.
    BoatKilled {
        victim: String,
        victim_kind: AgentKind,
        killer: Option<String>,
        killer_kind: Option<AgentKind>,
    },
    BoatSelfDestructed { name: String, kind: AgentKind },
    /// A powerup was collected by touching it or by shooting it empty.
    PowerupCollected {
        kind: PowerupKind,
        collector: String,
        shot: bool,
    },
    ShotFired {
        shooter: String,
        energy: f64,
        fragments: u32,
    },
    /// Two projectiles from opposing boats destroyed each other.
    ProjectilesCollided { position: DVec2 },
}
