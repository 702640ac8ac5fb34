//! Arena snapshot: the complete visible state published after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AgentKind, ArenaPhase, PowerupKind};
use crate::events::SimEvent;
use crate::stats::AgentStats;
use crate::types::{FactionId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: ArenaPhase,
    pub boats: Vec<BoatView>,
    pub powerups: Vec<PowerupView>,
    pub projectiles: Vec<ProjectileView>,
    pub scoreboard: Vec<ScoreRow>,
    pub events: Vec<SimEvent>,
}

/// A live boat as seen by a display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoatView {
    pub id: u64,
    pub name: String,
    pub kind: AgentKind,
    pub faction: Option<FactionId>,
    pub position: DVec2,
    /// Degrees clockwise from north, `[0, 360)`.
    pub heading: f64,
    pub velocity: DVec2,
    /// Gun azimuth relative to the hull (degrees).
    pub gun_azimuth: f64,
    /// Radar azimuth relative to the hull (degrees).
    pub radar_azimuth: f64,
    pub radar_range: f64,
    pub health: f64,
    pub energy: f64,
    pub contacts: usize,
    /// Name of the active mission, for mission-driven agents.
    pub mission: Option<String>,
    /// Livery colours, `0xRRGGBB`.
    pub colors: (u32, u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerupView {
    pub id: u64,
    pub kind: PowerupKind,
    pub position: DVec2,
    /// Remaining integrity as a fraction.
    pub integrity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: DVec2,
    pub velocity: DVec2,
    pub energy: f64,
    pub source: String,
}

/// One scoreboard line per agent kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRow {
    pub kind: AgentKind,
    pub name: String,
    pub stats: AgentStats,
    pub average_kills: f64,
    pub average_damage_dealt: f64,
    pub average_shots_per_kill: f64,
}

impl ScoreRow {
    pub fn new(kind: AgentKind, name: impl Into<String>, stats: &AgentStats) -> Self {
        Self {
            kind,
            name: name.into(),
            average_kills: stats.average_kills(),
            average_damage_dealt: stats.average_damage_dealt_to_boats(),
            average_shots_per_kill: stats.average_shots_per_kill(),
            stats: stats.clone(),
        }
    }
}
