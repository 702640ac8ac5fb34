//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Powerup flavour: which resource cache it refills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Health,
    Energy,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::Health, PowerupKind::Energy];

    /// Display name carried by contacts of this powerup.
    pub fn display_name(self) -> &'static str {
        match self {
            PowerupKind::Health => "Health Powerup",
            PowerupKind::Energy => "Energy Powerup",
        }
    }
}

/// What a radar contact turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactKind {
    Boat,
    Powerup(PowerupKind),
}

impl ContactKind {
    pub fn is_boat(self) -> bool {
        matches!(self, ContactKind::Boat)
    }

    pub fn is_powerup(self) -> bool {
        matches!(self, ContactKind::Powerup(_))
    }
}

/// Agent behaviour kind. Statistics are aggregated per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentKind {
    /// Mission-arbitrated boat: hunt, refuel, repair, search.
    Hunter,
    /// Holds a corner and picks off boats at range.
    Sniper,
    /// Circles with a fixed radar and fires at whatever crosses the gun line.
    Spin,
    /// Does nothing.
    SittingDuck,
    /// Pursues whoever last killed one of its kind.
    Vengeful,
    /// Chases the nearest boat and fires steadily.
    Pro,
    /// Driven by a virtual controller.
    Player,
}

impl AgentKind {
    /// Kinds spawned by default when no roster is configured.
    pub const AUTONOMOUS: [AgentKind; 6] = [
        AgentKind::Hunter,
        AgentKind::Sniper,
        AgentKind::Spin,
        AgentKind::SittingDuck,
        AgentKind::Vengeful,
        AgentKind::Pro,
    ];
}

/// Which steering input the hull follows this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringMode {
    /// Track a commanded heading.
    Heading,
    /// Hold a rudder deflection.
    #[default]
    Rudder,
}

/// Radar drive mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarMode {
    /// Spin continuously at a requested rate.
    #[default]
    ContinuousSweep,
    /// Hold an azimuth relative to the hull.
    RelativeAzimuth,
    /// Hold an absolute heading regardless of hull rotation.
    AbsoluteHeading,
}

/// Engine run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    #[default]
    Running,
    Paused,
}
