//! Static table of agent kinds: display name, livery and constructor.

use gunboat_core::enums::AgentKind;

use super::hunter::HunterController;
use super::player::PlayerController;
use super::pro::ProController;
use super::sitting_duck::SittingDuckController;
use super::sniper::SniperController;
use super::spin::SpinController;
use super::vengeful::VengefulController;
use super::Controller;

/// What a new controller may be handed at spawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnContext<'a> {
    /// Name of the boat that last killed one of this kind.
    pub grudge: Option<&'a str>,
    /// Virtual controller slot checked out for this boat.
    pub pad: Option<usize>,
}

pub struct AgentProfile {
    pub kind: AgentKind,
    pub name: &'static str,
    /// Hull and accent colours, `0xRRGGBB`.
    pub hull_color: u32,
    pub accent_color: u32,
    /// Whether the kind needs a virtual controller slot.
    pub needs_pad: bool,
    pub build: fn(&SpawnContext<'_>) -> Box<dyn Controller>,
}

pub static REGISTRY: [AgentProfile; 7] = [
    AgentProfile {
        kind: AgentKind::Hunter,
        name: "Hunter",
        hull_color: 0x8B1A1A,
        accent_color: 0xD04040,
        needs_pad: false,
        build: build_hunter,
    },
    AgentProfile {
        kind: AgentKind::Sniper,
        name: "Sniper",
        hull_color: 0x333333,
        accent_color: 0x808080,
        needs_pad: false,
        build: build_sniper,
    },
    AgentProfile {
        kind: AgentKind::Spin,
        name: "Spin",
        hull_color: 0x1A4D8B,
        accent_color: 0x4080D0,
        needs_pad: false,
        build: build_spin,
    },
    AgentProfile {
        kind: AgentKind::SittingDuck,
        name: "SittingDuck",
        hull_color: 0xC8A000,
        accent_color: 0xFFD700,
        needs_pad: false,
        build: build_sitting_duck,
    },
    AgentProfile {
        kind: AgentKind::Vengeful,
        name: "Vengeful",
        hull_color: 0x00661A,
        accent_color: 0x00CC33,
        needs_pad: false,
        build: build_vengeful,
    },
    AgentProfile {
        kind: AgentKind::Pro,
        name: "Pro",
        hull_color: 0x4B0082,
        accent_color: 0x9370DB,
        needs_pad: false,
        build: build_pro,
    },
    AgentProfile {
        kind: AgentKind::Player,
        name: "Player",
        hull_color: 0xA00000,
        accent_color: 0xFF0000,
        needs_pad: true,
        build: build_player,
    },
];

fn build_hunter(_: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(HunterController::new())
}

fn build_sniper(_: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(SniperController::new())
}

fn build_spin(_: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(SpinController)
}

fn build_sitting_duck(_: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(SittingDuckController)
}

fn build_vengeful(ctx: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(VengefulController::new(ctx.grudge.map(str::to_owned)))
}

fn build_pro(_: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(ProController::new())
}

fn build_player(ctx: &SpawnContext<'_>) -> Box<dyn Controller> {
    Box::new(PlayerController::new(ctx.pad))
}

pub fn lookup(kind: AgentKind) -> Option<&'static AgentProfile> {
    REGISTRY.iter().find(|p| p.kind == kind)
}

/// Builds a controller for `kind`, or `None` if the kind is not registered.
pub fn build(kind: AgentKind, ctx: &SpawnContext<'_>) -> Option<Box<dyn Controller>> {
    lookup(kind).map(|profile| (profile.build)(ctx))
}

/// Display name for a kind; falls back to the debug name.
pub fn display_name(kind: AgentKind) -> String {
    lookup(kind).map_or_else(|| format!("{kind:?}"), |p| p.name.to_owned())
}
