//! Snapshot system: builds an `ArenaSnapshot` from the ECS world.

use hecs::World;

use gunboat_core::components::{Body, Boat, Gun, Pickup, Projectile, Radar};
use gunboat_core::enums::ArenaPhase;
use gunboat_core::events::SimEvent;
use gunboat_core::state::{ArenaSnapshot, BoatView, PowerupView, ProjectileView};
use gunboat_core::types::SimTime;

use crate::pilot::Pilot;
use crate::scoreboard::Scoreboard;
use crate::systems::sensors::{contact_id, radar_range};

/// Build a complete snapshot of the arena. Read-only.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: ArenaPhase,
    scoreboard: &Scoreboard,
    events: Vec<SimEvent>,
) -> ArenaSnapshot {
    let boats = world
        .query::<(&Body, &Boat, &Gun, &Radar, &Pilot)>()
        .iter()
        .map(|(entity, (body, boat, gun, radar, pilot))| BoatView {
            id: contact_id(entity).0,
            name: boat.name.clone(),
            kind: boat.kind,
            faction: boat.faction,
            position: body.position,
            heading: body.heading,
            velocity: body.velocity,
            gun_azimuth: gun.servo.angle,
            radar_azimuth: radar.servo.angle,
            radar_range: radar_range(radar.servo.velocity),
            health: boat.health.fraction(),
            energy: boat.energy.fraction(),
            contacts: radar.contacts.len(),
            mission: pilot.controller.active_mission().map(str::to_owned),
            colors: boat.colors,
        })
        .collect();

    let powerups = world
        .query::<&Pickup>()
        .iter()
        .map(|(entity, pickup)| PowerupView {
            id: contact_id(entity).0,
            kind: pickup.kind,
            position: pickup.position,
            integrity: pickup.integrity.fraction(),
        })
        .collect();

    let projectiles = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, projectile)| ProjectileView {
            position: projectile.position,
            velocity: projectile.velocity,
            energy: projectile.energy,
            source: projectile.source.name.clone(),
        })
        .collect();

    ArenaSnapshot {
        time: *time,
        phase,
        boats,
        powerups,
        projectiles,
        scoreboard: scoreboard.rows(),
        events,
    }
}
