//! Powerup collection by contact.

use hecs::{Entity, World};
use tracing::debug;

use gunboat_core::components::{Body, Boat, Pickup};
use gunboat_core::constants::POWERUP_RADIUS;
use gunboat_core::enums::PowerupKind;
use gunboat_core::events::SimEvent;

use crate::scoreboard::Scoreboard;

/// Offer a powerup's contents to the matching resource of `boat`.
pub fn grant(boat: &mut Boat, kind: PowerupKind, amount: f64) {
    match kind {
        PowerupKind::Health => boat.health.offer(amount),
        PowerupKind::Energy => boat.energy.offer(amount),
    };
}

/// Any live hull touching an intact powerup collects it.
pub fn run(
    world: &mut World,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<SimEvent>,
    despawn: &mut Vec<Entity>,
) {
    let crates: Vec<(Entity, Pickup)> = world
        .query_mut::<&Pickup>()
        .into_iter()
        .filter(|(_, pickup)| !pickup.integrity.is_empty())
        .map(|(entity, pickup)| (entity, pickup.clone()))
        .collect();
    if crates.is_empty() {
        return;
    }

    let mut hulls = world.query::<(&Body, &mut Boat)>();
    for (pickup_entity, pickup) in crates {
        let collector = hulls.iter().find(|(_, (body, boat))| {
            !boat.destroyed
                && body.position.distance(pickup.position) < body.radius + POWERUP_RADIUS
        });
        let Some((_, (_, boat))) = collector else {
            continue;
        };
        grant(boat, pickup.kind, pickup.amount);
        scoreboard.entry(boat.kind).record_powerup_collected();
        debug!(boat = %boat.name, powerup = pickup.kind.display_name(), "powerup collected");
        events.push(SimEvent::PowerupCollected {
            kind: pickup.kind,
            collector: boat.name.clone(),
            shot: false,
        });
        despawn.push(pickup_entity);
    }
}
