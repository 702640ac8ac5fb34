//! Cleanup system: retires destroyed boats and despawns everything queued
//! for removal during the tick.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::info;

use gunboat_core::components::Boat;
use gunboat_core::enums::AgentKind;
use gunboat_core::events::SimEvent;

use crate::pilot::{PadSlot, Pilot};
use crate::scoreboard::Scoreboard;

/// Retire dead and self-destructed boats, then despawn the buffer.
///
/// A killed boat's killer becomes the grudge for its kind. Pads held by
/// retired boats are returned.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<SimEvent>,
    grudges: &mut BTreeMap<AgentKind, String>,
    pads: &mut [PadSlot],
) {
    for (entity, (boat, pilot)) in world.query_mut::<(&Boat, &mut Pilot)>() {
        if boat.destroyed {
            let killer = boat.killed_by.as_ref();
            if let Some(killer) = killer {
                grudges.insert(boat.kind, killer.name.clone());
            }
            pilot.controller.on_killed(killer.map(|k| k.name.as_str()));
            events.push(SimEvent::BoatKilled {
                victim: boat.name.clone(),
                victim_kind: boat.kind,
                killer: killer.map(|k| k.name.clone()),
                killer_kind: killer.map(|k| k.kind),
            });
        } else if boat.self_destruct {
            info!(boat = %boat.name, "self-destructed");
            scoreboard.entry(boat.kind).record_death();
            pilot.controller.on_killed(None);
            events.push(SimEvent::BoatSelfDestructed {
                name: boat.name.clone(),
                kind: boat.kind,
            });
        } else {
            continue;
        }

        if let Some(slot) = pilot.controller.pad().and_then(|i| pads.get_mut(i)) {
            slot.checked_out = false;
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
