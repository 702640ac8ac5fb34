//! Controller updates: per-frame work every tick, pruning and `update1` at 1 Hz.

use hecs::World;
use tracing::{trace, warn};

use gunboat_ai::Helm;
use gunboat_core::components::{Body, Boat, Controls, Gun, Radar};
use gunboat_core::types::SimTime;

use crate::handle::{BoatHandle, FireOrder};
use crate::pilot::{PadSlot, Pilot};

/// Hand each pad-driven controller the latest state of its slot.
pub fn deliver_input(world: &mut World, pads: &[PadSlot]) {
    for (_entity, pilot) in world.query_mut::<&mut Pilot>() {
        if let Some(slot) = pilot.controller.pad().and_then(|slot| pads.get(slot)) {
            pilot.controller.on_input(&slot.state);
        }
    }
}

/// Run every controller. A fault skips the rest of that boat's tick.
pub fn run(world: &mut World, time: &SimTime, orders: &mut Vec<FireOrder>) {
    let now = time.elapsed_secs;
    let decision_tick = time.is_decision_tick();

    for (entity, (body, boat, controls, gun, radar, pilot)) in world.query_mut::<(
        &Body,
        &mut Boat,
        &mut Controls,
        &mut Gun,
        &mut Radar,
        &mut Pilot,
    )>() {
        if boat.destroyed {
            continue;
        }
        let controller = pilot.controller.as_mut();

        if decision_tick {
            let dropped = radar.contacts.prune(|c| controller.is_stale(c, now));
            if dropped > 0 {
                trace!(boat = %boat.name, dropped, "pruned stale contacts");
            }
        }

        let mut handle = BoatHandle {
            entity,
            now,
            body,
            boat,
            controls,
            gun,
            radar,
            orders: &mut *orders,
        };
        let result = if decision_tick {
            controller.update1(&mut handle)
        } else {
            Ok(())
        }
        .and_then(|()| controller.update(&mut handle));

        if let Err(fault) = result {
            warn!(boat = %handle.name(), %fault, "controller fault, skipping tick");
        }
    }
}
