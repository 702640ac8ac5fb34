//! Entity spawn factories and spawn-cell placement.
//!
//! The arena is divided into 30 m cells whose centres lie within 100 m of
//! the origin on each axis. New entities go to a random cell that holds no
//! entity centre and that no body overlaps, jittered inside the cell.

use glam::DVec2;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use gunboat_ai::{AgentProfile, SpawnContext};
use gunboat_core::components::*;
use gunboat_core::constants::*;
use gunboat_core::enums::PowerupKind;
use gunboat_core::error::SimError;
use gunboat_core::resource::ResourceCache;

use crate::handle::{with_pilot, FireOrder};
use crate::pilot::Pilot;

/// Centres of every spawn cell, four quadrants, fixed order.
pub fn grid_cells() -> Vec<DVec2> {
    let mut offsets = Vec::new();
    let mut centre = GRID_CELL_SIZE / 2.0;
    while centre <= GRID_EXTENT {
        offsets.push(centre);
        centre += GRID_CELL_SIZE;
    }

    let mut cells = Vec::with_capacity(4 * offsets.len() * offsets.len());
    for sx in [1.0, -1.0] {
        for sy in [1.0, -1.0] {
            for &x in &offsets {
                for &y in &offsets {
                    cells.push(DVec2::new(sx * x, sy * y));
                }
            }
        }
    }
    cells
}

/// Collision circles of every boat and powerup.
fn body_circles(world: &World) -> Vec<(DVec2, f64)> {
    let mut circles: Vec<(DVec2, f64)> = world
        .query::<&Body>()
        .iter()
        .map(|(_, body)| (body.position, body.radius))
        .collect();
    circles.extend(
        world
            .query::<&Pickup>()
            .iter()
            .map(|(_, pickup)| (pickup.position, POWERUP_RADIUS)),
    );
    circles
}

/// True if any body's collision circle intersects the axis-aligned box.
pub fn box_overlaps_any_body(world: &World, centre: DVec2, half_extent: f64) -> bool {
    let half = DVec2::splat(half_extent);
    body_circles(world).into_iter().any(|(position, radius)| {
        let closest = position.clamp(centre - half, centre + half);
        closest.distance_squared(position) < radius * radius
    })
}

fn cell_is_free(circles: &[(DVec2, f64)], centre: DVec2) -> bool {
    let half = DVec2::splat(GRID_CELL_SIZE / 2.0);
    let (lo, hi) = (centre - half, centre + half);
    circles.iter().all(|&(position, radius)| {
        let inside = position.cmpge(lo).all() && position.cmple(hi).all();
        let closest = position.clamp(lo, hi);
        !inside && closest.distance_squared(position) >= radius * radius
    })
}

/// Picks a free cell at random and returns a jittered point inside it.
pub fn find_spawn_position(world: &World, rng: &mut ChaCha8Rng, jitter: f64) -> Option<DVec2> {
    let circles = body_circles(world);
    let mut cells = grid_cells();
    cells.shuffle(rng);
    let cell = cells.into_iter().find(|&c| cell_is_free(&circles, c))?;
    Some(cell + DVec2::new(rng.gen_range(-jitter..=jitter), rng.gen_range(-jitter..=jitter)))
}

/// Spawn a boat of `profile`'s kind on a free cell with a random heading.
pub fn spawn_boat(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    profile: &AgentProfile,
    ctx: &SpawnContext<'_>,
    now: f64,
    orders: &mut Vec<FireOrder>,
) -> Result<Entity, SimError> {
    let position =
        find_spawn_position(world, rng, BOAT_SPAWN_JITTER).ok_or_else(|| SimError::SpawnFailure {
            what: profile.name.to_owned(),
        })?;
    let heading = rng.gen_range(0.0..360.0);
    Ok(spawn_boat_at(world, profile, ctx, position, heading, now, orders))
}

/// Spawn a boat at an exact pose and run its controller's `start`.
pub fn spawn_boat_at(
    world: &mut World,
    profile: &AgentProfile,
    ctx: &SpawnContext<'_>,
    position: DVec2,
    heading: f64,
    now: f64,
    orders: &mut Vec<FireOrder>,
) -> Entity {
    let boat = Boat {
        name: profile.name.to_owned(),
        kind: profile.kind,
        faction: None,
        colors: (profile.hull_color, profile.accent_color),
        health: ResourceCache::full(BOAT_HEALTH),
        energy: ResourceCache::full(BOAT_ENERGY),
        last_kill_at: None,
        destroyed: false,
        killed_by: None,
        self_destruct: false,
    };
    let entity = world.spawn((
        Body::boat(position, heading),
        boat,
        Controls::default(),
        Gun::default(),
        Radar::default(),
        Pilot::new((profile.build)(ctx)),
    ));

    let started = with_pilot(world, entity, now, orders, |controller, handle| {
        controller.start(handle)
    });
    if let Some(Err(fault)) = started {
        warn!(boat = profile.name, %fault, "controller failed to start");
    }
    debug!(boat = profile.name, x = position.x, y = position.y, heading, "spawned boat");
    entity
}

/// Spawn a powerup of a random kind on a free cell.
pub fn spawn_powerup(world: &mut World, rng: &mut ChaCha8Rng) -> Result<Entity, SimError> {
    let kind = PowerupKind::ALL[rng.gen_range(0..PowerupKind::ALL.len())];
    let position = find_spawn_position(world, rng, POWERUP_SPAWN_JITTER).ok_or_else(|| {
        SimError::SpawnFailure {
            what: kind.display_name().to_owned(),
        }
    })?;
    Ok(spawn_powerup_at(world, kind, position))
}

pub fn spawn_powerup_at(world: &mut World, kind: PowerupKind, position: DVec2) -> Entity {
    world.spawn((Pickup::new(kind, position),))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_has_36_cells_inside_extent() {
        let cells = grid_cells();
        assert_eq!(cells.len(), 36);
        for c in &cells {
            assert!(c.x.abs() <= GRID_EXTENT && c.y.abs() <= GRID_EXTENT);
            assert_eq!((c.x.abs() - 15.0) % 30.0, 0.0);
        }
    }

    #[test]
    fn test_box_overlap_uses_circle_extent() {
        let mut world = World::new();
        spawn_powerup_at(&mut world, PowerupKind::Health, DVec2::new(16.0, 0.0));
        // Circle edge reaches x = 14.5, inside a box spanning [-15, 15].
        assert!(box_overlaps_any_body(&world, DVec2::ZERO, 15.0));
        assert!(!box_overlaps_any_body(&world, DVec2::new(-30.0, 0.0), 15.0));
    }
}
