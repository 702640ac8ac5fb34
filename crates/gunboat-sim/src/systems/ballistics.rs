//! Projectile launch, flight and swept collision.
//!
//! Rounds are tested along the segment they travel during the tick, so a
//! fast round cannot tunnel through a hull. Rounds from the same boat or
//! faction pass through each other and through friendly hulls.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use gunboat_core::components::{Attacker, Body, Boat, Gun, Pickup, Projectile};
use gunboat_core::constants::*;
use gunboat_core::events::SimEvent;
use gunboat_core::types::heading_to_direction;

use crate::handle::FireOrder;
use crate::scoreboard::Scoreboard;
use crate::systems::physics::apply_impulse;
use crate::systems::pickups::grant;
use crate::systems::sensors::contact_id;

/// Turn this tick's accepted fire orders into projectiles at the muzzle.
pub fn spawn_projectiles(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    orders: &mut Vec<FireOrder>,
    now: f64,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<SimEvent>,
) {
    let spread = Normal::new(0.0, SHOTGUN_SPREAD_DEG).ok();

    for order in orders.drain(..) {
        let Ok((body, boat, gun)) = world.query_one_mut::<(&Body, &Boat, &Gun)>(order.shooter)
        else {
            continue;
        };
        let source = Attacker {
            id: contact_id(order.shooter),
            name: boat.name.clone(),
            kind: boat.kind,
            faction: boat.faction,
        };
        let forward = heading_to_direction(body.heading);
        let gun_heading = body.heading + gun.servo.angle;
        let muzzle = body.position
            + forward * GUN_OFFSET
            + heading_to_direction(gun_heading) * BARREL_LENGTH;
        let carrier_velocity = body.velocity;

        let mut rounds = Vec::with_capacity(order.rounds as usize);
        for _ in 0..order.rounds {
            let error = match (&spread, order.spread) {
                (Some(normal), true) => normal.sample(rng),
                _ => 0.0,
            };
            rounds.push(Projectile {
                source: source.clone(),
                energy: order.energy,
                position: muzzle,
                velocity: heading_to_direction(gun_heading + error) * MUZZLE_VELOCITY
                    + carrier_velocity,
                expires_at: now + PROJECTILE_LIFETIME,
            });
        }

        let total = order.energy * f64::from(order.rounds);
        scoreboard.entry(source.kind).record_shot(total);
        events.push(SimEvent::ShotFired {
            shooter: source.name.clone(),
            energy: total,
            fragments: order.rounds,
        });
        for round in rounds {
            world.spawn((round,));
        }
    }
}

/// Earliest fraction of the segment `start -> start + travel` inside the
/// circle, or `None` if it misses.
pub fn segment_hits_circle(start: DVec2, travel: DVec2, centre: DVec2, radius: f64) -> Option<f64> {
    let from_centre = start - centre;
    let c = from_centre.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = travel.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = from_centre.dot(travel);
    if b >= 0.0 {
        return None;
    }
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / a;
    (t <= 1.0).then_some(t)
}

/// Time in `[0, dt]` at which two rounds are closest, and their distance then.
fn closest_approach(pa: DVec2, va: DVec2, pb: DVec2, vb: DVec2, dt: f64) -> (f64, f64) {
    let offset = pb - pa;
    let closing = vb - va;
    let speed_sq = closing.length_squared();
    let t = if speed_sq > 0.0 {
        (-offset.dot(closing) / speed_sq).clamp(0.0, dt)
    } else {
        0.0
    };
    (t, (offset + closing * t).length())
}

fn friendly(a: &Attacker, b: &Attacker) -> bool {
    a.id == b.id || (a.faction.is_some() && a.faction == b.faction)
}

enum Target {
    Boat(Entity),
    Pickup(Entity),
}

/// Expire, collide and advance every projectile.
pub fn run(
    world: &mut World,
    now: f64,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<SimEvent>,
    despawn: &mut Vec<Entity>,
) {
    let mut rounds: Vec<(Entity, Projectile, bool)> = Vec::new();
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if now >= projectile.expires_at {
            despawn.push(entity);
        } else {
            rounds.push((entity, projectile.clone(), true));
        }
    }

    // Opposing rounds annihilate each other.
    for i in 0..rounds.len() {
        for j in (i + 1)..rounds.len() {
            if !rounds[i].2 || !rounds[j].2 || friendly(&rounds[i].1.source, &rounds[j].1.source) {
                continue;
            }
            let (a, b) = (&rounds[i].1, &rounds[j].1);
            let (t, distance) = closest_approach(a.position, a.velocity, b.position, b.velocity, DT);
            if distance <= 2.0 * PROJECTILE_RADIUS {
                let position = (a.position + a.velocity * t + b.position + b.velocity * t) / 2.0;
                debug!(x = position.x, y = position.y, "projectiles collided");
                events.push(SimEvent::ProjectilesCollided { position });
                rounds[i].2 = false;
                rounds[j].2 = false;
                despawn.push(rounds[i].0);
                despawn.push(rounds[j].0);
            }
        }
    }

    let hulls: Vec<(Entity, DVec2, f64, Attacker)> = world
        .query_mut::<(&Body, &Boat)>()
        .into_iter()
        .map(|(entity, (body, boat))| {
            let owner = Attacker {
                id: contact_id(entity),
                name: boat.name.clone(),
                kind: boat.kind,
                faction: boat.faction,
            };
            (entity, body.position, body.radius, owner)
        })
        .collect();
    let mut crates: Vec<(Entity, DVec2, bool)> = world
        .query_mut::<&Pickup>()
        .into_iter()
        .filter(|(_, pickup)| !pickup.integrity.is_empty())
        .map(|(entity, pickup)| (entity, pickup.position, true))
        .collect();

    for (entity, projectile, alive) in rounds {
        if !alive {
            continue;
        }
        let travel = projectile.velocity * DT;

        let mut nearest: Option<(f64, Target)> = None;
        for (hull, centre, radius, owner) in &hulls {
            if friendly(&projectile.source, owner) {
                continue;
            }
            if let Some(t) =
                segment_hits_circle(projectile.position, travel, *centre, radius + PROJECTILE_RADIUS)
            {
                if nearest.as_ref().map_or(true, |(best, _)| t < *best) {
                    nearest = Some((t, Target::Boat(*hull)));
                }
            }
        }
        for (pickup, centre, intact) in &crates {
            if !intact {
                continue;
            }
            if let Some(t) = segment_hits_circle(
                projectile.position,
                travel,
                *centre,
                POWERUP_RADIUS + PROJECTILE_RADIUS,
            ) {
                if nearest.as_ref().map_or(true, |(best, _)| t < *best) {
                    nearest = Some((t, Target::Pickup(*pickup)));
                }
            }
        }

        match nearest {
            Some((_, Target::Boat(hull))) => {
                strike_boat(world, hull, &projectile, now, scoreboard);
                despawn.push(entity);
            }
            Some((_, Target::Pickup(pickup))) => {
                if strike_pickup(world, pickup, &projectile, scoreboard, events) {
                    if let Some(slot) = crates.iter_mut().find(|c| c.0 == pickup) {
                        slot.2 = false;
                    }
                    despawn.push(pickup);
                }
                despawn.push(entity);
            }
            None => {
                if let Ok(mut round) = world.get::<&mut Projectile>(entity) {
                    round.position += travel;
                }
            }
        }
    }
}

/// Damage a hull, reward the shooter with energy and record the outcome.
fn strike_boat(
    world: &mut World,
    victim: Entity,
    projectile: &Projectile,
    now: f64,
    scoreboard: &mut Scoreboard,
) {
    let (dealt, killed, victim_kind, victim_name) = {
        let Ok(mut boat) = world.get::<&mut Boat>(victim) else {
            return;
        };
        if boat.destroyed {
            return;
        }
        let dealt = boat.health.take(projectile.energy);
        let killed = boat.health.is_empty();
        if killed {
            boat.destroyed = true;
            boat.killed_by = Some(projectile.source.clone());
        }
        (dealt, killed, boat.kind, boat.name.clone())
    };

    if let Ok(mut body) = world.get::<&mut Body>(victim) {
        let direction = projectile.velocity.normalize_or_zero();
        apply_impulse(
            &mut body,
            direction * projectile.energy * PROJECTILE_IMPULSE_PER_ENERGY,
        );
    }

    scoreboard.entry(victim_kind).record_hit_taken(dealt, killed);
    scoreboard
        .entry(projectile.source.kind)
        .record_hit_dealt(dealt, killed);

    let shooter = hecs::Entity::from_bits(projectile.source.id.0)
        .and_then(|entity| world.get::<&mut Boat>(entity).ok());
    if let Some(mut shooter) = shooter {
        shooter.energy.offer(dealt * DAMAGE_REWARD_FACTOR);
        if killed {
            shooter.last_kill_at = Some(now);
        }
    }

    if killed {
        info!(victim = %victim_name, killer = %projectile.source.name, "boat destroyed");
    }
}

/// Damage a powerup. Returns true when it breaks open, handing its contents
/// to the shooter.
fn strike_pickup(
    world: &mut World,
    target: Entity,
    projectile: &Projectile,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<SimEvent>,
) -> bool {
    let (dealt, emptied, kind, amount) = {
        let Ok(mut pickup) = world.get::<&mut Pickup>(target) else {
            return false;
        };
        let dealt = pickup.integrity.take(projectile.energy);
        (dealt, pickup.integrity.is_empty(), pickup.kind, pickup.amount)
    };
    scoreboard
        .entry(projectile.source.kind)
        .record_powerup_hit(dealt, emptied);
    if !emptied {
        return false;
    }

    let shooter = hecs::Entity::from_bits(projectile.source.id.0)
        .and_then(|entity| world.get::<&mut Boat>(entity).ok());
    if let Some(mut shooter) = shooter {
        grant(&mut shooter, kind, amount);
        events.push(SimEvent::PowerupCollected {
            kind,
            collector: shooter.name.clone(),
            shot: true,
        });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_hits_circle_entry_point() {
        let t = segment_hits_circle(DVec2::ZERO, DVec2::new(0.0, 10.0), DVec2::new(0.0, 8.0), 2.0);
        assert_eq!(t, Some(0.6));
    }

    #[test]
    fn test_segment_misses_behind_and_beside() {
        let travel = DVec2::new(0.0, 10.0);
        assert!(segment_hits_circle(DVec2::ZERO, travel, DVec2::new(0.0, -8.0), 2.0).is_none());
        assert!(segment_hits_circle(DVec2::ZERO, travel, DVec2::new(5.0, 5.0), 2.0).is_none());
        assert!(segment_hits_circle(DVec2::ZERO, travel, DVec2::new(0.0, 13.0), 2.0).is_none());
    }

    #[test]
    fn test_head_on_rounds_meet_mid_tick() {
        let (t, d) = closest_approach(
            DVec2::ZERO,
            DVec2::new(0.0, 100.0),
            DVec2::new(0.0, 3.0),
            DVec2::new(0.0, -100.0),
            DT,
        );
        assert!((t - 0.015).abs() < 1e-12);
        assert!(d < 1e-9);
    }
}
