//! Hull dynamics: control forces, integration and hull-to-hull contact.

use glam::DVec2;
use hecs::{Entity, World};

use gunboat_core::components::{Body, Boat, Controls};
use gunboat_core::constants::*;
use gunboat_core::enums::SteeringMode;
use gunboat_core::types::{delta_angle, local_to_world_direction, normalize_heading};

use crate::scoreboard::Scoreboard;

/// Rudder deflection produced by the current steering command.
pub fn rudder_for(controls: &Controls, heading: f64) -> f64 {
    match controls.steering {
        SteeringMode::Heading => {
            (HEADING_GAIN * delta_angle(heading, controls.target_heading)).clamp(-1.0, 1.0)
        }
        SteeringMode::Rudder => controls.rudder,
    }
}

/// Turn the persisted commands into force and torque on each hull.
pub fn apply_controls(world: &mut World) {
    for (_entity, (body, controls)) in world.query_mut::<(&mut Body, &Controls)>() {
        body.torque += rudder_for(controls, body.heading) * MAX_TORQUE;

        let forward = if controls.thrust.y >= 0.0 {
            controls.thrust.y * MAX_FORWARD_THRUST
        } else {
            controls.thrust.y * MAX_REVERSE_THRUST
        };
        let lateral = controls.thrust.x * MAX_LATERAL_THRUST;
        body.force += local_to_world_direction(body.heading, DVec2::new(lateral, forward));
    }
}

/// Semi-implicit Euler step with linear drag, then hull separation.
pub fn integrate(world: &mut World, scoreboard: &mut Scoreboard) {
    for (_entity, (body, boat)) in world.query_mut::<(&mut Body, &Boat)>() {
        let start = body.position;

        body.velocity += body.force / body.mass * DT;
        body.velocity *= (1.0 - body.linear_drag * DT).max(0.0);
        body.position += body.velocity * DT;

        body.angular_velocity += (body.torque / body.yaw_inertia).to_degrees() * DT;
        body.angular_velocity *= (1.0 - body.angular_drag * DT).max(0.0);
        body.heading = normalize_heading(body.heading + body.angular_velocity * DT);

        body.force = DVec2::ZERO;
        body.torque = 0.0;

        scoreboard
            .entry(boat.kind)
            .record_distance(start.distance(body.position));
    }

    separate_hulls(world);
}

/// Push overlapping hulls apart and cancel their closing speed.
fn separate_hulls(world: &mut World) {
    let mut hulls: Vec<(Entity, DVec2, DVec2, f64)> = world
        .query_mut::<&Body>()
        .into_iter()
        .map(|(entity, body)| (entity, body.position, body.velocity, body.radius))
        .collect();

    let mut touched = false;
    for i in 0..hulls.len() {
        for j in (i + 1)..hulls.len() {
            let (_, pa, va, ra) = hulls[i];
            let (_, pb, vb, rb) = hulls[j];
            let offset = pb - pa;
            let distance = offset.length();
            let overlap = ra + rb - distance;
            if overlap <= 0.0 {
                continue;
            }
            let normal = if distance > 1e-9 { offset / distance } else { DVec2::Y };
            let push = normal * (overlap / 2.0);
            hulls[i].1 -= push;
            hulls[j].1 += push;

            let closing = (va - vb).dot(normal);
            if closing > 0.0 {
                let exchange = normal * (closing / 2.0);
                hulls[i].2 -= exchange;
                hulls[j].2 += exchange;
            }
            touched = true;
        }
    }

    if !touched {
        return;
    }
    for (entity, position, velocity, _) in hulls {
        if let Ok(mut body) = world.get::<&mut Body>(entity) {
            body.position = position;
            body.velocity = velocity;
        }
    }
}

/// Instantaneous change of momentum at the hull centre.
pub fn apply_impulse(body: &mut Body, impulse: DVec2) {
    body.velocity += impulse / body.mass;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_mode_saturates_far_from_target() {
        let controls = Controls {
            steering: SteeringMode::Heading,
            target_heading: 90.0,
            ..Default::default()
        };
        assert_eq!(rudder_for(&controls, 0.0), 1.0);
        assert_eq!(rudder_for(&controls, 180.0), -1.0);
        assert!((rudder_for(&controls, 85.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_hulls_separate() {
        let mut world = World::new();
        let a = world.spawn((Body::boat(DVec2::ZERO, 0.0),));
        let b = world.spawn((Body::boat(DVec2::new(6.0, 0.0), 0.0),));
        separate_hulls(&mut world);
        let pa = world.get::<&Body>(a).unwrap().position;
        let pb = world.get::<&Body>(b).unwrap().position;
        assert!((pa.distance(pb) - 2.0 * BOAT_RADIUS).abs() < 1e-9);
    }
}
