//! Gun and radar servos, sweep slices and radar contact delivery.
//!
//! A radar detects whatever lies inside the slice of headings it swept
//! during the tick, out to a range that shrinks as it spins faster.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::trace;

use gunboat_core::components::{Body, Boat, Gun, Pickup, Radar};
use gunboat_core::constants::*;
use gunboat_core::contact::{ContactId, TargetContact};
use gunboat_core::enums::{ContactKind, RadarMode};
use gunboat_core::types::{
    direction_to_heading, heading_to_direction, normalize_azimuth, normalize_heading,
};

use crate::pilot::Pilot;
use crate::servo::{smooth_damp, smooth_damp_angle};

/// Detection range for a radar turning at `angular_velocity` deg/s.
pub fn radar_range(angular_velocity: f64) -> f64 {
    (RADAR_RANGE_K / angular_velocity.abs().max(1.0)).clamp(RADAR_MIN_RANGE, RADAR_MAX_RANGE)
}

/// Contact identity of an entity, shared by every observer.
pub fn contact_id(entity: Entity) -> ContactId {
    ContactId(entity.to_bits().get())
}

/// True if `heading` lies in the slice from `min` to `max`, both in `[0, 360)`.
/// A slice with `max < min` wraps through north.
pub fn in_slice(heading: f64, min: f64, max: f64) -> bool {
    if max > min {
        heading >= min && heading <= max
    } else {
        heading <= max || heading >= min
    }
}

/// Advance the gun and radar trackers and record each radar's swept slice.
pub fn step_servos(world: &mut World) {
    for (_entity, (body, gun, radar)) in world.query_mut::<(&Body, &mut Gun, &mut Radar)>() {
        gun.servo.angle = smooth_damp(
            gun.servo.angle,
            gun.command,
            &mut gun.servo.velocity,
            GUN_SMOOTH_TIME,
            GUN_MAX_SPEED,
            DT,
        );

        let before = radar.servo.angle;
        let (target, max_speed) = match radar.mode {
            RadarMode::ContinuousSweep => (
                before + RADAR_SWEEP_LEAD.copysign(radar.command),
                radar.command.abs().min(RADAR_MAX_ANGULAR_VELOCITY),
            ),
            RadarMode::RelativeAzimuth => (radar.command, RADAR_MAX_ANGULAR_VELOCITY),
            RadarMode::AbsoluteHeading => {
                (radar.command - body.heading, RADAR_MAX_ANGULAR_VELOCITY)
            }
        };
        let after = smooth_damp_angle(
            before,
            target,
            &mut radar.servo.velocity,
            RADAR_SMOOTH_TIME,
            max_speed,
            DT,
        );
        radar.servo.angle = normalize_azimuth(after);

        // Integration has already turned the hull; the sweep starts from
        // where the mast pointed at the start of the tick.
        let start_heading = body.heading - body.angular_velocity * DT;
        let mut min = normalize_heading(start_heading + before);
        let mut max = normalize_heading(body.heading + after);
        if radar.servo.velocity < 0.0 {
            std::mem::swap(&mut min, &mut max);
        }
        radar.sweep_min = min;
        radar.sweep_max = max;
    }
}

/// Everything the observer's radar sees between two headings, widened by
/// the sweep margin on each side.
pub fn query_radar_contacts(
    world: &World,
    observer: Entity,
    heading_min: f64,
    heading_max: f64,
    now: f64,
) -> Vec<TargetContact> {
    let (origin, range) = match (world.get::<&Body>(observer), world.get::<&Radar>(observer)) {
        (Ok(body), Ok(radar)) => (
            body.position + heading_to_direction(body.heading) * RADAR_OFFSET,
            radar_range(radar.servo.velocity),
        ),
        _ => return Vec::new(),
    };
    let min = normalize_heading(heading_min - RADAR_SWEEP_MARGIN);
    let max = normalize_heading(heading_max + RADAR_SWEEP_MARGIN);
    let visible = |position: DVec2| {
        let offset = position - origin;
        offset.length() <= range && in_slice(direction_to_heading(offset), min, max)
    };

    let mut hits = Vec::new();
    for (entity, (body, boat)) in world.query::<(&Body, &Boat)>().iter() {
        if entity == observer || !visible(body.position) {
            continue;
        }
        hits.push(TargetContact::new(
            contact_id(entity),
            ContactKind::Boat,
            boat.name.clone(),
            boat.faction,
            body.position,
            body.velocity,
            now,
        ));
    }
    for (entity, pickup) in world.query::<&Pickup>().iter() {
        if !visible(pickup.position) {
            continue;
        }
        hits.push(TargetContact::new(
            contact_id(entity),
            ContactKind::Powerup(pickup.kind),
            pickup.kind.display_name(),
            None,
            pickup.position,
            DVec2::ZERO,
            now,
        ));
    }
    hits
}

/// Run every radar's slice query and merge accepted hits into its table.
pub fn deliver_contacts(world: &mut World, now: f64) {
    let sweeps: Vec<(Entity, f64, f64)> = world
        .query_mut::<&Radar>()
        .into_iter()
        .map(|(entity, radar)| (entity, radar.sweep_min, radar.sweep_max))
        .collect();

    for (observer, min, max) in sweeps {
        let hits = query_radar_contacts(world, observer, min, max, now);
        if hits.is_empty() {
            continue;
        }
        let Ok((boat, radar, pilot)) =
            world.query_one_mut::<(&Boat, &mut Radar, &Pilot)>(observer)
        else {
            continue;
        };
        for hit in hits {
            if pilot.controller.accepts(&hit, boat.faction) {
                trace!(observer = %boat.name, contact = %hit.display_name, "radar hit");
                radar.contacts.record_hit(hit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_shrinks_with_spin() {
        assert_eq!(radar_range(0.0), RADAR_MAX_RANGE);
        assert_eq!(radar_range(-360.0), 100.0);
        assert_eq!(radar_range(1.0e6), RADAR_MIN_RANGE);
    }

    #[test]
    fn test_slice_wraps_through_north() {
        assert!(in_slice(0.0, 347.0, 13.0));
        assert!(in_slice(350.0, 347.0, 13.0));
        assert!(!in_slice(180.0, 347.0, 13.0));
        assert!(in_slice(90.0, 80.0, 100.0));
        assert!(!in_slice(120.0, 80.0, 100.0));
    }

    #[test]
    fn test_slice_starts_from_heading_before_turn() {
        let mut world = World::new();
        let mut body = Body::boat(DVec2::ZERO, 10.0);
        body.angular_velocity = 100.0;
        let radar = Radar {
            mode: RadarMode::RelativeAzimuth,
            ..Default::default()
        };
        let e = world.spawn((body, Gun::default(), radar));

        step_servos(&mut world);

        let radar = world.get::<&Radar>(e).unwrap();
        assert!((radar.sweep_min - 8.0).abs() < 1e-9);
        assert!((radar.sweep_max - 10.0).abs() < 1e-9);
    }
}
