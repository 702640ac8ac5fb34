//! Critically damped angle trackers for gun and radar mounts.

use gunboat_core::types::delta_angle;

/// Moves `current` toward `target` along a critically damped spring.
///
/// The per-step change is limited to `max_speed * smooth_time`, and the
/// output never passes the target: on overshoot it snaps to the target and
/// the velocity is zeroed.
pub fn smooth_damp(
    current: f64,
    target: f64,
    velocity: &mut f64,
    smooth_time: f64,
    max_speed: f64,
    dt: f64,
) -> f64 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let original_to = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    if (original_to - current > 0.0) == (output > original_to) {
        output = original_to;
        *velocity = 0.0;
    }
    output
}

/// [`smooth_damp`] for angles in degrees, taking the shortest way round.
pub fn smooth_damp_angle(
    current: f64,
    target: f64,
    velocity: &mut f64,
    smooth_time: f64,
    max_speed: f64,
    dt: f64,
) -> f64 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, max_speed, dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.02;

    #[test]
    fn test_smooth_damp_never_overshoots() {
        let mut angle = 0.0;
        let mut velocity = 0.0;
        for _ in 0..200 {
            let next = smooth_damp(angle, 90.0, &mut velocity, 0.1, 120.0, DT);
            assert!(next >= angle - 1e-9, "tracker reversed: {angle} -> {next}");
            assert!(next <= 90.0 + 1e-9, "tracker overshot: {next}");
            angle = next;
        }
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_smooth_damp_respects_speed_cap() {
        let mut angle = 0.0;
        let mut velocity = 0.0;
        for _ in 0..10 {
            let next = smooth_damp(angle, 170.0, &mut velocity, 0.1, 120.0, DT);
            assert!((next - angle) / DT <= 120.0 + 1e-6);
            angle = next;
        }
    }

    #[test]
    fn test_smooth_damp_angle_wraps_short_way() {
        let mut velocity = 0.0;
        let next = smooth_damp_angle(170.0, -170.0, &mut velocity, 0.05, 360.0, DT);
        assert!(next > 170.0, "should cross +180 rather than sweep back: {next}");
    }

    #[test]
    fn test_smooth_damp_at_rest_on_target() {
        let mut velocity = 0.0;
        let next = smooth_damp(45.0, 45.0, &mut velocity, 0.1, 120.0, DT);
        assert_eq!(next, 45.0);
        assert_eq!(velocity, 0.0);
    }
}
