//! Scalar shaping helpers used by priority formulas and controllers.

/// Clamps `x` into `[0, 1]` with eased edges (smoothstep).
pub fn smooth_clamp(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    let t = x.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linearly maps `value` from `[from_min, from_max]` to `[to_min, to_max]`,
/// clamped to the output range.
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let span = from_max - from_min;
    if span == 0.0 {
        return to_min;
    }
    let t = ((value - from_min) / span).clamp(0.0, 1.0);
    to_min + (to_max - to_min) * t
}

/// Divides, falling back to `fallback` when the denominator is zero.
pub fn safe_divide(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_clamp_bounds() {
        assert_eq!(smooth_clamp(-5.0), 0.0);
        assert_eq!(smooth_clamp(5.0), 1.0);
        assert_eq!(smooth_clamp(f64::INFINITY), 1.0);
        assert_eq!(smooth_clamp(f64::NEG_INFINITY), 0.0);
        assert!((smooth_clamp(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_remap_clamps() {
        assert_eq!(remap(0.0, 0.0, 500.0, 0.25, 0.0), 0.25);
        assert_eq!(remap(1000.0, 0.0, 500.0, 0.25, 0.0), 0.0);
        assert!((remap(250.0, 0.0, 500.0, 0.25, 0.0) - 0.125).abs() < 1e-12);
    }
}
