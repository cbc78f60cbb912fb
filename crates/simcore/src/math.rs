use std::f64::consts::{PI, TAU};

/// Wraps an angle into (-pi, pi].
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = (theta + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Clamps `v` into `[lo, hi]` without panicking on inverted bounds.
///
/// NaN maps to `hi`: `f64::min` drops the NaN operand.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_angles() -> Vec<f64> {
        (-400..=400).map(|i| i as f64 * 0.0731).collect()
    }

    #[test]
    fn test_wrap_range() {
        for theta in sample_angles() {
            let w = wrap_angle(theta);
            assert!(w > -PI && w <= PI, "wrap({theta}) = {w}");
        }
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn test_wrap_is_idempotent_under_full_turns() {
        for theta in sample_angles() {
            let base = wrap_angle(theta);
            for k in -3..=3 {
                let again = wrap_angle(base + TAU * k as f64);
                // compare on the circle so +pi and -pi+tiny are not treated as far apart
                let diff = wrap_angle(again - base);
                assert!(diff.abs() < 1e-9, "theta={theta} k={k}: {again} vs {base}");
                assert!(again > -PI && again <= PI);
            }
        }
    }

    #[test]
    fn test_wrap_propagates_nan() {
        assert!(wrap_angle(f64::NAN).is_nan());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(75.0, -50.0, 50.0), 50.0);
        assert_eq!(clamp(-75.0, -50.0, 50.0), -50.0);
        assert_eq!(clamp(12.5, -50.0, 50.0), 12.5);
    }

    #[test]
    fn test_clamp_maps_nan_to_upper_bound() {
        assert_eq!(clamp(f64::NAN, -50.0, 50.0), 50.0);
        assert_eq!(clamp(f64::NAN, -1.0, 2.0), 2.0);
    }
}
