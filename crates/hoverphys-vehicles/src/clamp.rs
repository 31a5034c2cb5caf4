//! Horizontal speed clamp.

use hoverphys_core::{horizontal, with_horizontal, Scalar, Vec3};

/// Clamp the XZ magnitude of `v` to `max_speed`; `v.y` passes through.
///
/// The result never measures above `max_speed`, so a second call is a no-op.
pub fn clamp_horizontal(v: Vec3, max_speed: Scalar) -> Vec3 {
    let h = horizontal(v);
    if !h.is_finite() {
        return v;
    }
    let len = h.length();
    if len <= max_speed {
        return v;
    }
    let dir = if len.is_finite() {
        h / len
    } else {
        // |h| overflows past ~1.8e19 even with finite components
        let m = h.abs().max_element();
        let unit = h / m;
        unit / unit.length()
    };
    let mut out = dir * max_speed;
    // rounding can leave |out| an ulp or two above the cap
    for _ in 0..8 {
        if out.length() <= max_speed { break; }
        out *= 1.0 - Scalar::EPSILON;
    }
    with_horizontal(v, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hoverphys_core::vec3;

    #[test] fn over_limit_is_scaled_to_limit() {
        let v = clamp_horizontal(vec3(30.0, -5.0, 40.0), 10.0);
        assert_relative_eq!(horizontal(v).length(), 10.0, epsilon = 1e-5);
        assert_eq!(v.y, -5.0);
        assert_relative_eq!(v.x / v.z, 0.75, epsilon = 1e-6);
    }

    #[test] fn under_limit_is_untouched() {
        let v = vec3(1.0, 100.0, 2.0);
        assert_eq!(clamp_horizontal(v, 10.0), v);
    }

    #[test] fn huge_finite_velocity_is_clamped() {
        let v = vec3(1e20, 7.0, 1e20);
        assert!(horizontal(v).length().is_infinite());
        let c = clamp_horizontal(v, 30.0);
        assert!(horizontal(c).length() <= 30.0);
        assert_relative_eq!(c.x, c.z);
        assert_eq!(c.y, 7.0);
        assert_eq!(clamp_horizontal(c, 30.0), c);
    }

    #[test] fn non_finite_velocity_passes_through() {
        let v = vec3(f32::INFINITY, 0.0, 1.0);
        assert_eq!(clamp_horizontal(v, 30.0), v);
    }

    #[test] fn idempotent() {
        let once = clamp_horizontal(vec3(-70.0, 3.0, 12.0), 30.0);
        assert_eq!(clamp_horizontal(once, 30.0), once);
    }
}
