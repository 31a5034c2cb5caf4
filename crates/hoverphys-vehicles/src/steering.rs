//! Yaw steering.

use hoverphys_core::{clamp01, lerp, Quat, Scalar};

use crate::params::{SteeringMode, TuningParameters};

/// Yaw rates (and steer values in direct mode) at or below this do not rotate.
pub const YAW_EPSILON: Scalar = 0.01;

/// Turn authority for the current horizontal speed.
///
/// `lerp(min, max, clamp01(speed / max_speed) ^ turn_speed_curve)`. With a
/// curve below 1 authority rises steeply just above standstill.
pub fn speed_factor(speed: Scalar, p: &TuningParameters) -> Scalar {
    let normalized_speed = clamp01(speed / p.max_speed);
    lerp(p.min_turn_speed_factor, p.max_turn_speed_factor, normalized_speed.powf(p.turn_speed_curve))
}

/// Outcome of one steering update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct YawStep {
    /// Orientation after the yaw delta.
    pub orientation: Quat,
    /// Yaw rate carried into the next tick (deg/s).
    pub angular_velocity_yaw: Scalar,
    /// Rate the smoother was chasing (deg/s).
    pub target_yaw_rate: Scalar,
    /// Turn authority used (1 in direct mode).
    pub speed_factor: Scalar,
}

#[inline]
fn yawed(q: Quat, deg: Scalar) -> Quat {
    (q * Quat::from_rotation_y(deg.to_radians())).normalize()
}

/// Advance yaw by one tick. Rotation is about the body's own up axis.
pub fn step_yaw(
    mode: SteeringMode,
    orientation: Quat,
    angular_velocity_yaw: Scalar,
    steer: Scalar,
    speed: Scalar,
    p: &TuningParameters,
    dt: Scalar,
) -> YawStep {
    match mode {
        SteeringMode::Smoothed => {
            let sf = speed_factor(speed, p);
            let target = steer * p.turn_speed * sf;
            let w = lerp(angular_velocity_yaw, target, clamp01(p.rotation_smoothing * dt));
            let orientation = if w.abs() > YAW_EPSILON { yawed(orientation, w * dt) } else { orientation };
            YawStep { orientation, angular_velocity_yaw: w, target_yaw_rate: target, speed_factor: sf }
        }
        SteeringMode::Direct => {
            let rate = if steer.abs() > YAW_EPSILON { steer * p.turn_speed } else { 0.0 };
            let orientation = if rate != 0.0 { yawed(orientation, rate * dt) } else { orientation };
            YawStep { orientation, angular_velocity_yaw: rate, target_yaw_rate: rate, speed_factor: 1.0 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hoverphys_core::Vec3;

    fn p() -> TuningParameters { TuningParameters { turn_speed_curve: 0.1, ..TuningParameters::default() } }

    #[test] fn authority_is_minimum_at_rest() {
        assert_relative_eq!(speed_factor(0.0, &p()), p().min_turn_speed_factor);
    }

    #[test] fn authority_is_maximum_at_max_speed() {
        assert_relative_eq!(speed_factor(30.0, &p()), p().max_turn_speed_factor);
        assert_relative_eq!(speed_factor(300.0, &p()), p().max_turn_speed_factor);
    }

    #[test] fn low_curve_rises_steeply_off_rest() {
        // 0.01^0.1 ≈ 0.63, far above a linear ramp's 0.01
        let sf = speed_factor(0.3, &p());
        assert_relative_eq!(sf, lerp(0.2, 1.0, 0.01f32.powf(0.1)), epsilon = 1e-6);
        assert!(sf > 0.6);
    }

    #[test] fn smoothing_moves_partway_toward_target() {
        let s = step_yaw(SteeringMode::Smoothed, Quat::IDENTITY, 0.0, 1.0, 30.0, &p(), 0.02);
        assert_relative_eq!(s.target_yaw_rate, 100.0);
        assert_relative_eq!(s.angular_velocity_yaw, 100.0 * 0.16, epsilon = 1e-4);
        assert!((s.orientation * Vec3::Z).x > 0.0);
    }

    #[test] fn smoothing_factor_is_clamped() {
        let s = step_yaw(SteeringMode::Smoothed, Quat::IDENTITY, 0.0, 1.0, 30.0, &p(), 1.0);
        assert_relative_eq!(s.angular_velocity_yaw, 100.0);
    }

    #[test] fn tiny_yaw_rate_does_not_rotate() {
        let s = step_yaw(SteeringMode::Smoothed, Quat::IDENTITY, 0.005, 0.0, 0.0, &p(), 0.02);
        assert_eq!(s.orientation, Quat::IDENTITY);
    }

    #[test] fn direct_mode_ignores_speed() {
        let s = step_yaw(SteeringMode::Direct, Quat::IDENTITY, 0.0, -0.5, 0.0, &p(), 0.1);
        assert_relative_eq!(s.angular_velocity_yaw, -50.0);
        let yaw = (s.orientation * Vec3::Z).x.asin().to_degrees();
        assert_relative_eq!(yaw, -5.0, epsilon = 1e-3);
    }

    #[test] fn direct_mode_without_steer_is_still() {
        let s = step_yaw(SteeringMode::Direct, Quat::IDENTITY, 42.0, 0.0, 10.0, &p(), 0.1);
        assert_eq!(s.orientation, Quat::IDENTITY);
        assert_eq!(s.angular_velocity_yaw, 0.0);
    }
}
