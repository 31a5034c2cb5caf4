//! Longitudinal drive, lateral grip and drift correction.

use hoverphys_core::{clamp01, horizontal, with_horizontal, Quat, Scalar, Vec3, UP};
use serde::{Deserialize, Serialize};

use crate::params::{DriveAxis, TuningParameters};

/// Forward speed above which negative throttle brakes instead of reversing.
pub const BRAKE_SPEED_THRESHOLD: Scalar = 0.5;
/// Fraction of lateral slide kept per tick by the grip blend.
pub const LATERAL_RETENTION: Scalar = 0.1;
/// Drift angles at or below this (degrees) get no correction.
pub const DRIFT_ANGLE_THRESHOLD_DEG: Scalar = 1.0;

/// Which branch of the drive produced this tick's force.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveRegime {
    /// No throttle.
    #[default]
    Idle,
    /// Positive throttle.
    Accelerate,
    /// Negative throttle while still rolling forward.
    Brake,
    /// Negative throttle from (near) standstill.
    Reverse,
}

/// Drive direction: the chosen body axis flattened onto the ground plane.
pub fn drive_direction(orientation: Quat, axis: DriveAxis) -> Vec3 {
    let a = match axis {
        DriveAxis::Forward => orientation * Vec3::Z,
        DriveAxis::NegRight => -(orientation * Vec3::X),
    };
    horizontal(a).normalize_or_zero()
}

/// Acceleration from the throttle axis.
///
/// Two regimes for negative throttle: above [`BRAKE_SPEED_THRESHOLD`] forward
/// speed it brakes at full `brake_force` regardless of throttle magnitude,
/// otherwise it reverses scaled by throttle.
pub fn drive_acceleration(
    throttle: Scalar,
    forward: Vec3,
    velocity: Vec3,
    p: &TuningParameters,
    deadzone: Scalar,
) -> (Vec3, DriveRegime) {
    if throttle.abs() <= deadzone {
        return (Vec3::ZERO, DriveRegime::Idle);
    }
    if throttle > 0.0 {
        return (forward * throttle * p.acceleration_force, DriveRegime::Accelerate);
    }
    let forward_speed = velocity.dot(forward);
    if forward_speed > BRAKE_SPEED_THRESHOLD {
        (-forward * p.brake_force, DriveRegime::Brake)
    } else {
        (forward * throttle * p.reverse_force, DriveRegime::Reverse)
    }
}

/// Keep the forward part of horizontal velocity and [`LATERAL_RETENTION`] of
/// the sideways part. Vertical velocity is untouched.
pub fn apply_lateral_grip(velocity: Vec3, forward: Vec3) -> Vec3 {
    if forward == Vec3::ZERO {
        return velocity;
    }
    let h = horizontal(velocity);
    let forward_velocity = forward * h.dot(forward);
    let lateral_velocity = h - forward_velocity;
    with_horizontal(velocity, forward_velocity + lateral_velocity * LATERAL_RETENTION)
}

/// Signed yaw angle (degrees) from `forward` to the horizontal velocity.
/// Positive when the body slides to its right.
pub fn drift_angle_deg(forward: Vec3, velocity: Vec3) -> Scalar {
    let h = horizontal(velocity);
    let right = UP.cross(forward);
    h.dot(right).atan2(h.dot(forward)).to_degrees()
}

/// Lateral acceleration pulling velocity back toward the heading.
pub fn drift_correction(forward: Vec3, velocity: Vec3, p: &TuningParameters) -> Vec3 {
    let speed = horizontal(velocity).length();
    if speed <= 0.0 || speed < p.min_drift_speed {
        return Vec3::ZERO;
    }
    let angle = drift_angle_deg(forward, velocity);
    if angle.abs() <= DRIFT_ANGLE_THRESHOLD_DEG {
        return Vec3::ZERO;
    }
    let drift_intensity = clamp01(angle.abs() / 90.0);
    let speed_ratio = clamp01(speed / p.max_speed);
    let right = UP.cross(forward);
    right * -angle.signum() * p.drift_force * drift_intensity * speed_ratio * p.lateral_grip
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hoverphys_core::vec3;

    fn p() -> TuningParameters { TuningParameters::default() }

    #[test] fn brakes_at_full_force_while_rolling_forward() {
        let (a, r) = drive_acceleration(-1.0, Vec3::Z, vec3(0.0, 0.0, 0.6), &p(), 0.0);
        assert_eq!(r, DriveRegime::Brake);
        assert_eq!(a, vec3(0.0, 0.0, -30.0));
        // magnitude ignores throttle
        let (a, _) = drive_acceleration(-0.1, Vec3::Z, vec3(0.0, 0.0, 0.6), &p(), 0.0);
        assert_eq!(a, vec3(0.0, 0.0, -30.0));
    }

    #[test] fn reverses_when_slow() {
        let (a, r) = drive_acceleration(-1.0, Vec3::Z, vec3(0.0, 0.0, 0.3), &p(), 0.0);
        assert_eq!(r, DriveRegime::Reverse);
        assert_eq!(a, vec3(0.0, 0.0, -20.0));
        let (a, _) = drive_acceleration(-0.5, Vec3::Z, Vec3::ZERO, &p(), 0.0);
        assert_eq!(a, vec3(0.0, 0.0, -10.0));
    }

    #[test] fn threshold_is_strict() {
        let (_, r) = drive_acceleration(-1.0, Vec3::Z, vec3(0.0, 0.0, 0.5), &p(), 0.0);
        assert_eq!(r, DriveRegime::Reverse);
    }

    #[test] fn accelerates_along_forward() {
        let (a, r) = drive_acceleration(0.5, Vec3::X, Vec3::ZERO, &p(), 0.0);
        assert_eq!(r, DriveRegime::Accelerate);
        assert_eq!(a, vec3(25.0, 0.0, 0.0));
    }

    #[test] fn deadzone_suppresses_small_throttle() {
        let (a, r) = drive_acceleration(0.05, Vec3::Z, Vec3::ZERO, &p(), 0.1);
        assert_eq!((a, r), (Vec3::ZERO, DriveRegime::Idle));
        let (a, r) = drive_acceleration(0.0, Vec3::Z, Vec3::ZERO, &p(), 0.0);
        assert_eq!((a, r), (Vec3::ZERO, DriveRegime::Idle));
    }

    #[test] fn drive_direction_is_flat_and_unit() {
        let pitched = Quat::from_rotation_x(0.3);
        let f = drive_direction(pitched, DriveAxis::Forward);
        assert_eq!(f.y, 0.0);
        assert_relative_eq!(f.length(), 1.0, epsilon = 1e-6);
        let nr = drive_direction(Quat::IDENTITY, DriveAxis::NegRight);
        assert_eq!(nr, vec3(-1.0, 0.0, 0.0));
    }

    #[test] fn grip_removes_ninety_percent_of_slide() {
        let v = apply_lateral_grip(vec3(10.0, -2.0, 5.0), Vec3::Z);
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-6);
        assert_eq!(v.y, -2.0);
        assert_relative_eq!(v.z, 5.0, epsilon = 1e-6);
    }

    #[test] fn drift_angle_sign_follows_slide_side() {
        assert!(drift_angle_deg(Vec3::Z, vec3(1.0, 0.0, 1.0)) > 0.0);
        assert!(drift_angle_deg(Vec3::Z, vec3(-1.0, 0.0, 1.0)) < 0.0);
        assert_relative_eq!(drift_angle_deg(Vec3::Z, vec3(1.0, 0.0, 1.0)), 45.0, epsilon = 1e-4);
    }

    #[test] fn drift_correction_pushes_against_slide() {
        // sliding right at 45 degrees at max speed
        let v = vec3(1.0, 0.0, 1.0).normalize() * 30.0;
        let a = drift_correction(Vec3::Z, v, &p());
        assert!(a.x < 0.0);
        assert_eq!(a.y, 0.0);
        assert_relative_eq!(a.length(), 20.0 * 0.5 * 1.0 * 0.8, epsilon = 1e-3);
    }

    #[test] fn no_drift_correction_when_slow_or_aligned() {
        assert_eq!(drift_correction(Vec3::Z, vec3(2.0, 0.0, 2.0), &p()), Vec3::ZERO);
        assert_eq!(drift_correction(Vec3::Z, vec3(0.1, 0.0, 20.0), &p()), Vec3::ZERO);
    }
}
