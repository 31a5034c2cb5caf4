use serde::{Deserialize, Serialize};
use crate::hash::{StepHasher, hash_quat, hash_scalar, hash_vec3};
use crate::Scalar;

pub use glam::{Quat, Vec3};

/// World up. Y-up, forward is +Z, right is +X.
pub const UP: Vec3 = Vec3::Y;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }

/// XZ part of `v` (y zeroed).
#[inline] pub fn horizontal(v: Vec3) -> Vec3 { Vec3::new(v.x, 0.0, v.z) }

/// Replace the XZ part of `v` with `h`, keeping `v.y`.
#[inline] pub fn with_horizontal(v: Vec3, h: Vec3) -> Vec3 { Vec3::new(h.x, v.y, h.z) }

#[inline] pub fn clamp01(x: Scalar) -> Scalar { x.clamp(0.0, 1.0) }

/// Unclamped linear interpolation.
#[inline] pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar { a + (b - a) * t }

/// Per-tick rigid body state of one vehicle.
///
/// `angular_velocity_yaw` is in degrees/second about the up axis and is the
/// steering smoother's memory between ticks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity_yaw: Scalar,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity_yaw: 0.0,
        }
    }
}

impl RigidBodyState {
    pub fn at(position: Vec3) -> Self { Self { position, ..Self::default() } }

    /// Body at `position` facing `yaw_deg` degrees clockwise (seen from above) from +Z.
    pub fn at_yaw(position: Vec3, yaw_deg: Scalar) -> Self {
        Self { position, orientation: Quat::from_rotation_y(yaw_deg.to_radians()), ..Self::default() }
    }

    #[inline] pub fn forward(&self) -> Vec3 { self.orientation * Vec3::Z }
    #[inline] pub fn right(&self) -> Vec3 { self.orientation * Vec3::X }
    #[inline] pub fn up(&self) -> Vec3 { self.orientation * Vec3::Y }

    #[inline] pub fn horizontal_speed(&self) -> Scalar { horizontal(self.linear_velocity).length() }

    pub fn hash_to(&self, h: &mut StepHasher) {
        hash_vec3(h, &self.position);
        hash_quat(h, &self.orientation);
        hash_vec3(h, &self.linear_velocity);
        hash_scalar(h, self.angular_velocity_yaw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test] fn positive_yaw_turns_forward_toward_right() {
        let s = RigidBodyState::at_yaw(Vec3::ZERO, 90.0);
        let f = s.forward();
        assert_relative_eq!(f.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(f.z, 0.0, epsilon = 1e-6);
    }

    #[test] fn with_horizontal_keeps_vertical() {
        let v = with_horizontal(vec3(1.0, -4.0, 2.0), vec3(7.0, 99.0, 8.0));
        assert_eq!(v, vec3(7.0, -4.0, 8.0));
    }
}
