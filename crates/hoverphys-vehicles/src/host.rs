//! The two capabilities the stepper needs from its host: a body to read and
//! write, and a ground probe.

use hoverphys_core::{Quat, RigidBodyState, Scalar, Vec3};

/// Result of one downward ground probe.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GroundProbeResult {
    /// The ray hit the ground within its range.
    pub has_hit: bool,
    /// Distance from the ray origin to the hit. Meaningless without a hit.
    pub distance: Scalar,
}

impl GroundProbeResult {
    /// Probe that found nothing.
    pub const MISS: Self = Self { has_hit: false, distance: 0.0 };

    /// Probe that hit at `distance`.
    pub fn hit(distance: Scalar) -> Self { Self { has_hit: true, distance } }
}

/// A ray the stepper wants cast this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeRay {
    /// Ray origin (body position).
    pub origin: Vec3,
    /// Unit direction (body local down).
    pub dir: Vec3,
    /// Maximum range.
    pub max_distance: Scalar,
}

/// Spatial query against the ground surface.
pub trait GroundSensor {
    /// Cast from `origin` along unit `dir`; report the first hit within `max_distance`.
    fn probe(&self, origin: Vec3, dir: Vec3, max_distance: Scalar) -> GroundProbeResult;

    /// Cast a [`ProbeRay`].
    fn probe_ray(&self, ray: &ProbeRay) -> GroundProbeResult {
        self.probe(ray.origin, ray.dir, ray.max_distance)
    }
}

impl<F> GroundSensor for F
where
    F: Fn(Vec3, Vec3, Scalar) -> GroundProbeResult,
{
    fn probe(&self, origin: Vec3, dir: Vec3, max_distance: Scalar) -> GroundProbeResult {
        self(origin, dir, max_distance)
    }
}

/// The rigid body a vehicle drives. The host owns integration.
pub trait PhysicsBody {
    /// Current state snapshot.
    fn state(&self) -> RigidBodyState;
    /// Overwrite linear velocity.
    fn set_linear_velocity(&mut self, v: Vec3);
    /// Overwrite orientation.
    fn set_orientation(&mut self, q: Quat);
    /// Store the steering smoother's yaw rate (deg/s).
    fn set_angular_velocity_yaw(&mut self, w: Scalar);
}

impl PhysicsBody for RigidBodyState {
    fn state(&self) -> RigidBodyState { *self }
    fn set_linear_velocity(&mut self, v: Vec3) { self.linear_velocity = v; }
    fn set_orientation(&mut self, q: Quat) { self.orientation = q; }
    fn set_angular_velocity_yaw(&mut self, w: Scalar) { self.angular_velocity_yaw = w; }
}
