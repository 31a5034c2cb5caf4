//! Minimal host that owns hover bodies and integrates them after the
//! locomotion stepper has written velocity and orientation.

use hoverphys_core::{hash_scalar, Quat, RigidBodyState, Scalar, StepHasher, Vec3, VehicleId};
use hoverphys_vehicles::PhysicsBody;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// World-level integration settings.
///
/// Defaults mirror the hover racer's rigidbody setup: no gravity (the hover
/// spring carries the body) and linear damping of 2.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostParams {
    pub gravity: Vec3,
    /// Linear damping coefficient (1/s).
    pub linear_drag: Scalar,
}

impl Default for HostParams {
    fn default() -> Self { Self { gravity: Vec3::ZERO, linear_drag: 2.0 } }
}

/// Input descriptor when creating a body.
#[derive(Copy, Clone, Debug, Default)]
pub struct BodyDesc {
    pub state: RigidBodyState,
}

/// SoA body storage with deterministic ID = index semantics.
#[derive(Clone, Debug, Default)]
pub struct Bodies {
    pos: Vec<Vec3>,
    rot: Vec<Quat>,
    linvel: Vec<Vec3>,
    yaw_rate: Vec<Scalar>,
}

impl Bodies {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            pos:      Vec::with_capacity(cap),
            rot:      Vec::with_capacity(cap),
            linvel:   Vec::with_capacity(cap),
            yaw_rate: Vec::with_capacity(cap),
        }
    }

    pub fn add(&mut self, desc: BodyDesc) -> VehicleId {
        let s = desc.state;
        self.pos.push(s.position);
        self.rot.push(s.orientation);
        self.linvel.push(s.linear_velocity);
        self.yaw_rate.push(s.angular_velocity_yaw);
        let id = VehicleId((self.pos.len() as u32) - 1);
        debug!(%id, pos = ?s.position, "body added");
        id
    }

    #[inline] pub fn len(&self) -> usize { self.pos.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.pos.is_empty() }

    /// Semi-implicit Euler: gravity, then damping, then position.
    ///
    /// Damping is `v *= 1 / (1 + drag × dt)`, which never reverses velocity.
    pub fn integrate_all(&mut self, host: &HostParams, dt: Scalar) {
        let damp = 1.0 / (1.0 + host.linear_drag.max(0.0) * dt);
        for i in 0..self.len() {
            self.linvel[i] += host.gravity * dt;
            self.linvel[i] *= damp;
            self.pos[i]    += self.linvel[i] * dt;
        }
    }

    // -------- Accessors used by drivers/hash --------
    #[inline] pub fn state(&self, id: VehicleId) -> RigidBodyState {
        let i = id.0 as usize;
        RigidBodyState {
            position: self.pos[i],
            orientation: self.rot[i],
            linear_velocity: self.linvel[i],
            angular_velocity_yaw: self.yaw_rate[i],
        }
    }

    /// Mutable [`PhysicsBody`] view of one body.
    pub fn body_mut(&mut self, id: VehicleId) -> BodyMut<'_> { BodyMut { bodies: self, i: id.0 as usize } }

    // Iterator for hashing in stable order
    pub fn ids(&self) -> impl ExactSizeIterator<Item = VehicleId> + '_ {
        (0..self.len() as u32).map(VehicleId)
    }

    /// Blake3 digest of every body in id order.
    pub fn step_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        hash_scalar(&mut h, self.len() as f32);
        for id in self.ids() { self.state(id).hash_to(&mut h); }
        h.finalize()
    }
}

/// Borrowed handle to one body in [`Bodies`].
pub struct BodyMut<'a> {
    bodies: &'a mut Bodies,
    i: usize,
}

impl PhysicsBody for BodyMut<'_> {
    fn state(&self) -> RigidBodyState { self.bodies.state(VehicleId(self.i as u32)) }
    fn set_linear_velocity(&mut self, v: Vec3) { self.bodies.linvel[self.i] = v; }
    fn set_orientation(&mut self, q: Quat) { self.bodies.rot[self.i] = q; }
    fn set_angular_velocity_yaw(&mut self, w: Scalar) { self.bodies.yaw_rate[self.i] = w; }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hoverphys_core::vec3;
    use hoverphys_terrain::FlatGround;
    use hoverphys_vehicles::{ControlInput, HoverStepper, StepperConfig, TuningParameters};

    #[test] fn ids_are_indices() {
        let mut b = Bodies::with_capacity(2);
        assert_eq!(b.add(BodyDesc::default()), VehicleId(0));
        assert_eq!(b.add(BodyDesc::default()), VehicleId(1));
        assert_eq!(b.ids().len(), 2);
    }

    #[test] fn damping_shrinks_speed_without_reversing() {
        let mut b = Bodies::default();
        let id = b.add(BodyDesc { state: RigidBodyState { linear_velocity: vec3(10.0, 0.0, 0.0), ..Default::default() } });
        b.integrate_all(&HostParams { gravity: Vec3::ZERO, linear_drag: 1000.0 }, 0.02);
        let v = b.state(id).linear_velocity.x;
        assert!(v > 0.0 && v < 10.0);
    }

    #[test] fn gravity_and_position_integrate() {
        let mut b = Bodies::default();
        let id = b.add(BodyDesc::default());
        b.integrate_all(&HostParams { gravity: vec3(0.0, -10.0, 0.0), linear_drag: 0.0 }, 0.1);
        let s = b.state(id);
        assert_relative_eq!(s.linear_velocity.y, -1.0);
        assert_relative_eq!(s.position.y, -0.1);
    }

    #[test] fn body_view_is_a_physics_body() {
        let mut b = Bodies::default();
        let id = b.add(BodyDesc { state: RigidBodyState::at(vec3(0.0, 2.0, 0.0)) });
        let st = HoverStepper::new(TuningParameters::default(), StepperConfig::default());
        st.step_with_host(&mut b.body_mut(id), &FlatGround { height: 0.0 }, ControlInput::new(0.0, 1.0), 0.02);
        assert!(b.state(id).linear_velocity.z > 0.0);
        assert_eq!(b.state(id).position, vec3(0.0, 2.0, 0.0));
    }

    #[test] fn hover_settles_under_gravity() {
        let mut b = Bodies::default();
        let id = b.add(BodyDesc { state: RigidBodyState::at(vec3(0.0, 3.0, 0.0)) });
        let host = HostParams { gravity: vec3(0.0, -9.81, 0.0), linear_drag: 0.0 };
        let st = HoverStepper::new(TuningParameters::default(), StepperConfig::default());
        let ground = FlatGround { height: 0.0 };
        for _ in 0..2000 {
            st.step_with_host(&mut b.body_mut(id), &ground, ControlInput::NEUTRAL, 0.02);
            b.integrate_all(&host, 0.02);
        }
        // spring sag: (1 - d/h) * k = g  =>  d = h * (1 - g/k)
        let expected = 2.0 * (1.0 - 9.81 / 50.0);
        assert_relative_eq!(b.state(id).position.y, expected, epsilon = 1e-2);
    }

    #[test] fn hash_tracks_state() {
        let mut a = Bodies::default();
        a.add(BodyDesc::default());
        let mut b = a.clone();
        assert_eq!(a.step_hash(), b.step_hash());
        b.integrate_all(&HostParams { gravity: vec3(0.0, -1.0, 0.0), linear_drag: 0.0 }, 0.1);
        assert_ne!(a.step_hash(), b.step_hash());
    }
}
