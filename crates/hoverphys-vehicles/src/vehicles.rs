//! A vehicle instance: id, stepper and the input latch it reads.
//!
//! This type is *world-agnostic*: the caller passes its body and ground
//! sensor each tick. The latch is snapshotted once per tick so every stage
//! sees the same input even while a producer keeps publishing.

use hoverphys_core::{RigidBodyState, Scalar, VehicleId};
use tracing::trace_span;

use crate::host::{GroundSensor, PhysicsBody};
use crate::input::{ControlInput, InputLatch};
use crate::params::VehicleDescriptor;
use crate::stepper::{HoverStepper, TickReport};

/// Runtime container you update every tick.
#[derive(Clone, Debug)]
pub struct VehicleInstance {
    /// Host-assigned id, used for log context.
    pub id: VehicleId,
    /// Locomotion model.
    pub stepper: HoverStepper,
    /// Where the driver's input arrives.
    pub input: InputLatch,
    last_input: ControlInput,
}

impl VehicleInstance {
    /// Build from a descriptor with a fresh latch.
    pub fn new(id: VehicleId, desc: &VehicleDescriptor) -> Self {
        Self {
            id,
            stepper: HoverStepper::new(desc.tuning, desc.stepper),
            input: InputLatch::new(),
            last_input: ControlInput::NEUTRAL,
        }
    }

    /// Input used by the most recent tick.
    pub fn last_input(&self) -> ControlInput { self.last_input }

    /// Advance one physics tick against a live body.
    pub fn step_with_host<B, G>(&mut self, body: &mut B, ground: &G, dt: Scalar) -> TickReport
    where
        B: PhysicsBody + ?Sized,
        G: GroundSensor + ?Sized,
    {
        let _span = trace_span!("vehicle", id = self.id.0).entered();
        let input = self.input.snapshot();
        self.last_input = input;
        self.stepper.step_with_host(body, ground, input, dt)
    }

    /// `|v| / max_speed` of `state`, clamped to `[0, 1]`.
    pub fn normalized_speed(&self, state: &RigidBodyState) -> Scalar {
        self.stepper.normalized_speed(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::GroundProbeResult;
    use hoverphys_core::{vec3, Vec3};

    #[test] fn tick_uses_latched_input() {
        let mut car = VehicleInstance::new(VehicleId(7), &VehicleDescriptor::default());
        let mut body = RigidBodyState::at(vec3(0.0, 2.0, 0.0));
        let ground = |_o: Vec3, _d: Vec3, _m: f32| GroundProbeResult::hit(2.0);

        car.step_with_host(&mut body, &ground, 0.02);
        assert_eq!(body.linear_velocity, Vec3::ZERO);

        car.input.publish(ControlInput::new(0.0, 1.0));
        let r = car.step_with_host(&mut body, &ground, 0.02);
        assert!(body.linear_velocity.z > 0.0);
        assert_eq!(car.last_input(), ControlInput::new(0.0, 1.0));
        assert_eq!(r.regime, crate::drive::DriveRegime::Accelerate);
    }
}
