//! One fixed tick of hover locomotion.
//!
//! Order is fixed: hover spring, drive (with drift correction and grip),
//! yaw steering, speed clamp. [`HoverStepper::step`] is a pure function of
//! its arguments; [`HoverStepper::step_with_host`] wraps it for a live body.

use hoverphys_core::{clamp01, RigidBodyState, Scalar, Vec3, UP};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::clamp::clamp_horizontal;
use crate::drive::{apply_lateral_grip, drift_correction, drive_acceleration, drive_direction, DriveRegime};
use crate::host::{GroundProbeResult, GroundSensor, PhysicsBody, ProbeRay};
use crate::hover::hover_force;
use crate::input::ControlInput;
use crate::params::{StepperConfig, TuningParameters};
use crate::steering::step_yaw;

/// What each stage did during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Probe hit within range.
    pub grounded: bool,
    /// Probe distance (0 on a miss).
    pub probe_distance: Scalar,
    /// Vertical hover acceleration applied.
    pub hover_force: Scalar,
    /// Throttle acceleration applied.
    pub drive_accel: Vec3,
    /// Drive branch taken.
    pub regime: DriveRegime,
    /// Drift correction acceleration applied.
    pub drift_accel: Vec3,
    /// Turn authority used.
    pub speed_factor: Scalar,
    /// Yaw rate target (deg/s).
    pub target_yaw_rate: Scalar,
    /// Yaw rate after smoothing (deg/s).
    pub yaw_rate: Scalar,
    /// The speed clamp changed the velocity.
    pub clamped: bool,
}

/// Hover-vehicle locomotion model for one vehicle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoverStepper {
    params: TuningParameters,
    config: StepperConfig,
}

impl HoverStepper {
    /// Build a stepper. Parameters are trusted as given.
    pub fn new(params: TuningParameters, config: StepperConfig) -> Self {
        debug!(?config, max_speed = params.max_speed, hover_height = params.hover_height, "hover stepper created");
        Self { params, config }
    }

    /// Handling constants.
    pub fn params(&self) -> &TuningParameters { &self.params }

    /// Variant switches.
    pub fn config(&self) -> &StepperConfig { &self.config }

    /// The ground ray to cast for `state`: from the body along its local
    /// down axis, `2 × hover_height` long.
    pub fn probe_request(&self, state: &RigidBodyState) -> ProbeRay {
        ProbeRay {
            origin: state.position,
            dir: (-state.up()).normalize_or_zero(),
            max_distance: self.params.probe_range(),
        }
    }

    /// `|v| / max_speed` in `[0, 1]`, full 3D speed. Feeds camera FOV.
    pub fn normalized_speed(&self, state: &RigidBodyState) -> Scalar {
        clamp01(state.linear_velocity.length() / self.params.max_speed)
    }

    /// Advance `state` by `dt`. Never fails; a non-positive or non-finite
    /// `dt` leaves the state unchanged.
    pub fn step(
        &self,
        state: &RigidBodyState,
        input: ControlInput,
        probe: GroundProbeResult,
        dt: Scalar,
    ) -> (RigidBodyState, TickReport) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "skipping tick with unusable dt");
            return (*state, TickReport::default());
        }
        let p = &self.params;
        let input = ControlInput::new(input.steer, input.throttle);
        let mut s = *state;
        let mut report = TickReport {
            grounded: probe.has_hit && probe.distance <= p.probe_range(),
            probe_distance: if probe.has_hit { probe.distance } else { 0.0 },
            ..TickReport::default()
        };

        // hover
        let fy = hover_force(probe, s.linear_velocity.y, p);
        s.linear_velocity += UP * (fy * dt);
        report.hover_force = fy;

        // drive
        let forward = drive_direction(s.orientation, self.config.drive_axis);
        let (a, regime) = drive_acceleration(input.throttle, forward, s.linear_velocity, p, self.config.input_deadzone);
        let drift = if self.config.drift_grip { drift_correction(forward, s.linear_velocity, p) } else { Vec3::ZERO };
        s.linear_velocity += (a + drift) * dt;
        if self.config.lateral_damping {
            s.linear_velocity = apply_lateral_grip(s.linear_velocity, forward);
        }
        report.drive_accel = a;
        report.regime = regime;
        report.drift_accel = drift;

        // steering
        let yaw = step_yaw(
            self.config.steering,
            s.orientation,
            s.angular_velocity_yaw,
            input.steer,
            s.horizontal_speed(),
            p,
            dt,
        );
        s.orientation = yaw.orientation;
        s.angular_velocity_yaw = yaw.angular_velocity_yaw;
        report.speed_factor = yaw.speed_factor;
        report.target_yaw_rate = yaw.target_yaw_rate;
        report.yaw_rate = yaw.angular_velocity_yaw;

        // clamp
        let unclamped = s.linear_velocity;
        s.linear_velocity = clamp_horizontal(unclamped, p.max_speed);
        report.clamped = s.linear_velocity != unclamped;

        trace!(
            hover = report.hover_force,
            regime = ?report.regime,
            yaw_rate = report.yaw_rate,
            speed = s.horizontal_speed(),
            clamped = report.clamped,
            "tick"
        );
        (s, report)
    }

    /// Probe `ground`, step the body's current state and write velocity,
    /// orientation and yaw rate back. Position is left to the host.
    pub fn step_with_host<B, G>(&self, body: &mut B, ground: &G, input: ControlInput, dt: Scalar) -> TickReport
    where
        B: PhysicsBody + ?Sized,
        G: GroundSensor + ?Sized,
    {
        let state = body.state();
        let probe = ground.probe_ray(&self.probe_request(&state));
        let (next, report) = self.step(&state, input, probe, dt);
        body.set_linear_velocity(next.linear_velocity);
        body.set_orientation(next.orientation);
        body.set_angular_velocity_yaw(next.angular_velocity_yaw);
        report
    }
}
