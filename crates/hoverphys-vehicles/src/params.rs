//! Per-vehicle tuning and stepper configuration.
//!
//! Both are set once at vehicle creation and never touched by the stepper.
//! Every field has a default so partial JSON descriptions load.

use std::path::Path;

use hoverphys_core::Scalar;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Immutable handling constants of one vehicle.
///
/// Forces are accelerations (m/s²), speeds m/s, turn rates degrees/s.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    /// Forward acceleration at full throttle.
    pub acceleration_force: Scalar,
    /// Horizontal speed cap.
    pub max_speed: Scalar,
    /// Deceleration applied while braking from forward motion.
    pub brake_force: Scalar,
    /// Reverse acceleration at full negative throttle.
    pub reverse_force: Scalar,
    /// Yaw rate at full steer and full turn authority.
    pub turn_speed: Scalar,
    /// Turn authority at rest.
    pub min_turn_speed_factor: Scalar,
    /// Turn authority at `max_speed`.
    pub max_turn_speed_factor: Scalar,
    /// Exponent shaping the authority ramp between rest and `max_speed`.
    pub turn_speed_curve: Scalar,
    /// Rate (1/s) at which yaw rate chases its target.
    pub rotation_smoothing: Scalar,
    /// Target clearance above the ground.
    pub hover_height: Scalar,
    /// Spring gain of the hover controller.
    pub hover_force: Scalar,
    /// Damping gain on vertical velocity.
    pub hover_damping: Scalar,
    /// Scale of the drift correction, 0..1.
    pub lateral_grip: Scalar,
    /// Peak drift correction acceleration.
    pub drift_force: Scalar,
    /// Below this horizontal speed no drift correction is applied.
    pub min_drift_speed: Scalar,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            acceleration_force: 50.0,
            max_speed: 30.0,
            brake_force: 30.0,
            reverse_force: 20.0,
            turn_speed: 100.0,
            min_turn_speed_factor: 0.2,
            max_turn_speed_factor: 1.0,
            turn_speed_curve: 0.5,
            rotation_smoothing: 8.0,
            hover_height: 2.0,
            hover_force: 50.0,
            hover_damping: 5.0,
            lateral_grip: 0.8,
            drift_force: 20.0,
            min_drift_speed: 5.0,
        }
    }
}

impl TuningParameters {
    /// Maximum ground probe range: twice the hover height.
    #[inline] pub fn probe_range(&self) -> Scalar { 2.0 * self.hover_height }

    /// Reject values that would make the stepper divide by zero or produce NaN.
    ///
    /// Values are otherwise trusted; nothing is clamped here.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&'static str, Scalar); 15] = [
            ("acceleration_force", self.acceleration_force),
            ("max_speed", self.max_speed),
            ("brake_force", self.brake_force),
            ("reverse_force", self.reverse_force),
            ("turn_speed", self.turn_speed),
            ("min_turn_speed_factor", self.min_turn_speed_factor),
            ("max_turn_speed_factor", self.max_turn_speed_factor),
            ("turn_speed_curve", self.turn_speed_curve),
            ("rotation_smoothing", self.rotation_smoothing),
            ("hover_height", self.hover_height),
            ("hover_force", self.hover_force),
            ("hover_damping", self.hover_damping),
            ("lateral_grip", self.lateral_grip),
            ("drift_force", self.drift_force),
            ("min_drift_speed", self.min_drift_speed),
        ];
        for (field, v) in fields {
            if !v.is_finite() {
                return Err(ConfigError::InvalidValue { field, reason: format!("{v} is not finite") });
            }
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::InvalidValue { field: "max_speed", reason: "must be > 0".into() });
        }
        if self.hover_height <= 0.0 {
            return Err(ConfigError::InvalidValue { field: "hover_height", reason: "must be > 0".into() });
        }
        Ok(())
    }
}

/// How yaw is produced from the steer axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringMode {
    /// Speed-scaled, exponentially smoothed yaw rate.
    #[default]
    Smoothed,
    /// Fixed rate `steer × turn_speed`, no smoothing.
    Direct,
}

/// Which body axis the throttle pushes along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveAxis {
    /// Body +Z.
    #[default]
    Forward,
    /// Body −X, for meshes modeled nose-left.
    NegRight,
}

/// Configuration-time choices between the controller variants.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    /// Steering policy.
    pub steering: SteeringMode,
    /// Remove 90% of lateral slide every tick.
    pub lateral_damping: bool,
    /// Apply the speed-scaled drift correction force.
    pub drift_grip: bool,
    /// Drive axis convention.
    pub drive_axis: DriveAxis,
    /// Throttle magnitudes at or below this produce no drive force.
    pub input_deadzone: Scalar,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            steering: SteeringMode::Smoothed,
            lateral_damping: true,
            drift_grip: false,
            drive_axis: DriveAxis::Forward,
            input_deadzone: 0.0,
        }
    }
}

/// Everything needed to build one vehicle's stepper.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleDescriptor {
    /// Handling constants.
    pub tuning: TuningParameters,
    /// Variant switches.
    pub stepper: StepperConfig,
}

impl VehicleDescriptor {
    /// Parse and validate a JSON description.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let d: Self = serde_json::from_str(s)?;
        d.validate()?;
        Ok(d)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Validate tuning and config together.
    pub fn validate(&self) -> Result<()> {
        self.tuning.validate()?;
        let dz = self.stepper.input_deadzone;
        if !(dz.is_finite() && (0.0..1.0).contains(&dz)) {
            return Err(ConfigError::InvalidValue { field: "input_deadzone", reason: format!("{dz} not in [0, 1)") });
        }
        Ok(())
    }
}
