#![deny(missing_docs)]
//! Hover-vehicle locomotion stepper.
//!
//! Usage:
//! - build a `HoverStepper` (or a `VehicleInstance` from a `VehicleDescriptor`).
//! - each fixed tick call `step(state, input, probe, dt)`, or
//!   `step_with_host(body, ground, ...)` with your own `PhysicsBody` and
//!   `GroundSensor`.
//! - integrate position yourself; the stepper only writes velocity,
//!   orientation and the persisted yaw rate.

pub mod error;
pub mod params;
pub mod input;
pub mod host;
pub mod hover;
pub mod drive;
pub mod steering;
pub mod clamp;
pub mod stepper;
pub mod vehicles;

pub use error::ConfigError;
pub use params::{TuningParameters, StepperConfig, SteeringMode, DriveAxis, VehicleDescriptor};
pub use input::{ControlInput, InputLatch};
pub use host::{GroundProbeResult, GroundSensor, PhysicsBody, ProbeRay};
pub use drive::DriveRegime;
pub use stepper::{HoverStepper, TickReport};
pub use vehicles::VehicleInstance;
