//! Scenario driver for the hover stepper.

pub mod scenario;
pub mod sim;
pub mod lockstep;

pub use scenario::{Ground, GroundSpec, InputSegment, ScenarioDescriptor, Spawn};
pub use sim::{Sim, Telemetry};
pub use lockstep::Lockstep;
