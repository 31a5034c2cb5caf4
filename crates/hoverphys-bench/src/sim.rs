//! One scripted hover vehicle in a reference host.

use hoverphys_core::{DeterminismContract, RigidBodyState, TickClock, VehicleId};
use hoverphys_dynamics::{Bodies, BodyDesc, HostParams};
use hoverphys_vehicles::{TickReport, VehicleInstance};
use tracing::debug;

use crate::scenario::{Ground, ScenarioDescriptor};

/* ====================== SCENE BUILDER ====================== */
pub struct Sim {
    pub scenario: ScenarioDescriptor,
    pub bodies: Bodies,
    pub host: HostParams,
    pub ground: Ground,
    pub car: VehicleInstance,
    pub car_body: VehicleId,
    clock: Option<TickClock>,
    tick: u64,
}

/// Per-tick telemetry line.
#[derive(Copy, Clone, Debug)]
pub struct Telemetry {
    pub tick: u64,
    pub state: RigidBodyState,
    pub report: TickReport,
    pub normalized_speed: f32,
}

impl Sim {
    pub fn new(scenario: ScenarioDescriptor) -> Self {
        let mut bodies = Bodies::with_capacity(1);
        let spawn = RigidBodyState::at_yaw(scenario.spawn.position, scenario.spawn.yaw_deg);
        let car_body = bodies.add(BodyDesc { state: spawn });
        let car = VehicleInstance::new(car_body, &scenario.vehicle);
        let clock = scenario.frame_hz.map(|_| {
            TickClock::new(DeterminismContract { fixed_dt: scenario.dt, ..DeterminismContract::default_contract() })
        });
        debug!(ticks = scenario.ticks, dt = scenario.dt, frame_hz = ?scenario.frame_hz, "scene built");
        Self {
            host: scenario.host,
            ground: scenario.ground.build(),
            scenario,
            bodies,
            car,
            car_body,
            clock,
            tick: 0,
        }
    }

    pub fn tick(&self) -> u64 { self.tick }

    pub fn done(&self) -> bool { self.tick >= self.scenario.ticks as u64 }

    /// One physics tick: stepper writes velocity/orientation, host integrates.
    pub fn step_tick(&mut self) -> Telemetry {
        let dt = self.scenario.dt;
        let report = self.car.step_with_host(&mut self.bodies.body_mut(self.car_body), &self.ground, dt);
        self.bodies.integrate_all(&self.host, dt);
        let state = self.bodies.state(self.car_body);
        let t = Telemetry { tick: self.tick, state, report, normalized_speed: self.car.normalized_speed(&state) };
        self.tick += 1;
        t
    }

    /// Publish scheduled input and run whatever ticks are due.
    ///
    /// Without `frame_hz` a frame is exactly one tick.
    pub fn step_frame(&mut self) -> Vec<Telemetry> {
        self.car.input.publish(self.scenario.input_at(self.tick));
        let n = match (&mut self.clock, self.scenario.frame_hz) {
            (Some(clock), Some(hz)) => clock.advance(1.0 / hz),
            _ => 1,
        };
        let left = self.scenario.ticks as u64 - self.tick.min(self.scenario.ticks as u64);
        (0..(n as u64).min(left)).map(|_| self.step_tick()).collect()
    }

    pub fn step_hash(&self) -> [u8; 32] { self.bodies.step_hash() }
}
