//! JSON scenario descriptor: vehicle, host, ground, spawn and a scripted
//! input schedule.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use glam::{UVec2, Vec2, Vec3};
use hoverphys_dynamics::HostParams;
use hoverphys_terrain::{FlatGround, HeightField};
use hoverphys_vehicles::{ControlInput, GroundProbeResult, GroundSensor, VehicleDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum GroundSpec {
    Flat { height: f32 },
    /// `amp * sin(k x) * cos(k z)` heightfield.
    Sine { nx: u32, nz: u32, cell: f32, amp: f32, k: f32, #[serde(default)] y_offset: f32 },
}

impl Default for GroundSpec {
    fn default() -> Self { GroundSpec::Flat { height: 0.0 } }
}

/// Built ground surface.
#[derive(Clone, Debug)]
pub enum Ground {
    Flat(FlatGround),
    Field(HeightField),
}

impl GroundSensor for Ground {
    fn probe(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> GroundProbeResult {
        match self {
            Ground::Flat(g) => g.probe(origin, dir, max_distance),
            Ground::Field(g) => g.probe(origin, dir, max_distance),
        }
    }
}

impl GroundSpec {
    pub fn build(&self) -> Ground {
        match *self {
            GroundSpec::Flat { height } => Ground::Flat(FlatGround { height }),
            GroundSpec::Sine { nx, nz, cell, amp, k, y_offset } => {
                let hf = HeightField::from_fn(UVec2::new(nx, nz), Vec2::splat(cell), |x, z| {
                    amp * (k * x).sin() * (k * z).cos()
                });
                Ground::Field(hf.with_y_offset(y_offset))
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spawn {
    pub position: Vec3,
    pub yaw_deg: f32,
}

impl Default for Spawn {
    fn default() -> Self { Self { position: Vec3::new(0.0, 2.0, 0.0), yaw_deg: 0.0 } }
}

/// Hold `steer`/`throttle` for `ticks` physics ticks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputSegment {
    pub ticks: u32,
    #[serde(default)]
    pub steer: f32,
    #[serde(default)]
    pub throttle: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDescriptor {
    pub dt: f32,
    pub ticks: u32,
    /// When set, input is produced per render frame at this rate and
    /// physics ticks are derived from a fixed-step clock.
    pub frame_hz: Option<f32>,
    pub vehicle: VehicleDescriptor,
    pub host: HostParams,
    pub ground: GroundSpec,
    pub spawn: Spawn,
    pub schedule: Vec<InputSegment>,
}

impl Default for ScenarioDescriptor {
    /// Full throttle down a straight, a right-hand sweeper, a brake, then coast.
    fn default() -> Self {
        Self {
            dt: 0.02,
            ticks: 600,
            frame_hz: None,
            vehicle: VehicleDescriptor::default(),
            host: HostParams::default(),
            ground: GroundSpec::default(),
            spawn: Spawn::default(),
            schedule: vec![
                InputSegment { ticks: 150, steer: 0.0, throttle: 1.0 },
                InputSegment { ticks: 150, steer: 0.6, throttle: 1.0 },
                InputSegment { ticks: 100, steer: 0.0, throttle: -1.0 },
            ],
        }
    }
}

impl ScenarioDescriptor {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let sd: Self = serde_json::from_str(s).context("parse scenario JSON")?;
        sd.validate()?;
        Ok(sd)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&s).with_context(|| format!("load scenario {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0 && self.dt <= 1.0) { return Err(anyhow!("dt out of range")); }
        if self.ticks == 0 { return Err(anyhow!("ticks must be > 0")); }
        if let Some(hz) = self.frame_hz {
            if !(hz.is_finite() && hz > 0.0) { return Err(anyhow!("frame_hz must be > 0")); }
        }
        for (i, s) in self.schedule.iter().enumerate() {
            if !(s.steer.is_finite() && s.throttle.is_finite()) {
                return Err(anyhow!("schedule[{i}] has a non-finite axis"));
            }
        }
        match self.ground {
            GroundSpec::Flat { height } => {
                if !height.is_finite() { return Err(anyhow!("flat ground height must be finite")); }
            }
            GroundSpec::Sine { nx, nz, cell, amp, k, y_offset } => {
                if nx < 2 || nz < 2 || !(cell.is_finite() && cell > 0.0) {
                    return Err(anyhow!("sine ground needs nx, nz >= 2 and cell > 0"));
                }
                if !(amp.is_finite() && k.is_finite() && y_offset.is_finite()) {
                    return Err(anyhow!("sine ground amp, k and y_offset must be finite"));
                }
            }
        }
        if !(self.spawn.position.is_finite() && self.spawn.yaw_deg.is_finite()) {
            return Err(anyhow!("spawn position and yaw must be finite"));
        }
        if !self.host.gravity.is_finite() { return Err(anyhow!("host.gravity must be finite")); }
        if !(self.host.linear_drag >= 0.0) { return Err(anyhow!("host.linear_drag must be >= 0")); }
        self.vehicle.validate().context("vehicle")?;
        Ok(())
    }

    /// Scheduled input at physics tick `tick`; neutral once the schedule ends.
    pub fn input_at(&self, tick: u64) -> ControlInput {
        let mut start = 0u64;
        for s in &self.schedule {
            let end = start + s.ticks as u64;
            if tick < end { return ControlInput::new(s.steer, s.throttle); }
            start = end;
        }
        ControlInput::NEUTRAL
    }
}
