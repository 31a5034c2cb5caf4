//! Runs two identically built sims side by side and bit-compares their
//! state hash after every tick.

use anyhow::{anyhow, Result};
use hoverphys_core::hex32;

use crate::scenario::ScenarioDescriptor;
use crate::sim::{Sim, Telemetry};

pub struct Lockstep {
    pub active: Sim,
    pub shadow: Sim,
    eq_ticks: u64,
}

impl Lockstep {
    pub fn new(scenario: ScenarioDescriptor) -> Self {
        Self { active: Sim::new(scenario.clone()), shadow: Sim::new(scenario), eq_ticks: 0 }
    }

    /// Ticks that matched so far.
    pub fn equal_ticks(&self) -> u64 { self.eq_ticks }

    pub fn done(&self) -> bool { self.active.done() }

    /// Bit-compare path (exact hash equality). Returns the active sim's telemetry.
    pub fn step_frame(&mut self) -> Result<Vec<Telemetry>> {
        let ta = self.active.step_frame();
        let ts = self.shadow.step_frame();
        if ta.len() != ts.len() {
            return Err(anyhow!("lockstep tick count diverged: {} vs {}", ta.len(), ts.len()));
        }
        let (ha, hs) = (self.active.step_hash(), self.shadow.step_hash());
        if ha != hs {
            return Err(anyhow!(
                "lockstep diverged at tick {}: active={} shadow={}",
                self.active.tick(), hex32(ha), hex32(hs)
            ));
        }
        self.eq_ticks += ta.len() as u64;
        Ok(ta)
    }
}
