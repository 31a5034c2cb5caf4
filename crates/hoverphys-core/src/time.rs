use crate::determinism::DeterminismContract;
use crate::Scalar;

/// Turns variable frame time into a whole number of fixed physics ticks.
///
/// Frame time beyond `max_ticks_per_frame` ticks is dropped, not banked.
#[derive(Copy, Clone, Debug)]
pub struct TickClock {
    pub dt: Scalar,
    max_ticks: u32,
    accum: Scalar,
    tick: u64,
}

impl TickClock {
    pub fn new(contract: DeterminismContract) -> Self {
        Self { dt: contract.fixed_dt, max_ticks: contract.max_ticks_per_frame.max(1), accum: 0.0, tick: 0 }
    }

    /// Feed one frame of wall time; returns how many fixed ticks to run now.
    pub fn advance(&mut self, frame_dt: Scalar) -> u32 {
        if !(frame_dt.is_finite() && frame_dt > 0.0) { return 0; }
        self.accum += frame_dt;
        let mut n = 0;
        while self.accum >= self.dt && n < self.max_ticks {
            self.accum -= self.dt;
            n += 1;
        }
        if n == self.max_ticks { self.accum = self.accum.min(self.dt); }
        self.tick += n as u64;
        n
    }

    /// Ticks emitted so far.
    pub fn tick(&self) -> u64 { self.tick }
}
