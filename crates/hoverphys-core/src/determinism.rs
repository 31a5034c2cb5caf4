use crate::Scalar;

/// Fixed-step contract every hoverphys host runs under.
#[derive(Copy, Clone, Debug)]
pub struct DeterminismContract {
    pub fixed_dt: Scalar,
    /// Upper bound on ticks the clock will emit for one frame.
    pub max_ticks_per_frame: u32,
}

impl DeterminismContract {
    pub fn default_contract() -> Self {
        Self {
            fixed_dt: 1.0 / 50.0, // engine default physics rate
            max_ticks_per_frame: 8,
        }
    }
}
