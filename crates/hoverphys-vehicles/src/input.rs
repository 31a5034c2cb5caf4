//! Driver input and the latch that hands it to the physics tick.

use std::sync::Arc;

use hoverphys_core::Scalar;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Two-axis driver input, each axis in `[-1, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Lateral axis, + = turn right.
    pub steer: Scalar,
    /// Longitudinal axis, + = accelerate forward.
    pub throttle: Scalar,
}

#[inline]
fn axis(x: Scalar) -> Scalar { if x.is_finite() { x.clamp(-1.0, 1.0) } else { 0.0 } }

impl ControlInput {
    /// Clamp both axes into `[-1, 1]`; non-finite values read as 0.
    pub fn new(steer: Scalar, throttle: Scalar) -> Self {
        Self { steer: axis(steer), throttle: axis(throttle) }
    }

    /// No input.
    pub const NEUTRAL: Self = Self { steer: 0.0, throttle: 0.0 };
}

/// Latest-value mailbox between an input producer and the physics tick.
///
/// Producers call [`InputLatch::publish`] at whatever cadence they run;
/// the tick calls [`InputLatch::snapshot`] exactly once and works on the copy.
#[derive(Clone, Debug, Default)]
pub struct InputLatch {
    inner: Arc<Mutex<Latched>>,
}

#[derive(Copy, Clone, Debug, Default)]
struct Latched {
    input: ControlInput,
    seq: u64,
}

impl InputLatch {
    /// Empty latch holding neutral input.
    pub fn new() -> Self { Self::default() }

    /// Replace the held input.
    pub fn publish(&self, input: ControlInput) {
        let mut g = self.inner.lock();
        g.input = ControlInput::new(input.steer, input.throttle);
        g.seq = g.seq.wrapping_add(1);
    }

    /// Copy of the held input.
    pub fn snapshot(&self) -> ControlInput { self.inner.lock().input }

    /// Number of publishes so far; lets a consumer tell if input went stale.
    pub fn sequence(&self) -> u64 { self.inner.lock().seq }
}
