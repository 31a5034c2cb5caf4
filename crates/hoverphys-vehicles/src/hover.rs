//! Ground-hover spring: a PD controller on probe distance.

use hoverphys_core::Scalar;

use crate::host::GroundProbeResult;
use crate::params::TuningParameters;

/// Vertical acceleration holding the body at `hover_height`.
///
/// Zero without a hit or when the hit is beyond `2 × hover_height`.
/// The distance ratio is not clamped, so hits between one and two hover
/// heights pull the body down.
pub fn hover_force(probe: GroundProbeResult, vertical_velocity: Scalar, p: &TuningParameters) -> Scalar {
    if !probe.has_hit || probe.distance > p.probe_range() {
        return 0.0;
    }
    let distance_ratio = probe.distance / p.hover_height;
    let spring = (1.0 - distance_ratio) * p.hover_force;
    let damping = -vertical_velocity * p.hover_damping;
    spring + damping
}
