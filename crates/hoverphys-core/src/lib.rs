//! Shared math types, ids, tick clock and deterministic hashing.

pub mod scalar;
pub mod ids;
pub mod types;
pub mod hash;
pub mod time;
pub mod determinism;
pub mod rng;

pub use scalar::Scalar;
pub use ids::VehicleId;
pub use types::{Vec3, Quat, RigidBodyState, vec3, horizontal, with_horizontal, clamp01, lerp, UP};
pub use hash::{StepHasher, hash_vec3, hash_quat, hash_scalar, hex32};
pub use time::TickClock;
pub use determinism::DeterminismContract;
pub use rng::XorShift64;
