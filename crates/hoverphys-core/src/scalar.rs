/// Simulation scalar. All tuning and state is single precision.
pub type Scalar = f32;
