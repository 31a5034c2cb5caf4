//! Ground surfaces for standalone runs and tests.

use glam::{UVec2, Vec2, Vec3};
use hoverphys_vehicles::{GroundProbeResult, GroundSensor};
use serde::{Deserialize, Serialize};

/// Bisection rounds used to refine a heightfield crossing.
const REFINE_ITERS: u32 = 20;

/// Infinite horizontal plane at `height`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatGround { pub height: f32 }

impl GroundSensor for FlatGround {
    fn probe(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> GroundProbeResult {
        let above = origin.y - self.height;
        if above < 0.0 { return GroundProbeResult::hit(0.0); }
        if dir.y >= 0.0 { return GroundProbeResult::MISS; }
        let t = above / -dir.y;
        if t <= max_distance { GroundProbeResult::hit(t) } else { GroundProbeResult::MISS }
    }
}

/// Regular grid heightfield. Heights are in world units (before `y_offset`).
///
/// Grid origin is world (0, 0) in XZ. Outside the grid there is no ground.
#[derive(Clone, Debug)]
pub struct HeightField {
    pub dims: UVec2,     // nx, nz (columns in x, rows in z)
    pub cell: Vec2,      // sx, sz (world units per cell)
    pub heights: Vec<f32>,
    pub y_offset: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl HeightField {
    /// Panics if `heights.len() != dims.x * dims.y` or a dimension is below 2.
    pub fn from_heights(dims: UVec2, cell: Vec2, heights: Vec<f32>) -> Self {
        assert!(dims.x >= 2 && dims.y >= 2, "heightfield needs at least 2x2 samples");
        assert_eq!((dims.x as usize) * (dims.y as usize), heights.len());
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for &h in &heights { min_y = min_y.min(h); max_y = max_y.max(h); }
        Self { dims, cell, heights, y_offset: 0.0, min_y, max_y }
    }

    /// Sample `f(world_x, world_z)` at every grid point.
    pub fn from_fn(dims: UVec2, cell: Vec2, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut heights = Vec::with_capacity((dims.x * dims.y) as usize);
        for z in 0..dims.y {
            for x in 0..dims.x {
                heights.push(f(x as f32 * cell.x, z as f32 * cell.y));
            }
        }
        Self::from_heights(dims, cell, heights)
    }

    pub fn with_y_offset(mut self, y_offset: f32) -> Self { self.y_offset = y_offset; self }

    /// World-space XZ extent covered by samples.
    pub fn extent(&self) -> Vec2 {
        Vec2::new((self.dims.x - 1) as f32 * self.cell.x, (self.dims.y - 1) as f32 * self.cell.y)
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        let e = self.extent();
        (0.0..=e.x).contains(&x) && (0.0..=e.y).contains(&z)
    }

    #[inline] fn idx(&self, x: i32, z: i32) -> usize {
        (x as usize) + (z as usize) * (self.dims.x as usize)
    }
    #[inline] fn h(&self, x: i32, z: i32) -> f32 { self.heights[self.idx(x, z)] }

    /// Bilinear height at local (x,z) in **meters** where origin is HF (0,0).
    /// Coordinates outside the grid clamp to its edge.
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        let nx = self.dims.x as i32; let nz = self.dims.y as i32;
        let sx = self.cell.x;        let sz = self.cell.y;
        let fx = (x / sx).clamp(0.0, (nx - 1) as f32 - 1e-5);
        let fz = (z / sz).clamp(0.0, (nz - 1) as f32 - 1e-5);
        let x0 = fx.floor() as i32; let x1 = (x0 + 1).min(nx - 1);
        let z0 = fz.floor() as i32; let z1 = (z0 + 1).min(nz - 1);
        let tx = fx - x0 as f32;    let tz = fz - z0 as f32;

        let h00 = self.h(x0, z0);
        let h10 = self.h(x1, z0);
        let h01 = self.h(x0, z1);
        let h11 = self.h(x1, z1);
        let a = h00 * (1.0 - tx) + h10 * tx;
        let b = h01 * (1.0 - tx) + h11 * tx;
        a * (1.0 - tz) + b * tz + self.y_offset
    }

    /// Signed clearance of `p` above the surface; `None` off the grid.
    #[inline]
    fn clearance(&self, p: Vec3) -> Option<f32> {
        self.contains(p.x, p.z).then(|| p.y - self.sample_height(p.x, p.z))
    }
}

impl GroundSensor for HeightField {
    /// March the ray in quarter-cell steps, then bisect the first crossing.
    fn probe(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> GroundProbeResult {
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance.is_nan() || max_distance <= 0.0 {
            return GroundProbeResult::MISS;
        }
        match self.clearance(origin) {
            Some(c) if c <= 0.0 => return GroundProbeResult::hit(0.0),
            _ => {}
        }
        // nothing to hit if the ray stays above the highest sample
        if origin.y - (self.max_y + self.y_offset) > max_distance * (-dir.y).max(0.0) {
            return GroundProbeResult::MISS;
        }

        let step = (self.cell.x.min(self.cell.y) * 0.25).max(1e-3);
        let mut t0 = 0.0_f32;
        loop {
            let t1 = (t0 + step).min(max_distance);
            if let Some(c) = self.clearance(origin + dir * t1) {
                if c <= 0.0 {
                    let (mut lo, mut hi) = (t0, t1);
                    for _ in 0..REFINE_ITERS {
                        let mid = 0.5 * (lo + hi);
                        match self.clearance(origin + dir * mid) {
                            Some(c) if c <= 0.0 => hi = mid,
                            _ => lo = mid,
                        }
                    }
                    return GroundProbeResult::hit(hi);
                }
            }
            if t1 >= max_distance { return GroundProbeResult::MISS; }
            t0 = t1;
        }
    }
}
