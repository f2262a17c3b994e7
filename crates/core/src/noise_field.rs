//! Coherent-noise sampling for the flow field.
//!
//! [`NoiseField`] wraps improved Perlin noise and returns a raw scalar in
//! roughly [-1, 1] for a point in noise space. The advector turns that
//! scalar into a heading; this module knows nothing about angles or pixels.

use noise::{NoiseFn, Perlin};

/// Scalar coherent-noise field, 2D or 3D depending on the call.
///
/// Sampling is a pure function of the inputs and the permutation seed.
#[derive(Clone)]
pub struct NoiseField {
    noise: Perlin,
}

impl NoiseField {
    /// Creates a field whose permutation table is derived from `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }

    /// Samples the field at `(x, y)`, using `t` as the third coordinate
    /// when `use_3d` is set. `t` is ignored otherwise.
    pub fn sample(&self, x: f64, y: f64, t: f64, use_3d: bool) -> f64 {
        if use_3d {
            self.noise.get([x, y, t])
        } else {
            self.noise.get([x, y])
        }
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(Perlin::DEFAULT_SEED)
    }
}
