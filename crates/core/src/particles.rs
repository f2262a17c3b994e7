//! Flat particle position buffer.
//!
//! Particles are anonymous slots in a contiguous `f32` buffer laid out as
//! `[x0, y0, z0, x1, y1, z1, ...]`. The `z` component is always zero and is
//! kept only so the buffer can be handed to point renderers unchanged. The
//! buffer is never resized: a different count means a new store.

use crate::error::FlowError;
use crate::prng::RandomSource;

/// Components per particle in the buffer.
pub const STRIDE: usize = 3;

/// Contiguous storage for `count` particle positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleStore {
    positions: Vec<f32>,
}

impl ParticleStore {
    /// Allocates `count` particles, each placed independently and uniformly
    /// at random in `[0, width) × [0, height)`.
    ///
    /// Returns `FlowError::InvalidDimensions` if either dimension is zero
    /// or the buffer length would overflow.
    pub fn initialize<R: RandomSource + ?Sized>(
        count: usize,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = count
            .checked_mul(STRIDE)
            .ok_or(FlowError::InvalidDimensions)?;
        let mut positions = Vec::with_capacity(len);
        for _ in 0..count {
            let (x, y) = spawn_point(rng, width as f32, height as f32);
            positions.extend_from_slice(&[x, y, 0.0]);
        }
        Ok(Self { positions })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len() / STRIDE
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of particle `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn get(&self, i: usize) -> (f32, f32) {
        self.check(i);
        let base = i * STRIDE;
        (self.positions[base], self.positions[base + 1])
    }

    /// Moves particle `i` to `(x, y)`; `z` stays zero.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn set(&mut self, i: usize, x: f32, y: f32) {
        self.check(i);
        let base = i * STRIDE;
        self.positions[base] = x;
        self.positions[base + 1] = y;
        self.positions[base + 2] = 0.0;
    }

    /// The raw `3 * len()` buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    /// Iterates over `(x, y)` in slot order.
    pub fn positions(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.positions.chunks_exact(STRIDE).map(|p| (p[0], p[1]))
    }

    fn check(&self, i: usize) {
        assert!(
            i < self.len(),
            "particle index {i} out of range for store of {} particles",
            self.len()
        );
    }
}

/// Draws a uniformly random point inside the visible area.
///
/// Draws that land on the low edge, or round up onto the high edge in
/// `f32`, are redrawn so the result is strictly inside `(0, w) × (0, h)`.
pub(crate) fn spawn_point<R: RandomSource + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
) -> (f32, f32) {
    (spawn_axis(rng, width), spawn_axis(rng, height))
}

fn spawn_axis<R: RandomSource + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    // A degenerate source could redraw forever; fall back to the center.
    const MAX_DRAWS: usize = 64;
    for _ in 0..MAX_DRAWS {
        let v = (rng.next_f64() * extent as f64) as f32;
        if v > 0.0 && v < extent {
            return v;
        }
    }
    extent * 0.5
}
