//! Per-frame particle advection through the noise field.
//!
//! Each frame every particle samples the field at its scaled position,
//! turns the sample into a heading according to the [`AngleMode`], takes
//! one fixed-length step along it, and is re-seeded at a random position if
//! the step leaves the visible area. There is no wraparound and no edge
//! clamping.
//!
//! Step length does not depend on the frame delta: visual speed follows
//! the frame rate, not the wall clock.
//!
//! [`AngleMode`]: crate::config::AngleMode

use crate::config::SimulationConfig;
use crate::noise_field::NoiseField;
use crate::particles::{spawn_point, ParticleStore};
use crate::prng::RandomSource;
use crate::viewport::Viewport;

/// Depth coordinate increment per frame while 3D noise is enabled.
pub const DEPTH_STEP: f64 = 0.01;

/// Timing of the frame being produced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the loop started.
    pub elapsed: f64,
    /// Seconds since the previous frame. Not used by the displacement math.
    pub delta: f64,
}

impl FrameTime {
    pub fn new(elapsed: f64, delta: f64) -> Self {
        Self { elapsed, delta }
    }
}

/// Displacement for one frame along heading `angle`, scaled per axis.
pub fn displacement(angle: f64, cos_scale: f64, sin_scale: f64) -> (f64, f64) {
    (angle.cos() * cos_scale, angle.sin() * sin_scale)
}

/// Advances particles through the field, one frame per [`Advector::step`].
///
/// Holds the depth coordinate used for 3D sampling, which only moves while
/// `depth_noise` is enabled.
#[derive(Debug, Clone, Default)]
pub struct Advector {
    z_offset: f64,
}

impl Advector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current depth coordinate fed to 3D sampling.
    pub fn z_offset(&self) -> f64 {
        self.z_offset
    }

    /// Moves every particle one step and returns how many were respawned.
    ///
    /// After this returns, every position in `store` lies strictly inside
    /// the viewport.
    pub fn step<R: RandomSource + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        field: &NoiseField,
        config: &SimulationConfig,
        viewport: &Viewport,
        rng: &mut R,
        time: FrameTime,
    ) -> usize {
        let width = viewport.width() as f32;
        let height = viewport.height() as f32;
        let scale = config.noise_scale;
        let mut respawned = 0;

        for i in 0..store.len() {
            let (px, py) = store.get(i);
            let n = field.sample(
                px as f64 * scale,
                py as f64 * scale,
                self.z_offset,
                config.depth_noise,
            );
            let angle = config.angle_mode.angle(n, time.elapsed);
            let (dx, dy) = displacement(angle, config.cos_scale, config.sin_scale);

            // Bounds are tested on the stored f32 value, not the f64 sum.
            let nx = (px as f64 + dx) as f32;
            let ny = (py as f64 + dy) as f32;
            let (x, y) = if viewport.contains(nx, ny) {
                (nx, ny)
            } else {
                respawned += 1;
                spawn_point(rng, width, height)
            };
            store.set(i, x, y);
        }

        if config.depth_noise {
            self.z_offset += DEPTH_STEP;
        }
        respawned
    }
}
