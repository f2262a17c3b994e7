//! Draws the particle buffer into a frame.
//!
//! Every particle becomes a square point of `point_size` pixels, blended
//! additively so dense regions glow. Colors follow the `inverted` flag:
//! light points on an opaque black background normally, dark points on a
//! white background with zero alpha when inverted. The asymmetry in
//! background alpha is intentional.
//!
//! With [`TrailMode::Fade`] the compositor keeps two frames and alternates
//! between them: particles are drawn into an offscreen buffer, the previous
//! frame is faded toward the background, and the offscreen buffer is
//! blended on top.

use crate::color::{Rgba, Srgb, DARK, LIGHT};
use crate::config::SimulationConfig;
use crate::error::FlowError;
use crate::framebuffer::{BlendMode, FrameBuffer};
use crate::particles::ParticleStore;
use crate::viewport::Viewport;

/// Whether previous frames persist as fading trails.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TrailMode {
    /// Every frame starts from a cleared background.
    #[default]
    Off,
    /// The previous frame keeps `retain` of its difference from the
    /// background each frame (0 clears, 1 never fades).
    Fade { retain: f32 },
}

impl TrailMode {
    /// A fade mode with `retain` clamped to [0, 1].
    pub fn fade(retain: f32) -> Self {
        TrailMode::Fade {
            retain: if retain.is_nan() {
                0.0
            } else {
                retain.clamp(0.0, 1.0)
            },
        }
    }
}

/// Point color for the given inversion flag.
pub fn foreground_for(inverted: bool) -> Srgb {
    if inverted {
        DARK
    } else {
        LIGHT
    }
}

/// Clear color for the given inversion flag.
pub fn background_for(inverted: bool) -> Rgba {
    if inverted {
        LIGHT.with_alpha(0.0)
    } else {
        DARK.with_alpha(1.0)
    }
}

/// Renders a [`ParticleStore`] into an owned frame buffer.
pub struct Compositor {
    point_size: f32,
    foreground: Srgb,
    background: Rgba,
    blend: BlendMode,
    trail: TrailMode,
    frames: [FrameBuffer; 2],
    current: usize,
    offscreen: FrameBuffer,
}

impl Compositor {
    /// Creates a compositor styled from `config` with `width × height`
    /// buffers cleared to the background.
    pub fn new(config: &SimulationConfig, width: usize, height: usize) -> Result<Self, FlowError> {
        let mut compositor = Self {
            point_size: 1.0,
            foreground: LIGHT,
            background: background_for(false),
            blend: BlendMode::Additive,
            trail: TrailMode::Off,
            frames: [
                FrameBuffer::new(width, height)?,
                FrameBuffer::new(width, height)?,
            ],
            current: 0,
            offscreen: FrameBuffer::new(width, height)?,
        };
        compositor.configure(config);
        Ok(compositor)
    }

    /// Restyles from `config` and clears the presented frames.
    pub fn configure(&mut self, config: &SimulationConfig) {
        self.point_size = config.point_size as f32;
        self.foreground = foreground_for(config.inverted);
        self.background = background_for(config.inverted);
        for frame in &mut self.frames {
            frame.clear(self.background);
        }
    }

    /// Reallocates every buffer at the new size, cleared to the background.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), FlowError> {
        let mut fresh = FrameBuffer::new(width, height)?;
        fresh.clear(self.background);
        self.frames = [fresh.clone(), fresh];
        self.offscreen = FrameBuffer::new(width, height)?;
        Ok(())
    }

    pub fn set_trail_mode(&mut self, trail: TrailMode) {
        self.trail = trail;
    }

    pub fn trail_mode(&self) -> TrailMode {
        self.trail
    }

    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn foreground(&self) -> Srgb {
        self.foreground
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// The most recently presented frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frames[self.current]
    }

    /// Draws `store` and presents the result.
    pub fn render(&mut self, store: &ParticleStore, viewport: &Viewport) -> &FrameBuffer {
        let style = self.style();
        match self.trail {
            TrailMode::Off => {
                let frame = &mut self.frames[self.current];
                frame.clear(self.background);
                draw_points(frame, store, viewport, style);
            }
            TrailMode::Fade { retain } => {
                self.offscreen.clear(Rgba::TRANSPARENT);
                draw_points(&mut self.offscreen, store, viewport, style);

                let [first, second] = &mut self.frames;
                let (prev, next) = if self.current == 0 {
                    (&*first, second)
                } else {
                    (&*second, first)
                };
                let bg = self.background;
                let blend = self.blend;
                for ((out, &old), &drawn) in next
                    .pixels_mut()
                    .iter_mut()
                    .zip(prev.pixels())
                    .zip(self.offscreen.pixels())
                {
                    *out = blend.apply(fade(old, bg, retain), drawn);
                }
                self.current = 1 - self.current;
            }
        }
        self.frame()
    }

    fn style(&self) -> PointStyle {
        PointStyle {
            size: self.point_size.round().max(1.0) as i64,
            color: self.foreground.with_alpha(1.0),
            blend: self.blend,
        }
    }
}

#[derive(Clone, Copy)]
struct PointStyle {
    size: i64,
    color: Rgba,
    blend: BlendMode,
}

fn draw_points(target: &mut FrameBuffer, store: &ParticleStore, viewport: &Viewport, style: PointStyle) {
    let half = (style.size - 1) as f32 * 0.5;
    for (x, y) in store.positions() {
        let (sx, sy) = viewport.project(x, y);
        let x0 = (sx - half).floor() as i64;
        let y0 = (sy - half).floor() as i64;
        for dy in 0..style.size {
            for dx in 0..style.size {
                target.blend(x0 + dx, y0 + dy, style.color, style.blend);
            }
        }
    }
}

fn fade(prev: Rgba, bg: Rgba, retain: f32) -> Rgba {
    Rgba {
        r: bg.r + (prev.r - bg.r) * retain,
        g: bg.g + (prev.g - bg.g) * retain,
        b: bg.b + (prev.b - bg.b) * retain,
        a: bg.a + (prev.a - bg.a) * retain,
    }
}
