//! CPU frame buffer and the blend equations used to draw into it.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::FlowError;

/// How a drawn pixel combines with what is already in the buffer.
///
/// Both modes take straight (non-premultiplied) source alpha and saturate
/// every channel at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source over destination.
    Normal,
    /// Sum of source and destination: overlapping points glow.
    #[default]
    Additive,
}

impl BlendMode {
    /// Combines `src` onto `dst`.
    pub fn apply(self, dst: Rgba, src: Rgba) -> Rgba {
        match self {
            BlendMode::Additive => Rgba {
                r: (dst.r + src.r * src.a).min(1.0),
                g: (dst.g + src.g * src.a).min(1.0),
                b: (dst.b + src.b * src.a).min(1.0),
                a: (dst.a + src.a * src.a).min(1.0),
            },
            BlendMode::Normal => {
                let keep = 1.0 - src.a;
                Rgba {
                    r: src.r * src.a + dst.r * keep,
                    g: src.g * src.a + dst.g * keep,
                    b: src.b * src.a + dst.b * keep,
                    a: (src.a + dst.a * keep).min(1.0),
                }
            }
        }
    }
}

/// A `width × height` grid of [`Rgba`] pixels in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    /// Creates a transparent buffer.
    ///
    /// Returns `FlowError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(FlowError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} buffer",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x]
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Blends `src` onto the pixel at `(x, y)`. Coordinates outside the
    /// buffer are clipped silently.
    pub fn blend(&mut self, x: i64, y: i64, src: Rgba, mode: BlendMode) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = mode.apply(self.pixels[idx], src);
    }
}
