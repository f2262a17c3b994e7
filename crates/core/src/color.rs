//! Color types for the compositor.
//!
//! [`Srgb`] is an opaque display color; [`Rgba`] is a frame buffer pixel
//! carrying alpha. Components are `f32` in [0, 1].

/// Foreground used on the normal (dark) background.
pub const LIGHT: Srgb = Srgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// Foreground used when colors are inverted.
pub const DARK: Srgb = Srgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
};

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A frame buffer pixel: color plus coverage alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Srgb {
    /// The color with the given alpha.
    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl Rgba {
    /// Fully transparent black, the clear value of offscreen buffers.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Quantizes to 8-bit RGBA, saturating out-of-range channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_and_dark_are_white_and_black() {
        assert_eq!(LIGHT.with_alpha(1.0).to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(DARK.with_alpha(1.0).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn with_alpha_keeps_color() {
        let px = Srgb {
            r: 0.2,
            g: 0.4,
            b: 0.6,
        }
        .with_alpha(0.25);
        assert_eq!((px.r, px.g, px.b, px.a), (0.2, 0.4, 0.6, 0.25));
    }

    #[test]
    fn rgba8_clamps_out_of_range() {
        let px = Rgba {
            r: 1.5,
            g: -0.2,
            b: 0.5,
            a: 1.0,
        };
        assert_eq!(px.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn rgba8_quantizes_alpha_too() {
        let px = LIGHT.with_alpha(0.5);
        assert_eq!(px.to_rgba8(), [255, 255, 255, 128]);
        assert_eq!(Rgba::TRANSPARENT.to_rgba8(), [0, 0, 0, 0]);
    }
}
