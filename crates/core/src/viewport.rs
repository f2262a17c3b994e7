//! Display dimensions and the orthographic view onto particle space.
//!
//! Particles live in display-pixel coordinates with the origin at the top
//! left. The camera looks at the whole `width × height` area but is zoomed
//! out around the center, so the field occupies the middle of the frame.

use crate::error::FlowError;

/// Default camera zoom. Values below 1 show a margin around the field.
pub const DEFAULT_ZOOM: f32 = 0.85;

/// The visible area and its projection onto the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: usize,
    height: usize,
    zoom: f32,
}

impl Viewport {
    /// Creates a viewport with the default zoom.
    ///
    /// Returns `FlowError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            zoom: DEFAULT_ZOOM,
        })
    }

    /// Returns the viewport with a different zoom; non-positive zooms are ignored.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        if zoom > 0.0 && zoom.is_finite() {
            self.zoom = zoom;
        }
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Whether `(x, y)` lies strictly inside `(0, width) × (0, height)`.
    ///
    /// Points on any edge count as outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > 0.0 && x < self.width as f32 && y > 0.0 && y < self.height as f32
    }

    /// Projects a particle position to frame buffer pixel coordinates,
    /// scaling about the center by the zoom.
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        let cx = self.width as f32 * 0.5;
        let cy = self.height as f32 * 0.5;
        (cx + (x - cx) * self.zoom, cy + (y - cy) * self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(Viewport::new(0, 10).is_err());
        assert!(Viewport::new(10, 0).is_err());
    }

    #[test]
    fn contains_is_strict_on_every_edge() {
        let vp = Viewport::new(800, 600).unwrap();
        assert!(vp.contains(0.5, 0.5));
        assert!(vp.contains(799.9, 599.9));
        assert!(!vp.contains(0.0, 300.0));
        assert!(!vp.contains(800.0, 300.0));
        assert!(!vp.contains(400.0, 0.0));
        assert!(!vp.contains(400.0, 600.0));
        assert!(!vp.contains(-1.0, 300.0));
        assert!(!vp.contains(f32::NAN, 300.0));
    }

    #[test]
    fn project_keeps_center_fixed() {
        let vp = Viewport::new(800, 600).unwrap();
        assert_eq!(vp.project(400.0, 300.0), (400.0, 300.0));
    }

    #[test]
    fn project_shrinks_toward_center_with_default_zoom() {
        let vp = Viewport::new(800, 600).unwrap();
        let (x, y) = vp.project(0.0, 0.0);
        assert!((x - 60.0).abs() < 1e-3, "x = {x}");
        assert!((y - 45.0).abs() < 1e-3, "y = {y}");
    }

    #[test]
    fn unit_zoom_is_identity() {
        let vp = Viewport::new(800, 600).unwrap().with_zoom(1.0);
        assert_eq!(vp.project(12.5, 99.0), (12.5, 99.0));
    }

    #[test]
    fn invalid_zoom_is_ignored() {
        let vp = Viewport::new(10, 10).unwrap().with_zoom(-2.0);
        assert_eq!(vp.zoom(), DEFAULT_ZOOM);
    }
}
