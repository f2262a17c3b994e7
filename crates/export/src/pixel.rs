//! Frame buffer to RGBA8 conversion.
//!
//! Always available (no feature gate) so hosts that blit frames themselves
//! can share the conversion used by the PNG path.

use flow_fields_core::framebuffer::FrameBuffer;

/// Quantizes a frame to a row-major RGBA8 buffer of length
/// `width * height * 4`. Alpha is kept, so an inverted frame exports with a
/// transparent background.
pub fn frame_to_rgba8(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .pixels()
        .iter()
        .flat_map(|p| p.to_rgba8())
        .collect()
}
