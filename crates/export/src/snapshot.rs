//! PNG export of the current frame.
//!
//! Feature-gated behind `png` (default on) so hosts with their own image
//! path can depend on this crate without pulling in `image`. The byte
//! conversion lives in [`crate::pixel`].

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use flow_fields_core::error::FlowError;
use flow_fields_core::framebuffer::FrameBuffer;
use log::info;

use crate::pixel::frame_to_rgba8;

/// File name for an export taken at `unix_millis`.
pub fn export_file_name(unix_millis: u128) -> String {
    format!("fields-{unix_millis}.png")
}

/// File name for an export taken now.
pub fn export_file_name_now() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    export_file_name(millis)
}

/// Writes `frame` as an RGBA PNG.
///
/// Returns `FlowError::InvalidDimensions` if the frame dimensions overflow
/// `u32`, or `FlowError::Io` on write failure.
pub fn write_png(frame: &FrameBuffer, path: &Path) -> Result<(), FlowError> {
    let rgba = frame_to_rgba8(frame);
    let w = u32::try_from(frame.width()).map_err(|_| FlowError::InvalidDimensions)?;
    let h = u32::try_from(frame.height()).map_err(|_| FlowError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| FlowError::Io(e.to_string()))?;
    info!("exported {w}x{h} frame to {}", path.display());
    Ok(())
}
