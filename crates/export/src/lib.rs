#![deny(unsafe_code)]
//! Getting frames and settings out of a running flow-fields simulation.
//!
//! - [`pixel`]: frame buffer to RGBA8 bytes (always available)
//! - [`snapshot`]: PNG export (feature `png`, default on)
//! - [`settings_file`]: JSON-file [`SettingsStore`](flow_fields_core::SettingsStore)

pub mod pixel;
pub mod settings_file;

#[cfg(feature = "png")]
pub mod snapshot;

pub use settings_file::JsonFileStore;
