#![deny(unsafe_code)]
//! Core of the flow-fields visualization.
//!
//! A large set of 2D particles is pushed each frame along headings read
//! from coherent noise, re-seeded when they leave the visible area, and
//! drawn as additively blended points into a CPU [`FrameBuffer`].
//!
//! [`Simulation`] owns all state; [`FrameLoop`] schedules frames;
//! [`SimulationConfig`] holds the tunable parameters and their
//! persistence rules.

pub mod advect;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod framebuffer;
pub mod noise_field;
pub mod params;
pub mod particles;
pub mod persistence;
pub mod prng;
pub mod simulation;
pub mod viewport;

pub use advect::{Advector, FrameTime};
pub use color::{Rgba, Srgb};
pub use compositor::{Compositor, TrailMode};
pub use config::{AngleMode, SimulationConfig};
pub use error::FlowError;
pub use frame_loop::{FixedStepClock, FrameLoop, TimeSource, WallClock};
pub use framebuffer::{BlendMode, FrameBuffer};
pub use noise_field::NoiseField;
pub use particles::ParticleStore;
pub use persistence::{MemoryStore, SettingsStore, SETTINGS_KEY};
pub use prng::{RandomSource, Xorshift64};
pub use simulation::Simulation;
pub use viewport::Viewport;
