//! Frame scheduling around a [`Simulation`].
//!
//! A [`TimeSource`] supplies the timing of each frame; the [`FrameLoop`]
//! decides whether a frame runs at all. Interactive hosts use a
//! [`WallClock`]; headless rendering uses a [`FixedStepClock`] so output
//! is reproducible.

use std::time::Instant;

use crate::advect::FrameTime;
use crate::framebuffer::FrameBuffer;
use crate::simulation::Simulation;

/// Produces the timing of the next frame.
pub trait TimeSource {
    /// Advances the clock by one frame and returns its timing.
    fn tick(&mut self) -> FrameTime;
}

/// Real time measured from construction.
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        FrameTime::new(now.duration_since(self.start).as_secs_f64(), delta)
    }
}

/// Deterministic clock advancing `1 / fps` seconds per frame.
///
/// The first frame is at `elapsed = 0`.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    frame: u64,
}

impl FixedStepClock {
    /// A clock at `fps` frames per second. Non-positive or non-finite
    /// rates fall back to 60.
    pub fn new(fps: f64) -> Self {
        let fps = if fps > 0.0 && fps.is_finite() { fps } else { 60.0 };
        Self {
            step: 1.0 / fps,
            frame: 0,
        }
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }
}

impl TimeSource for FixedStepClock {
    fn tick(&mut self) -> FrameTime {
        let time = FrameTime::new(self.frame as f64 * self.step, self.step);
        self.frame += 1;
        time
    }
}

/// Start/stop control over the advect-then-render sequence.
///
/// A new loop is stopped.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames rendered since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame if the loop is running. The clock is not advanced
    /// while stopped.
    pub fn tick<'a>(
        &mut self,
        sim: &'a mut Simulation,
        clock: &mut dyn TimeSource,
    ) -> Option<&'a FrameBuffer> {
        if !self.running {
            return None;
        }
        self.frames += 1;
        Some(sim.frame(clock.tick()))
    }

    /// Starts the loop, runs up to `frames` frames and stops it again.
    /// Returns how many frames ran.
    pub fn run(&mut self, sim: &mut Simulation, clock: &mut dyn TimeSource, frames: u64) -> u64 {
        self.start();
        let mut ran = 0;
        while ran < frames && self.tick(sim, clock).is_some() {
            ran += 1;
        }
        self.stop();
        ran
    }
}
