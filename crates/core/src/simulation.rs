//! The simulation context: everything one running visualization owns.
//!
//! A [`Simulation`] ties the config, noise field, particle store, advector,
//! random source, viewport and compositor together. There is no global
//! state; callers hold the context and pass it where it is needed.

use log::{debug, info};

use crate::advect::{Advector, FrameTime};
use crate::compositor::Compositor;
use crate::config::SimulationConfig;
use crate::error::FlowError;
use crate::framebuffer::FrameBuffer;
use crate::noise_field::NoiseField;
use crate::particles::ParticleStore;
use crate::persistence::SettingsStore;
use crate::prng::Xorshift64;
use crate::viewport::Viewport;

/// One flow-field visualization.
pub struct Simulation {
    config: SimulationConfig,
    field: NoiseField,
    store: ParticleStore,
    advector: Advector,
    rng: Xorshift64,
    viewport: Viewport,
    compositor: Compositor,
}

impl Simulation {
    /// Creates a simulation with `config` (clamped) on a `width × height`
    /// display. `seed` drives both the noise permutation and particle
    /// placement.
    pub fn new(
        config: SimulationConfig,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self, FlowError> {
        let config = config.clamped();
        let viewport = Viewport::new(width, height)?;
        let mut rng = Xorshift64::new(seed);
        let store = ParticleStore::initialize(config.count, width, height, &mut rng)?;
        let compositor = Compositor::new(&config, width, height)?;
        debug!(
            "simulation created: {} particles on {width}x{height}, seed {seed}",
            store.len()
        );
        Ok(Self {
            config,
            field: NoiseField::new(seed as u32),
            store,
            advector: Advector::new(),
            rng,
            viewport,
            compositor,
        })
    }

    /// Creates a simulation from persisted settings merged over defaults.
    ///
    /// A store that cannot be read is logged and the defaults apply.
    pub fn from_store(
        settings: &dyn SettingsStore,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self, FlowError> {
        Self::new(SimulationConfig::from_store(settings), width, height, seed)
    }

    /// Applies a control edit: the particle store is rebuilt at the new
    /// count, the compositor is restyled and the config is persisted.
    ///
    /// The store is replaced even when the save fails; the save error is
    /// returned afterwards.
    pub fn on_config_changed(
        &mut self,
        config: SimulationConfig,
        settings: &mut dyn SettingsStore,
    ) -> Result<(), FlowError> {
        self.config = config.clamped();
        self.store = ParticleStore::initialize(
            self.config.count,
            self.viewport.width(),
            self.viewport.height(),
            &mut self.rng,
        )?;
        self.compositor.configure(&self.config);
        debug!("particle store rebuilt with {} particles", self.store.len());
        settings.save(&self.config.serialize())
    }

    /// Adopts new display dimensions. Particles keep their positions; any
    /// now outside the area are respawned on the next step.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), FlowError> {
        let viewport = Viewport::new(width, height)?.with_zoom(self.viewport.zoom());
        self.compositor.resize(width, height)?;
        self.viewport = viewport;
        info!("resized to {width}x{height}");
        Ok(())
    }

    /// Sets the camera zoom used when rendering.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.viewport = self.viewport.with_zoom(zoom);
    }

    /// Advances every particle one frame. Returns the respawn count.
    pub fn step(&mut self, time: FrameTime) -> usize {
        self.advector.step(
            &mut self.store,
            &self.field,
            &self.config,
            &self.viewport,
            &mut self.rng,
            time,
        )
    }

    /// Renders the current particle positions.
    pub fn render(&mut self) -> &FrameBuffer {
        self.compositor.render(&self.store, &self.viewport)
    }

    /// Runs one full frame: advect, then render.
    pub fn frame(&mut self, time: FrameTime) -> &FrameBuffer {
        self.step(time);
        self.render()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn advector(&self) -> &Advector {
        &self.advector
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Mutable access for trail and blend settings.
    pub fn compositor_mut(&mut self) -> &mut Compositor {
        &mut self.compositor
    }
}
