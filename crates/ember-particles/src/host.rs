//! Interfaces to the host rendering layer.
//!
//! The emitter tells the container which particles exist and in what order;
//! the host reads render state back through [`crate::Emitter::particle`].
//! The host clock drives everything by calling [`crate::Emitter::tick`]
//! once per frame with the elapsed milliseconds.

use crate::particle::ParticleId;

/// The sprite-batch container the host renders particles with
pub trait ParticleContainer {
    /// Attach a particle at the front (rendered on top)
    fn add_particle(&mut self, id: ParticleId);

    /// Attach a particle at a specific display index (0 = back)
    fn add_particle_at(&mut self, id: ParticleId, index: usize);

    fn remove_particle(&mut self, id: ParticleId);

    /// Flush pending render state; called once at the end of each update pass
    fn flush(&mut self);

    /// Container extent, used only for emitter placement
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

/// Container that discards everything — headless simulation, off-screen
/// prewarming, and tests that don't care about display order.
pub struct NullContainer;

impl ParticleContainer for NullContainer {
    fn add_particle(&mut self, _id: ParticleId) {}
    fn add_particle_at(&mut self, _id: ParticleId, _index: usize) {}
    fn remove_particle(&mut self, _id: ParticleId) {}
    fn flush(&mut self) {}
    fn width(&self) -> f32 {
        0.0
    }
    fn height(&self) -> f32 {
        0.0
    }
}
