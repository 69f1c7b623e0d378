//! Ember Particles - keyframe-driven 2D particle emitters
//!
//! Provides pooled per-emitter particle simulation with:
//! - CPU-side aging, movement and lifetime integration
//! - Swap-remove particle pool for O(1) kill
//! - Keyframe lists with easing and step/linear interpolation strategies
//! - Configurable behaviors for alpha, color, scale, rotation, movement,
//!   spawn shapes and texture animation

pub mod behaviors;
pub mod config;
pub mod ease;
pub mod emitter;
pub mod host;
pub mod keyframes;
pub mod particle;
pub mod rng;

pub use behaviors::{Behavior, BehaviorConfig, InitContext, UpdateOrder};
pub use config::{EmitterConfig, SpawnConfig, SpawnShape, EMITTER_VERSION};
pub use ease::{Ease, EaseFn};
pub use emitter::{CompletionCallback, Emitter};
pub use host::{NullContainer, ParticleContainer};
pub use keyframes::{Interpolable, Keyframe, KeyframeList};
pub use particle::{Particle, ParticleId, TextureHandle};
pub use rng::ParticleRng;
