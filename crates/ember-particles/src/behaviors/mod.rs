//! The pluggable behavior system.
//!
//! A behavior is a stateful configuration holder and a pure particle
//! mutator: it may initialize freshly spawned particles, update live ones
//! each frame, or both. The emitter owns the behaviors and keeps two
//! ordered collections of indices into them (active-init, active-update),
//! stably sorted by [`UpdateOrder`] tier — behaviors never hold a reference
//! back to their emitter.

mod alpha;
mod color;
mod movement;
mod rotation;
mod scale;
mod spawn;
mod texture;

pub use alpha::AlphaBehavior;
pub use color::ColorBehavior;
pub use movement::MovementBehavior;
pub use rotation::RotationBehavior;
pub use scale::ScaleBehavior;
pub use spawn::SpawnBehavior;
pub use texture::TextureBehavior;

use crate::config::{
    AlphaConfig, ColorConfig, EmitterConfig, MovementConfig, RotationConfig, ScaleConfig,
    SpawnConfig,
};
use crate::particle::Particle;
use crate::rng::ParticleRng;
use ember_core::Result;

/// Ordering tier for behavior execution within a phase.
///
/// Behaviors of equal tier keep their registration order (stable sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UpdateOrder {
    /// Runs first — spawn placement and texture assignment, so later
    /// behaviors can read the direction vector and lifetime state
    Initial,
    Normal,
    /// Runs last — movement, so it observes final acceleration/rotation
    Late,
}

/// Emitter-owned state a behavior may draw on while initializing a particle
pub struct InitContext<'a> {
    pub rng: &'a mut ParticleRng,
}

/// A behavior's config as reported back for serialization.
///
/// The texture behavior deliberately reports nothing — texture handles are
/// opaque host assets.
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorConfig {
    Alpha(AlphaConfig),
    Color(ColorConfig),
    Movement(MovementConfig),
    Rotation(RotationConfig),
    Scale(ScaleConfig),
    Spawn(SpawnConfig),
}

/// The capability contract all concrete behaviors implement
pub trait Behavior {
    fn order(&self) -> UpdateOrder {
        UpdateOrder::Normal
    }

    /// Whether this behavior joins the active-init collection
    fn wants_init(&self) -> bool {
        true
    }

    /// Whether this behavior joins the active-update collection
    /// (mode-dependent: a static-alpha behavior never needs per-frame work)
    fn wants_update(&self) -> bool {
        false
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()>;

    fn update_particle(&self, p: &mut Particle, dt: f32) -> Result<()> {
        let _ = (p, dt);
        Ok(())
    }

    /// The configuration this behavior was built from, for config round-trip
    fn config(&self) -> Option<BehaviorConfig>;
}

/// Build the behavior set an emitter config describes.
///
/// Construction order here is the registration order, which stable sorting
/// preserves among equal tiers.
pub fn build_behaviors(cfg: &EmitterConfig) -> Result<Vec<Box<dyn Behavior>>> {
    let mut behaviors: Vec<Box<dyn Behavior>> = Vec::new();
    if let Some(c) = &cfg.spawn_behavior {
        behaviors.push(Box::new(SpawnBehavior::from_config(c)?));
    }
    if let Some(c) = &cfg.texture_behavior {
        behaviors.push(Box::new(TextureBehavior::from_config(c)?));
    }
    if let Some(c) = &cfg.alpha_behavior {
        behaviors.push(Box::new(AlphaBehavior::from_config(c)?));
    }
    if let Some(c) = &cfg.color_behavior {
        behaviors.push(Box::new(ColorBehavior::from_config(c)?));
    }
    if let Some(c) = &cfg.scale_behavior {
        behaviors.push(Box::new(ScaleBehavior::from_config(c)?));
    }
    if let Some(c) = &cfg.rotation_behavior {
        behaviors.push(Box::new(RotationBehavior::from_config(c)?));
    }
    if let Some(c) = &cfg.movement_behavior {
        behaviors.push(Box::new(MovementBehavior::from_config(c)?));
    }
    Ok(behaviors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_tiers_compare() {
        assert!(UpdateOrder::Initial < UpdateOrder::Normal);
        assert!(UpdateOrder::Normal < UpdateOrder::Late);
    }

    #[test]
    fn build_empty_config_yields_no_behaviors() {
        let behaviors = build_behaviors(&EmitterConfig::default()).unwrap();
        assert!(behaviors.is_empty());
    }

    #[test]
    fn build_full_config_yields_all_behaviors() {
        let cfg: EmitterConfig = serde_json::from_str(
            r##"{
                "spawnBehavior": { "shape": "point" },
                "alphaBehavior": { "mode": "static", "value": 1.0 },
                "colorBehavior": { "mode": "static", "value": "#ffffff" },
                "scaleBehavior": { "mode": "static", "value": 2.0 },
                "rotationBehavior": { "mode": "direction" },
                "movementBehavior": { "minSpeed": 0.0, "maxSpeed": 1.0 },
                "textureBehavior": { "mode": "static", "texture": "spark" }
            }"##,
        )
        .unwrap();
        let behaviors = build_behaviors(&cfg).unwrap();
        assert_eq!(behaviors.len(), 7);
    }
}
