//! Texture assignment and frame animation

use super::{Behavior, BehaviorConfig, InitContext, UpdateOrder};
use crate::config::TextureConfig;
use crate::particle::{AnimState, Particle};
use ember_core::{EmberError, Result};

pub struct TextureBehavior {
    config: TextureConfig,
}

impl TextureBehavior {
    pub fn from_config(config: &TextureConfig) -> Result<Self> {
        match config {
            TextureConfig::Random { textures } | TextureConfig::Animated { textures, .. }
                if textures.is_empty() =>
            {
                return Err(EmberError::InvalidConfig(
                    "texture behavior needs at least one texture".into(),
                ));
            }
            TextureConfig::Animated {
                framerate: Some(fps),
                ..
            } if *fps <= 0.0 => {
                return Err(EmberError::InvalidConfig(
                    "animated texture framerate must be positive".into(),
                ));
            }
            _ => {}
        }
        Ok(Self {
            config: config.clone(),
        })
    }
}

impl Behavior for TextureBehavior {
    fn order(&self) -> UpdateOrder {
        UpdateOrder::Initial
    }

    fn wants_update(&self) -> bool {
        matches!(self.config, TextureConfig::Animated { .. })
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        match &self.config {
            TextureConfig::Static { texture } => {
                p.texture = Some(texture.clone());
            }
            TextureConfig::Random { textures } => {
                p.texture = Some(textures[ctx.rng.index(textures.len())].clone());
            }
            TextureConfig::Animated {
                textures,
                framerate,
                looping,
            } => {
                // Unspecified framerate spreads the animation across the
                // particle's whole life
                let framerate = match framerate {
                    Some(fps) => *fps,
                    None => textures.len() as f32 / p.max_lifetime,
                };
                p.anim = Some(AnimState {
                    elapsed: 0.0,
                    duration: textures.len() as f32 / framerate,
                    framerate,
                    looping: *looping,
                });
                p.texture = Some(textures[0].clone());
            }
        }
        Ok(())
    }

    fn update_particle(&self, p: &mut Particle, dt: f32) -> Result<()> {
        let TextureConfig::Animated { textures, .. } = &self.config else {
            return Ok(());
        };
        let Some(anim) = p.anim.as_mut() else {
            return Ok(());
        };

        anim.elapsed += dt;
        if anim.elapsed >= anim.duration {
            if anim.looping {
                anim.elapsed %= anim.duration;
            } else {
                // Hold just inside the final frame
                anim.elapsed = anim.duration - 0.000001;
            }
        }

        // Truncating cast clamps tiny negative drift to frame 0
        let frame = (anim.elapsed * anim.framerate + 0.0000001) as usize;
        let texture = textures.get(frame).ok_or(EmberError::MissingFrame {
            frame,
            available: textures.len(),
        })?;
        p.texture = Some(texture.clone());
        Ok(())
    }

    /// Texture handles are opaque host assets, so this behavior never
    /// reports a config to serialize
    fn config(&self) -> Option<BehaviorConfig> {
        None
    }
}
