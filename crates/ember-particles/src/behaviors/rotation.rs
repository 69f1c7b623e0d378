//! Particle rotation: fixed, keyframed, direction-facing, or integrated

use super::{Behavior, BehaviorConfig, InitContext};
use crate::config::RotationConfig;
use crate::keyframes::KeyframeList;
use crate::particle::Particle;
use ember_core::Result;

/// Rotation parameters prepared from config, in radians
enum Mode {
    Static {
        radians: f32,
    },
    /// List values stay in degrees; sampled output is converted
    List,
    Direction,
    Acceleration {
        min_start: f32,
        max_start: f32,
        min_speed: f32,
        max_speed: f32,
        acceleration: f32,
    },
}

pub struct RotationBehavior {
    config: RotationConfig,
    mode: Mode,
    list: KeyframeList<f32>,
}

impl RotationBehavior {
    pub fn from_config(config: &RotationConfig) -> Result<Self> {
        let (mode, list) = match config {
            RotationConfig::Static { value } => (
                Mode::Static {
                    radians: value.to_radians(),
                },
                KeyframeList::new(),
            ),
            RotationConfig::List { data } => (Mode::List, data.build()?),
            RotationConfig::Direction => (Mode::Direction, KeyframeList::new()),
            RotationConfig::Acceleration {
                min_start,
                max_start,
                min_speed,
                max_speed,
                acceleration,
            } => (
                Mode::Acceleration {
                    min_start: min_start.to_radians(),
                    max_start: max_start.to_radians(),
                    min_speed: min_speed.to_radians(),
                    max_speed: max_speed.to_radians(),
                    acceleration: acceleration.to_radians(),
                },
                KeyframeList::new(),
            ),
        };
        Ok(Self {
            config: config.clone(),
            mode,
            list,
        })
    }
}

impl Behavior for RotationBehavior {
    fn wants_update(&self) -> bool {
        matches!(self.mode, Mode::List | Mode::Acceleration { .. })
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        match &self.mode {
            Mode::Static { radians } => p.rotation = *radians,
            Mode::List => p.rotation = self.list.interpolate(0.0)?.to_radians(),
            // Face the spawn direction; never updated afterwards
            Mode::Direction => p.rotation = p.direction.angle(),
            Mode::Acceleration {
                min_start,
                max_start,
                min_speed,
                max_speed,
                ..
            } => {
                p.rotation = ctx.rng.range(*min_start, *max_start);
                p.rotation_speed = ctx.rng.range(*min_speed, *max_speed);
            }
        }
        Ok(())
    }

    fn update_particle(&self, p: &mut Particle, dt: f32) -> Result<()> {
        match &self.mode {
            Mode::List => p.rotation = self.list.interpolate(p.age_percent)?.to_radians(),
            Mode::Acceleration { acceleration, .. } => {
                p.rotation_speed += acceleration * dt;
                p.rotation += p.rotation_speed * dt;
            }
            _ => {}
        }
        Ok(())
    }

    fn config(&self) -> Option<BehaviorConfig> {
        Some(BehaviorConfig::Rotation(self.config.clone()))
    }
}
