//! Alpha over lifetime

use super::{Behavior, BehaviorConfig, InitContext};
use crate::config::AlphaConfig;
use crate::keyframes::KeyframeList;
use crate::particle::Particle;
use ember_core::Result;

pub struct AlphaBehavior {
    config: AlphaConfig,
    list: KeyframeList<f32>,
}

impl AlphaBehavior {
    pub fn from_config(config: &AlphaConfig) -> Result<Self> {
        let list = match config {
            AlphaConfig::Static { .. } => KeyframeList::new(),
            AlphaConfig::List { data } | AlphaConfig::Random { data } => data.build()?,
        };
        Ok(Self {
            config: config.clone(),
            list,
        })
    }
}

impl Behavior for AlphaBehavior {
    fn wants_update(&self) -> bool {
        matches!(self.config, AlphaConfig::List { .. })
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        p.alpha = match &self.config {
            AlphaConfig::Static { value } => *value,
            AlphaConfig::List { .. } => self.list.interpolate(0.0)?,
            AlphaConfig::Random { .. } => self.list.interpolate(ctx.rng.next_f32())?,
        };
        Ok(())
    }

    fn update_particle(&self, p: &mut Particle, _dt: f32) -> Result<()> {
        p.alpha = self.list.interpolate(p.age_percent)?;
        Ok(())
    }

    fn config(&self) -> Option<BehaviorConfig> {
        Some(BehaviorConfig::Alpha(self.config.clone()))
    }
}
