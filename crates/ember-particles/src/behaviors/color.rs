//! Tint over lifetime

use super::{Behavior, BehaviorConfig, InitContext};
use crate::config::ColorConfig;
use crate::keyframes::KeyframeList;
use crate::particle::Particle;
use ember_core::{Result, Rgb};

pub struct ColorBehavior {
    config: ColorConfig,
    list: KeyframeList<Rgb>,
}

impl ColorBehavior {
    pub fn from_config(config: &ColorConfig) -> Result<Self> {
        let list = match config {
            ColorConfig::Static { .. } => KeyframeList::new(),
            ColorConfig::List { data } | ColorConfig::Random { data } => data.build()?,
        };
        Ok(Self {
            config: config.clone(),
            list,
        })
    }
}

impl Behavior for ColorBehavior {
    fn wants_update(&self) -> bool {
        matches!(self.config, ColorConfig::List { .. })
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        p.tint = match &self.config {
            ColorConfig::Static { value } => value.to_packed(),
            ColorConfig::List { .. } => self.list.interpolate(0.0)?,
            ColorConfig::Random { .. } => self.list.interpolate(ctx.rng.next_f32())?,
        };
        Ok(())
    }

    fn update_particle(&self, p: &mut Particle, _dt: f32) -> Result<()> {
        p.tint = self.list.interpolate(p.age_percent)?;
        Ok(())
    }

    fn config(&self) -> Option<BehaviorConfig> {
        Some(BehaviorConfig::Color(self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorListData, ListData};
    use crate::keyframes::Keyframe;

    fn red_to_blue() -> ColorListData {
        ListData {
            keyframes: vec![
                Keyframe::new(Rgb::from_hex_str("#ff0000").unwrap(), 0.0),
                Keyframe::new(Rgb::from_hex_str("#0000ff").unwrap(), 1.0),
            ],
            stepped: false,
            ease: None,
        }
    }

    #[test]
    fn list_mode_blends_and_packs() {
        let behavior =
            ColorBehavior::from_config(&ColorConfig::List { data: red_to_blue() }).unwrap();
        assert!(behavior.wants_update());

        let mut p = Particle::default();
        p.age_percent = 0.5;
        behavior.update_particle(&mut p, 0.016).unwrap();
        assert_eq!(p.tint, 0x800080);
    }

    #[test]
    fn static_mode_packs_the_configured_color() {
        let behavior = ColorBehavior::from_config(&ColorConfig::Static {
            value: Rgb::new(18, 52, 86),
        })
        .unwrap();
        assert!(!behavior.wants_update());

        let mut rng = crate::rng::ParticleRng::new(3);
        let mut ctx = InitContext { rng: &mut rng };
        let mut p = Particle::default();
        behavior.init_particle(&mut p, &mut ctx).unwrap();
        assert_eq!(p.tint, 0x123456);
    }
}
