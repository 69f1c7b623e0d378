//! Scale over lifetime, with independent X and Y lists

use super::{Behavior, BehaviorConfig, InitContext};
use crate::config::ScaleConfig;
use crate::keyframes::KeyframeList;
use crate::particle::Particle;
use ember_core::Result;

pub struct ScaleBehavior {
    config: ScaleConfig,
    x: KeyframeList<f32>,
    y: KeyframeList<f32>,
}

impl ScaleBehavior {
    pub fn from_config(config: &ScaleConfig) -> Result<Self> {
        let (x, y) = match config {
            ScaleConfig::Static { .. } => (KeyframeList::new(), KeyframeList::new()),
            ScaleConfig::List { x, y } | ScaleConfig::Random { x, y } => (
                x.build()?,
                // Y mirrors the X list when omitted
                y.as_ref().unwrap_or(x).build()?,
            ),
        };
        Ok(Self {
            config: config.clone(),
            x,
            y,
        })
    }

    fn apply(&self, p: &mut Particle, t: f32) -> Result<()> {
        p.scale_x = self.x.interpolate(t)?;
        p.scale_y = self.y.interpolate(t)?;
        Ok(())
    }
}

impl Behavior for ScaleBehavior {
    fn wants_update(&self) -> bool {
        matches!(self.config, ScaleConfig::List { .. })
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        match &self.config {
            ScaleConfig::Static { value } => {
                p.scale_x = *value;
                p.scale_y = *value;
                Ok(())
            }
            ScaleConfig::List { .. } => self.apply(p, 0.0),
            // One random position drives both axes, keeping them in sync
            ScaleConfig::Random { .. } => self.apply(p, ctx.rng.next_f32()),
        }
    }

    fn update_particle(&self, p: &mut Particle, _dt: f32) -> Result<()> {
        self.apply(p, p.age_percent)
    }

    fn config(&self) -> Option<BehaviorConfig> {
        Some(BehaviorConfig::Scale(self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueListData;
    use crate::keyframes::Keyframe;
    use crate::rng::ParticleRng;

    fn shrink(from: f32, to: f32) -> ValueListData {
        ValueListData {
            keyframes: vec![Keyframe::new(from, 0.0), Keyframe::new(to, 1.0)],
            stepped: false,
            ease: None,
        }
    }

    #[test]
    fn y_mirrors_x_when_omitted() {
        let behavior = ScaleBehavior::from_config(&ScaleConfig::List {
            x: shrink(2.0, 0.0),
            y: None,
        })
        .unwrap();

        let mut p = Particle::default();
        p.age_percent = 0.5;
        behavior.update_particle(&mut p, 0.016).unwrap();
        assert!((p.scale_x - 1.0).abs() < 1e-6);
        assert_eq!(p.scale_x, p.scale_y);
    }

    #[test]
    fn independent_axes() {
        let behavior = ScaleBehavior::from_config(&ScaleConfig::List {
            x: shrink(1.0, 0.0),
            y: Some(shrink(0.0, 1.0)),
        })
        .unwrap();

        let mut p = Particle::default();
        p.age_percent = 0.25;
        behavior.update_particle(&mut p, 0.016).unwrap();
        assert!((p.scale_x - 0.75).abs() < 1e-6);
        assert!((p.scale_y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn random_mode_keeps_axes_in_sync() {
        let behavior = ScaleBehavior::from_config(&ScaleConfig::Random {
            x: shrink(3.0, 1.0),
            y: None,
        })
        .unwrap();
        assert!(!behavior.wants_update());

        let mut rng = ParticleRng::new(11);
        for _ in 0..50 {
            let mut ctx = InitContext { rng: &mut rng };
            let mut p = Particle::default();
            behavior.init_particle(&mut p, &mut ctx).unwrap();
            assert_eq!(p.scale_x, p.scale_y);
            assert!((1.0..=3.0).contains(&p.scale_x));
        }
    }
}
