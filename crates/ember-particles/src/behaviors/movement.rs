//! Particle movement: velocity or acceleration, in global or local space.
//!
//! Runs at `late` order so it integrates after every other behavior has
//! written its acceleration/rotation state for the frame.

use super::{Behavior, BehaviorConfig, InitContext, UpdateOrder};
use crate::config::{MovementConfig, MovementMode, MovementSource, MovementSpace};
use crate::keyframes::KeyframeList;
use crate::particle::Particle;
use ember_core::{Result, Vec2};

enum Source {
    /// Per-axis uniform random constant, sampled at spawn
    Speed { min: f32, max: f32 },
    Lists {
        x: KeyframeList<f32>,
        y: KeyframeList<f32>,
    },
}

pub struct MovementBehavior {
    config: MovementConfig,
    mode: MovementMode,
    space: MovementSpace,
    source: Source,
}

impl MovementBehavior {
    pub fn from_config(config: &MovementConfig) -> Result<Self> {
        let source = match &config.source {
            MovementSource::Speed {
                min_speed,
                max_speed,
            } => Source::Speed {
                min: *min_speed,
                max: *max_speed,
            },
            MovementSource::Lists { x, y } => Source::Lists {
                x: x.build()?,
                y: y.as_ref().unwrap_or(x).build()?,
            },
        };
        Ok(Self {
            config: config.clone(),
            mode: config.mode,
            space: config.space,
            source,
        })
    }

    /// Map a configured (x, y) pair into world space.
    ///
    /// In local space the pair is (sideways, forward) relative to the
    /// particle's spawn direction vector.
    fn to_world(&self, p: &Particle, value: Vec2) -> Vec2 {
        match self.space {
            MovementSpace::Global => value,
            MovementSpace::Local => {
                let forward = p.direction.normalized();
                forward.perpendicular() * value.x + forward * value.y
            }
        }
    }
}

impl Behavior for MovementBehavior {
    fn order(&self) -> UpdateOrder {
        UpdateOrder::Late
    }

    fn wants_update(&self) -> bool {
        true
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        if let Source::Speed { min, max } = self.source {
            // X and Y sampled independently
            let value = Vec2::new(ctx.rng.range(min, max), ctx.rng.range(min, max));
            let world = self.to_world(p, value);
            match self.mode {
                MovementMode::Linear => p.velocity = world,
                MovementMode::Acceleration => p.acceleration = world,
            }
        }
        Ok(())
    }

    fn update_particle(&self, p: &mut Particle, dt: f32) -> Result<()> {
        let value = match &self.source {
            Source::Speed { .. } => match self.mode {
                MovementMode::Linear => p.velocity,
                MovementMode::Acceleration => p.acceleration,
            },
            Source::Lists { x, y } => {
                let raw = Vec2::new(
                    x.interpolate(p.age_percent)?,
                    y.interpolate(p.age_percent)?,
                );
                self.to_world(p, raw)
            }
        };

        match self.mode {
            MovementMode::Linear => {
                p.position = p.position + value * dt;
            }
            MovementMode::Acceleration => {
                p.velocity = p.velocity + value * dt;
                p.position = p.position + p.velocity * dt;
            }
        }
        Ok(())
    }

    fn config(&self) -> Option<BehaviorConfig> {
        Some(BehaviorConfig::Movement(self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ListData, ValueListData};
    use crate::keyframes::Keyframe;
    use crate::rng::ParticleRng;

    fn constant(value: f32) -> ValueListData {
        ListData {
            keyframes: vec![Keyframe::new(value, 0.0), Keyframe::new(value, 1.0)],
            stepped: false,
            ease: None,
        }
    }

    fn speed_config(mode: MovementMode, space: MovementSpace, speed: f32) -> MovementConfig {
        MovementConfig {
            mode,
            space,
            source: MovementSource::Speed {
                min_speed: speed,
                max_speed: speed,
            },
        }
    }

    #[test]
    fn linear_constant_velocity_integrates_position() {
        let behavior = MovementBehavior::from_config(&speed_config(
            MovementMode::Linear,
            MovementSpace::Global,
            2.0,
        ))
        .unwrap();

        let mut rng = ParticleRng::new(1);
        let mut ctx = InitContext { rng: &mut rng };
        let mut p = Particle::default();
        behavior.init_particle(&mut p, &mut ctx).unwrap();
        assert_eq!(p.velocity, Vec2::new(2.0, 2.0));

        behavior.update_particle(&mut p, 0.5).unwrap();
        assert_eq!(p.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn acceleration_mode_integrates_velocity_then_position() {
        let behavior = MovementBehavior::from_config(&speed_config(
            MovementMode::Acceleration,
            MovementSpace::Global,
            4.0,
        ))
        .unwrap();

        let mut rng = ParticleRng::new(1);
        let mut ctx = InitContext { rng: &mut rng };
        let mut p = Particle::default();
        behavior.init_particle(&mut p, &mut ctx).unwrap();
        assert_eq!(p.acceleration, Vec2::new(4.0, 4.0));
        assert_eq!(p.velocity, Vec2::ZERO);

        behavior.update_particle(&mut p, 1.0).unwrap();
        assert_eq!(p.velocity, Vec2::new(4.0, 4.0));
        assert_eq!(p.position, Vec2::new(4.0, 4.0));

        behavior.update_particle(&mut p, 1.0).unwrap();
        assert_eq!(p.velocity, Vec2::new(8.0, 8.0));
        assert_eq!(p.position, Vec2::new(12.0, 12.0));
    }

    #[test]
    fn local_space_maps_y_onto_the_direction_vector() {
        // Pure forward motion: configured x = 0, y = 3
        let config = MovementConfig {
            mode: MovementMode::Linear,
            space: MovementSpace::Local,
            source: MovementSource::Lists {
                x: constant(0.0),
                y: Some(constant(3.0)),
            },
        };
        let behavior = MovementBehavior::from_config(&config).unwrap();

        let mut p = Particle::default();
        p.direction = Vec2::new(0.0, 2.0); // normalized to (0, 1)
        behavior.update_particle(&mut p, 1.0).unwrap();
        assert!((p.position.x - 0.0).abs() < 1e-6);
        assert!((p.position.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn local_space_x_is_perpendicular() {
        let config = MovementConfig {
            mode: MovementMode::Linear,
            space: MovementSpace::Local,
            source: MovementSource::Lists {
                x: constant(1.0),
                y: Some(constant(0.0)),
            },
        };
        let behavior = MovementBehavior::from_config(&config).unwrap();

        let mut p = Particle::default();
        p.direction = Vec2::new(1.0, 0.0);
        behavior.update_particle(&mut p, 1.0).unwrap();
        // Perpendicular of (1, 0) is (0, 1)
        assert!((p.position.x - 0.0).abs() < 1e-6);
        assert!((p.position.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn list_y_mirrors_x_when_omitted() {
        let config = MovementConfig {
            mode: MovementMode::Linear,
            space: MovementSpace::Global,
            source: MovementSource::Lists {
                x: constant(5.0),
                y: None,
            },
        };
        let behavior = MovementBehavior::from_config(&config).unwrap();

        let mut p = Particle::default();
        behavior.update_particle(&mut p, 1.0).unwrap();
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn runs_late() {
        let behavior = MovementBehavior::from_config(&speed_config(
            MovementMode::Linear,
            MovementSpace::Global,
            1.0,
        ))
        .unwrap();
        assert_eq!(behavior.order(), UpdateOrder::Late);
    }
}
