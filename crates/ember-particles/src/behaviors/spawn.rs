//! Spawn placement — offsets freshly spawned particles by a shape sample
//! and stamps the direction vector downstream behaviors consume.

use super::{Behavior, BehaviorConfig, InitContext, UpdateOrder};
use crate::config::{SpawnConfig, SpawnShape};
use crate::particle::Particle;
use ember_core::{lerp, Result, Vec2};

pub struct SpawnBehavior {
    config: SpawnConfig,
}

impl SpawnBehavior {
    pub fn from_config(config: &SpawnConfig) -> Result<Self> {
        Ok(Self { config: *config })
    }
}

impl Behavior for SpawnBehavior {
    fn order(&self) -> UpdateOrder {
        UpdateOrder::Initial
    }

    fn init_particle(&self, p: &mut Particle, ctx: &mut InitContext<'_>) -> Result<()> {
        let rng = &mut *ctx.rng;
        let offset = match self.config.shape {
            SpawnShape::Point => Vec2::ZERO,
            SpawnShape::Line { width } => Vec2::new(rng.range(-width / 2.0, width / 2.0), 0.0),
            SpawnShape::Rectangle { width, height } => Vec2::new(
                rng.range(-width / 2.0, width / 2.0),
                rng.range(-height / 2.0, height / 2.0),
            ),
            SpawnShape::Circle {
                inner_radius,
                outer_radius,
            } => {
                // sqrt of a lerp between squared radii: uniform areal
                // density rather than uniform radius
                let radius = lerp(
                    inner_radius * inner_radius,
                    outer_radius * outer_radius,
                    rng.next_f32(),
                )
                .sqrt();
                let angle = rng.angle();
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            }
        };

        // Emitter position was written before init behaviors ran
        p.position = p.position + offset;
        p.direction = self.config.direction;
        Ok(())
    }

    fn config(&self) -> Option<BehaviorConfig> {
        Some(BehaviorConfig::Spawn(self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ParticleRng;

    fn init_one(behavior: &SpawnBehavior, rng: &mut ParticleRng) -> Particle {
        let mut ctx = InitContext { rng };
        let mut p = Particle::default();
        behavior.init_particle(&mut p, &mut ctx).unwrap();
        p
    }

    #[test]
    fn point_leaves_position_and_sets_direction() {
        let behavior = SpawnBehavior::from_config(&SpawnConfig {
            shape: SpawnShape::Point,
            direction: Vec2::new(1.0, 0.0),
        })
        .unwrap();
        assert!(!behavior.wants_update());
        assert_eq!(behavior.order(), UpdateOrder::Initial);

        let mut rng = ParticleRng::new(1);
        let p = init_one(&behavior, &mut rng);
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn line_offsets_are_centered_on_x() {
        let behavior = SpawnBehavior::from_config(&SpawnConfig {
            shape: SpawnShape::Line { width: 10.0 },
            direction: Vec2::UP,
        })
        .unwrap();

        let mut rng = ParticleRng::new(42);
        for _ in 0..200 {
            let p = init_one(&behavior, &mut rng);
            assert!((-5.0..5.0).contains(&p.position.x));
            assert_eq!(p.position.y, 0.0);
        }
    }

    #[test]
    fn rectangle_offsets_are_centered_both_axes() {
        let behavior = SpawnBehavior::from_config(&SpawnConfig {
            shape: SpawnShape::Rectangle {
                width: 4.0,
                height: 6.0,
            },
            direction: Vec2::UP,
        })
        .unwrap();

        let mut rng = ParticleRng::new(42);
        for _ in 0..200 {
            let p = init_one(&behavior, &mut rng);
            assert!((-2.0..2.0).contains(&p.position.x));
            assert!((-3.0..3.0).contains(&p.position.y));
        }
    }

    #[test]
    fn circle_radius_stays_in_the_ring() {
        let behavior = SpawnBehavior::from_config(&SpawnConfig {
            shape: SpawnShape::Circle {
                inner_radius: 2.0,
                outer_radius: 5.0,
            },
            direction: Vec2::UP,
        })
        .unwrap();

        let mut rng = ParticleRng::new(7);
        for _ in 0..200 {
            let p = init_one(&behavior, &mut rng);
            let r = p.position.length();
            assert!((2.0..=5.0).contains(&r), "radius {r} outside ring");
        }
    }

    #[test]
    fn offset_adds_to_preset_emitter_position() {
        let behavior = SpawnBehavior::from_config(&SpawnConfig {
            shape: SpawnShape::Point,
            direction: Vec2::UP,
        })
        .unwrap();

        let mut rng = ParticleRng::new(1);
        let mut ctx = InitContext { rng: &mut rng };
        let mut p = Particle::default();
        p.position = Vec2::new(100.0, 50.0);
        behavior.init_particle(&mut p, &mut ctx).unwrap();
        assert_eq!(p.position, Vec2::new(100.0, 50.0));
    }
}
