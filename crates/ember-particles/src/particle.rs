//! Particle state and the arena it is pooled in

use ember_core::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Opaque reference to a host-owned texture asset.
///
/// The engine only carries these on particles; it never interprets them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureHandle(String);

impl TextureHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Per-particle texture animation state (the frame list lives on the behavior)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimState {
    /// Seconds of animation elapsed
    pub elapsed: f32,
    /// Total animation length in seconds
    pub duration: f32,
    /// Frames per second
    pub framerate: f32,
    /// Wrap via modulo instead of clamping to the last frame
    pub looping: bool,
}

/// One visual instance, owned by the emitter and reused via the arena.
///
/// Behaviors receive a transient `&mut Particle` during init/update calls
/// and write the render-facing fields; they never retain the reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Seconds since spawn
    pub age: f32,
    pub max_lifetime: f32,
    /// `age / max_lifetime`, the universal interpolation driver
    pub age_percent: f32,
    pub one_over_lifetime: f32,

    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Spawn-time forward vector, consumed by local-space movement and
    /// direction-based rotation
    pub direction: Vec2,
    /// Radians per second, integrated by the acceleration rotation mode
    pub rotation_speed: f32,
    pub anim: Option<AnimState>,

    // Render-facing fields, written by behaviors
    pub position: Vec2,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: f32,
    /// Packed 0xRRGGBB tint
    pub tint: u32,
    pub texture: Option<TextureHandle>,
}

impl Particle {
    /// Restore spawn-ready defaults before reuse
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            age: 0.0,
            max_lifetime: 0.0,
            age_percent: 0.0,
            one_over_lifetime: 0.0,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            direction: Vec2::ZERO,
            rotation_speed: 0.0,
            anim: None,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            tint: 0xFFFFFF,
            texture: None,
        }
    }
}

/// Stable index of a particle slot in its arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub usize);

/// Contiguous particle storage with a free-index stack for recycling.
///
/// Slots are allocated once and reused indefinitely; in steady state
/// `acquire`/`release` never allocate. A slot id is either held by the
/// owning emitter's live list or sits on the free stack, never both.
pub struct ParticleArena {
    slots: Vec<Particle>,
    free: Vec<ParticleId>,
}

impl ParticleArena {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Take a spawn-ready particle, reusing a recycled slot when one exists
    pub fn acquire(&mut self) -> ParticleId {
        match self.free.pop() {
            Some(id) => id,
            None => {
                let id = ParticleId(self.slots.len());
                self.slots.push(Particle::default());
                id
            }
        }
    }

    /// Reset a particle's fields and return its slot to the free stack
    pub fn release(&mut self, id: ParticleId) {
        self.slots[id.0].reset();
        self.free.push(id);
    }

    /// Total slots ever allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots currently waiting for reuse
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn contains_free(&self, id: ParticleId) -> bool {
        self.free.contains(&id)
    }
}

impl Default for ParticleArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<ParticleId> for ParticleArena {
    type Output = Particle;
    fn index(&self, id: ParticleId) -> &Particle {
        &self.slots[id.0]
    }
}

impl IndexMut<ParticleId> for ParticleArena {
    fn index_mut(&mut self, id: ParticleId) -> &mut Particle {
        &mut self.slots[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_allocates_then_reuses() {
        let mut arena = ParticleArena::new();
        let a = arena.acquire();
        let b = arena.acquire();
        assert_ne!(a, b);
        assert_eq!(arena.capacity(), 2);

        arena.release(a);
        assert_eq!(arena.free_count(), 1);

        // Steady state: the freed slot comes back, no new allocation
        let c = arena.acquire();
        assert_eq!(c, a);
        assert_eq!(arena.capacity(), 2);
        assert_eq!(arena.free_count(), 0);
    }

    #[test]
    fn release_resets_fields() {
        let mut arena = ParticleArena::new();
        let id = arena.acquire();
        arena[id].age = 3.5;
        arena[id].alpha = 0.25;
        arena[id].texture = Some(TextureHandle::new("spark"));

        arena.release(id);
        assert_eq!(arena[id], Particle::default());
    }

    #[test]
    fn default_particle_is_visible() {
        let p = Particle::default();
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.scale_x, 1.0);
        assert_eq!(p.scale_y, 1.0);
        assert_eq!(p.tint, 0xFFFFFF);
    }
}
