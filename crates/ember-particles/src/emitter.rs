//! The emitter — owns the particle population and drives the per-frame loop.
//!
//! Lifecycle: an emitter is `inactive` until [`Emitter::play`], then receives
//! [`Emitter::update`] calls from the host clock until it deactivates (either
//! [`Emitter::stop`] with `instant`, or spawning stops and the last particle
//! dies). `pause`/`resume` freeze the population in place without losing it.
//!
//! All mutation happens synchronously inside `update`; reconfiguration via
//! [`Emitter::apply_config`] must happen between frames.

use crate::behaviors::{build_behaviors, Behavior, BehaviorConfig, InitContext};
use crate::config::{EmitterConfig, EMITTER_VERSION};
use crate::host::ParticleContainer;
use crate::particle::{Particle, ParticleArena, ParticleId};
use crate::rng::ParticleRng;
use ember_core::{EmberError, Result, Vec2};
use tracing::warn;

/// Completion callback fired when the emitter deactivates
pub type CompletionCallback = Box<dyn FnMut() + Send>;

pub struct Emitter {
    // Configuration scalars
    min_lifetime: f32,
    max_lifetime: f32,
    spawn_interval: f32,
    spawn_chance: f32,
    max_particles: usize,
    add_at_back: bool,
    particles_per_wave: usize,
    emitter_lifetime: Option<f32>,
    spawn_pos: Vec2,

    // Behavior registry: behaviors plus tier-ordered index lists
    behaviors: Vec<Box<dyn Behavior>>,
    init_order: Vec<usize>,
    update_order: Vec<usize>,

    // Population
    arena: ParticleArena,
    live: Vec<ParticleId>,
    wave: Vec<ParticleId>,

    // Scheduling state
    spawn_timer: f32,
    remaining_life: Option<f32>,
    emitting: bool,
    paused: bool,
    active: bool,

    rng: ParticleRng,
    on_complete: Option<CompletionCallback>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::with_seed(0xDEAD_BEEF)
    }

    /// An emitter whose random stream is reproducible
    pub fn with_seed(seed: u32) -> Self {
        Self {
            min_lifetime: 1.0,
            max_lifetime: 2.0,
            spawn_interval: 0.1,
            spawn_chance: 1.0,
            max_particles: 256,
            add_at_back: false,
            particles_per_wave: 1,
            emitter_lifetime: None,
            spawn_pos: Vec2::ZERO,
            behaviors: Vec::new(),
            init_order: Vec::new(),
            update_order: Vec::new(),
            arena: ParticleArena::new(),
            live: Vec::new(),
            wave: Vec::new(),
            spawn_timer: 0.0,
            remaining_life: None,
            emitting: false,
            paused: false,
            active: false,
            rng: ParticleRng::new(seed),
            on_complete: None,
        }
    }

    pub fn from_config(config: &EmitterConfig) -> Result<Self> {
        let mut emitter = Self::new();
        emitter.apply_config(config)?;
        Ok(emitter)
    }

    /// Reconfigure the emitter and rebuild its behavior registry.
    ///
    /// Live particles are kept; the new behaviors apply from the next frame.
    pub fn apply_config(&mut self, config: &EmitterConfig) -> Result<()> {
        if config.emitter_version != EMITTER_VERSION {
            warn!(
                config_version = config.emitter_version,
                engine_version = EMITTER_VERSION,
                "emitter config version mismatch, applying anyway"
            );
        }
        if config.spawn_interval <= 0.0 {
            return Err(EmberError::InvalidConfig(
                "spawnInterval must be positive".into(),
            ));
        }
        if config.min_particle_lifetime <= 0.0
            || config.max_particle_lifetime < config.min_particle_lifetime
        {
            return Err(EmberError::InvalidConfig(
                "particle lifetimes must be positive with min <= max".into(),
            ));
        }
        if !(0.0..=1.0).contains(&config.spawn_chance) {
            return Err(EmberError::InvalidConfig(
                "spawnChance must be within [0, 1]".into(),
            ));
        }
        if config.max_particles == 0 {
            return Err(EmberError::InvalidConfig(
                "maxParticles must be at least 1".into(),
            ));
        }

        let behaviors = build_behaviors(config)?;

        // Registration: every behavior joins init, mode-dependent ones join
        // update; stable sort keeps registration order within a tier
        let mut init_order: Vec<usize> = (0..behaviors.len())
            .filter(|&i| behaviors[i].wants_init())
            .collect();
        init_order.sort_by_key(|&i| behaviors[i].order());
        let mut update_order: Vec<usize> = (0..behaviors.len())
            .filter(|&i| behaviors[i].wants_update())
            .collect();
        update_order.sort_by_key(|&i| behaviors[i].order());

        self.min_lifetime = config.min_particle_lifetime;
        self.max_lifetime = config.max_particle_lifetime;
        self.spawn_interval = config.spawn_interval;
        self.spawn_chance = config.spawn_chance;
        self.max_particles = config.max_particles;
        self.add_at_back = config.add_at_back;
        self.particles_per_wave = config.particles_per_wave.max(1);
        self.emitter_lifetime = config.emitter_lifetime;
        if let Some(pos) = config.pos {
            self.spawn_pos = pos;
        }
        self.behaviors = behaviors;
        self.init_order = init_order;
        self.update_order = update_order;
        self.spawn_timer = 0.0;
        self.remaining_life = config.emitter_lifetime;
        Ok(())
    }

    /// Reconstruct the applied configuration.
    ///
    /// The texture behavior is absent by design: texture handles are opaque
    /// host assets and don't serialize.
    pub fn get_config(&self) -> EmitterConfig {
        let mut config = EmitterConfig {
            emitter_version: EMITTER_VERSION,
            min_particle_lifetime: self.min_lifetime,
            max_particle_lifetime: self.max_lifetime,
            spawn_interval: self.spawn_interval,
            spawn_chance: self.spawn_chance,
            max_particles: self.max_particles,
            add_at_back: self.add_at_back,
            particles_per_wave: self.particles_per_wave,
            emitter_lifetime: self.emitter_lifetime,
            pos: Some(self.spawn_pos),
            ..EmitterConfig::default()
        };
        for behavior in &self.behaviors {
            match behavior.config() {
                Some(BehaviorConfig::Alpha(c)) => config.alpha_behavior = Some(c),
                Some(BehaviorConfig::Color(c)) => config.color_behavior = Some(c),
                Some(BehaviorConfig::Movement(c)) => config.movement_behavior = Some(c),
                Some(BehaviorConfig::Rotation(c)) => config.rotation_behavior = Some(c),
                Some(BehaviorConfig::Scale(c)) => config.scale_behavior = Some(c),
                Some(BehaviorConfig::Spawn(c)) => config.spawn_behavior = Some(c),
                None => {}
            }
        }
        config
    }

    // ── Host-facing accessors ──

    pub fn particle_count(&self) -> usize {
        self.live.len()
    }

    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.arena[id]
    }

    /// Live particles in update order
    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.live.iter().map(move |&id| (id, &self.arena[id]))
    }

    /// Slots waiting in the pool for reuse
    pub fn pooled_count(&self) -> usize {
        self.arena.free_count()
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the emitter wants clock ticks at all
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn spawn_pos(&self) -> Vec2 {
        self.spawn_pos
    }

    pub fn set_spawn_pos(&mut self, pos: Vec2) {
        self.spawn_pos = pos;
    }

    /// Fired once whenever the emitter deactivates
    pub fn set_completion_callback(&mut self, callback: CompletionCallback) {
        self.on_complete = Some(callback);
    }

    // ── State machine ──

    /// Start emitting; activates the emitter if it wasn't already
    pub fn play(&mut self) {
        self.emitting = true;
        if !self.active {
            self.active = true;
            self.spawn_timer = 0.0;
            self.remaining_life = self.emitter_lifetime;
        }
    }

    /// Freeze the population in place. Only valid while active and unpaused.
    pub fn pause(&mut self) {
        if self.active && !self.paused {
            self.paused = true;
        }
    }

    /// Undo a pause. Only valid while active and paused.
    pub fn resume(&mut self) {
        if self.active && self.paused {
            self.paused = false;
        }
    }

    /// Stop spawning. With `instant`, also recycles every live particle and
    /// deactivates synchronously; otherwise the population ages out
    /// naturally and the emitter deactivates once empty.
    pub fn stop(&mut self, container: &mut dyn ParticleContainer, instant: bool) {
        self.emitting = false;
        if instant && self.active {
            for id in self.live.drain(..) {
                container.remove_particle(id);
                self.arena.release(id);
            }
            self.complete();
        }
    }

    /// Pre-populate by simulating whole spawn cycles instantaneously, then
    /// leave the emitter playing. No-op (with a warning) when already
    /// emitting or when `time` is not positive.
    pub fn prewarm(&mut self, container: &mut dyn ParticleContainer, time: f32) -> Result<()> {
        if self.emitting {
            warn!("prewarm ignored: emitter is already emitting");
            return Ok(());
        }
        if time <= 0.0 {
            warn!(time, "prewarm ignored: time must be positive");
            return Ok(());
        }
        let cycles = (time / self.spawn_interval).floor() as u32;
        self.play();
        for _ in 0..cycles {
            self.update(container, self.spawn_interval)?;
        }
        Ok(())
    }

    /// Clock entry point: elapsed milliseconds since the last tick
    pub fn tick(&mut self, container: &mut dyn ParticleContainer, elapsed_ms: f32) -> Result<()> {
        self.update(container, elapsed_ms / 1000.0)
    }

    /// Advance the system by `delta` seconds.
    ///
    /// Negative deltas are an explicit supported edge case: they age
    /// particles backwards (killing any whose age drops below zero) but
    /// never run the spawn timer backwards.
    pub fn update(&mut self, container: &mut dyn ParticleContainer, delta: f32) -> Result<()> {
        if !self.active || self.paused {
            return Ok(());
        }

        // 1. Age the population, recycling the dead. Reverse order makes
        // swap_remove safe while iterating.
        let mut i = self.live.len();
        while i > 0 {
            i -= 1;
            let id = self.live[i];
            let p = &mut self.arena[id];
            p.age += delta;
            if p.age > p.max_lifetime || p.age < 0.0 {
                self.live.swap_remove(i);
                container.remove_particle(id);
                self.arena.release(id);
            } else {
                p.age_percent = p.age * p.one_over_lifetime;
                for &b in &self.update_order {
                    self.behaviors[b].update_particle(p, delta)?;
                }
            }
        }

        // 2. Spawn waves, catching up if the frame spanned several intervals
        if self.emitting {
            if delta > 0.0 {
                self.spawn_timer -= delta;
            }
            while self.spawn_timer <= 0.0 && self.emitting {
                if let Some(life) = self.remaining_life.as_mut() {
                    *life -= self.spawn_interval;
                    if *life <= 0.0 {
                        self.spawn_timer = 0.0;
                        self.emitting = false;
                        break;
                    }
                }
                if self.live.len() >= self.max_particles {
                    // At capacity: defer the whole wave
                    self.spawn_timer += self.spawn_interval;
                    continue;
                }
                self.spawn_wave(container)?;
                self.spawn_timer += self.spawn_interval;
            }
        }

        // 3. Let the host flush its render state
        container.flush();

        // 4. Done emitting and drained: deactivate
        if !self.emitting && self.live.is_empty() {
            self.complete();
        }
        Ok(())
    }

    /// Spawn one wave of up to `particles_per_wave` particles, then advance
    /// the batch by the fraction of the frame that already elapsed since the
    /// wave's nominal spawn instant.
    fn spawn_wave(&mut self, container: &mut dyn ParticleContainer) -> Result<()> {
        let catch_up = -self.spawn_timer;
        let slots = self
            .particles_per_wave
            .min(self.max_particles - self.live.len());

        for _ in 0..slots {
            if !self.rng.chance(self.spawn_chance) {
                continue;
            }
            let lifetime = if self.min_lifetime == self.max_lifetime {
                self.max_lifetime
            } else {
                self.rng.range(self.min_lifetime, self.max_lifetime)
            };
            // A particle born this far into the catch-up would already be
            // dead; never create it
            if catch_up >= lifetime {
                continue;
            }

            let id = self.arena.acquire();
            let p = &mut self.arena[id];
            p.max_lifetime = lifetime;
            p.one_over_lifetime = 1.0 / lifetime;
            p.position = self.spawn_pos;

            if self.add_at_back {
                container.add_particle_at(id, 0);
            } else {
                container.add_particle(id);
            }
            self.wave.push(id);
        }

        // Init behaviors, then bring each newcomer up to the current
        // sub-frame instant via the regular update path
        for k in 0..self.wave.len() {
            let id = self.wave[k];
            let p = &mut self.arena[id];
            let mut ctx = InitContext { rng: &mut self.rng };
            for &b in &self.init_order {
                self.behaviors[b].init_particle(p, &mut ctx)?;
            }
            p.age += catch_up;
            p.age_percent = p.age * p.one_over_lifetime;
            for &b in &self.update_order {
                self.behaviors[b].update_particle(p, catch_up)?;
            }
        }
        self.live.append(&mut self.wave);
        Ok(())
    }

    fn complete(&mut self) {
        self.active = false;
        self.paused = false;
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
