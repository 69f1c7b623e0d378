//! Typed emitter configuration.
//!
//! Every behavior config is a tagged union keyed by `mode` (or `shape` for
//! spawn), matched exhaustively when behaviors are built. Field names
//! serialize in camelCase, matching the configuration files hosts produce.

use crate::ease::Ease;
use crate::keyframes::{Interpolable, Keyframe, KeyframeList};
use crate::particle::TextureHandle;
use ember_core::{Result, Rgb, Vec2};
use serde::{Deserialize, Serialize};

/// Config format version understood by this emitter.
///
/// A mismatch on apply is a logged warning, not a rejection.
pub const EMITTER_VERSION: u32 = 1;

/// Raw keyframe list data as it appears in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData<V> {
    pub keyframes: Vec<Keyframe<V>>,
    #[serde(default)]
    pub stepped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
}

impl<V: Interpolable> ListData<V> {
    /// Build and initialize a keyframe list from this data
    pub fn build(&self) -> Result<KeyframeList<V>> {
        let mut list = KeyframeList::new();
        list.initialize(self.keyframes.clone(), self.stepped, self.ease.map(Ease::as_fn))?;
        Ok(list)
    }
}

pub type ValueListData = ListData<f32>;
pub type ColorListData = ListData<Rgb>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AlphaConfig {
    /// One fixed alpha for the particle's whole life
    Static { value: f32 },
    /// Interpolated by age over the particle's life
    List { data: ValueListData },
    /// Sampled once per particle at a uniform random list position
    Random { data: ValueListData },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ColorConfig {
    Static { value: Rgb },
    List { data: ColorListData },
    Random { data: ColorListData },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ScaleConfig {
    Static {
        value: f32,
    },
    List {
        x: ValueListData,
        /// Defaults to mirroring the X list
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<ValueListData>,
    },
    Random {
        x: ValueListData,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<ValueListData>,
    },
}

/// Rotation behavior config. All angles are degrees; the engine converts to
/// radians when the behavior is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RotationConfig {
    Static {
        value: f32,
    },
    List {
        data: ValueListData,
    },
    /// Face the spawn direction vector, set once at init
    Direction,
    /// Start at a random rotation and speed, then integrate acceleration
    Acceleration {
        min_start: f32,
        max_start: f32,
        #[serde(default)]
        min_speed: f32,
        #[serde(default)]
        max_speed: f32,
        acceleration: f32,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovementMode {
    /// Configured values are velocities, integrated into position
    #[default]
    Linear,
    /// Configured values are accelerations, integrated into velocity first
    Acceleration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovementSpace {
    /// X/Y map directly to world axes
    #[default]
    Global,
    /// X scales the perpendicular of the spawn direction, Y scales forward
    Local,
}

/// Where per-particle movement values come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MovementSource {
    /// X and Y each sampled independently in [minSpeed, maxSpeed] at spawn
    Speed { min_speed: f32, max_speed: f32 },
    /// Keyframe-driven; Y defaults to mirroring the X list
    Lists {
        x: ValueListData,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<ValueListData>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementConfig {
    #[serde(default)]
    pub mode: MovementMode,
    #[serde(default)]
    pub space: MovementSpace,
    #[serde(flatten)]
    pub source: MovementSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SpawnShape {
    /// The emitter position itself
    Point,
    /// Random offset along the local x axis, centered
    Line { width: f32 },
    /// Random offset in both axes, centered
    Rectangle { width: f32, height: f32 },
    /// Uniform areal density between the inner and outer radii
    Circle { inner_radius: f32, outer_radius: f32 },
}

fn default_direction() -> Vec2 {
    Vec2::UP
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnConfig {
    #[serde(flatten)]
    pub shape: SpawnShape,
    /// Forward vector stored on each spawned particle for downstream
    /// behaviors (direction rotation, local-space movement)
    #[serde(default = "default_direction")]
    pub direction: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TextureConfig {
    /// Every particle gets the same texture
    Static { texture: TextureHandle },
    /// Each particle picks one texture at spawn
    Random { textures: Vec<TextureHandle> },
    /// Frame selection driven by elapsed time
    Animated {
        textures: Vec<TextureHandle>,
        /// Frames per second; when omitted the animation exactly spans the
        /// particle's lifetime
        #[serde(default, skip_serializing_if = "Option::is_none")]
        framerate: Option<f32>,
        /// Wrap via modulo instead of clamping to the last frame
        #[serde(default)]
        looping: bool,
    },
}

/// The full declarative emitter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitterConfig {
    pub emitter_version: u32,
    /// Seconds; a particle's lifetime is sampled uniformly in [min, max]
    pub min_particle_lifetime: f32,
    pub max_particle_lifetime: f32,
    /// Seconds between spawn waves
    pub spawn_interval: f32,
    /// Per-slot spawn probability in [0, 1]
    pub spawn_chance: f32,
    pub max_particles: usize,
    /// Attach new particles behind existing ones in the host container
    pub add_at_back: bool,
    pub particles_per_wave: usize,
    /// Seconds of emission before spawning stops; `None` emits forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitter_lifetime: Option<f32>,
    /// Emitter spawn position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec2>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_behavior: Option<AlphaConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_behavior: Option<ColorConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_behavior: Option<MovementConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_behavior: Option<RotationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_behavior: Option<ScaleConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_behavior: Option<SpawnConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_behavior: Option<TextureConfig>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emitter_version: EMITTER_VERSION,
            min_particle_lifetime: 1.0,
            max_particle_lifetime: 2.0,
            spawn_interval: 0.1,
            spawn_chance: 1.0,
            max_particles: 256,
            add_at_back: false,
            particles_per_wave: 1,
            emitter_lifetime: None,
            pos: None,
            alpha_behavior: None,
            color_behavior: None,
            movement_behavior: None,
            rotation_behavior: None,
            scale_behavior: None,
            spawn_behavior: None,
            texture_behavior: None,
        }
    }
}
