//! Keyframe lists — (time, value) sequences with pluggable interpolation.
//!
//! A list is created empty, populated by [`KeyframeList::initialize`], and
//! picks one of three interpolation strategies at that point:
//!
//! - **Simple**: exactly two points with the second at time >= 1. Queries are
//!   clamped to [0, 1] and blended directly between the endpoints. A fast
//!   path for the overwhelmingly common start/end configuration.
//! - **Stepped**: hold semantics — the value of the last keyframe whose time
//!   is <= the query, with no blending.
//! - **Complex**: linear interpolation within the bracketing segment, with
//!   no extrapolation past the last keyframe.
//!
//! Values are either plain `f32` or [`Rgb`]; the color variant packs its
//! blended result into a 24-bit `0xRRGGBB` integer with per-channel rounding.

use crate::ease::EaseFn;
use ember_core::{lerp, lerp_packed, EmberError, Result, Rgb};
use serde::{Deserialize, Serialize};

/// A keyframe: a value at a normalized time in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<V> {
    pub value: V,
    pub time: f32,
}

impl<V> Keyframe<V> {
    pub fn new(value: V, time: f32) -> Self {
        Self { value, time }
    }
}

/// A value type a keyframe list can interpolate
pub trait Interpolable: Copy {
    /// What interpolation produces (`f32` for numbers, packed `u32` for colors)
    type Output: Copy + PartialEq + std::fmt::Debug;

    fn blend(a: Self, b: Self, t: f32) -> Self::Output;

    /// Convert a single keyframe value without blending (hold semantics)
    fn hold(self) -> Self::Output;
}

impl Interpolable for f32 {
    type Output = f32;

    fn blend(a: Self, b: Self, t: f32) -> f32 {
        lerp(a, b, t)
    }

    fn hold(self) -> f32 {
        self
    }
}

impl Interpolable for Rgb {
    type Output = u32;

    fn blend(a: Self, b: Self, t: f32) -> u32 {
        lerp_packed(a, b, t)
    }

    fn hold(self) -> u32 {
        self.to_packed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Simple,
    Stepped,
    Complex,
}

/// Ordered (time, value) sequence with strategy-based interpolation.
///
/// Interpolating before `initialize` (or after `reset`) is a fatal
/// [`EmberError::UninitializedKeyframes`].
#[derive(Clone)]
pub struct KeyframeList<V: Interpolable> {
    frames: Vec<Keyframe<V>>,
    strategy: Option<Strategy>,
    stepped: bool,
    ease: Option<EaseFn>,
}

impl<V: Interpolable> KeyframeList<V> {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            strategy: None,
            stepped: false,
            ease: None,
        }
    }

    /// Build the list from ordered keyframe data and select the strategy.
    ///
    /// Times must be non-decreasing and the list non-empty.
    pub fn initialize(
        &mut self,
        frames: Vec<Keyframe<V>>,
        stepped: bool,
        ease: Option<EaseFn>,
    ) -> Result<()> {
        if frames.is_empty() {
            return Err(EmberError::InvalidConfig(
                "keyframe list needs at least one point".into(),
            ));
        }
        for pair in frames.windows(2) {
            if pair[1].time < pair[0].time {
                return Err(EmberError::InvalidConfig(
                    "keyframe times must be non-decreasing".into(),
                ));
            }
        }

        let strategy = if frames.len() == 2 && frames[1].time >= 1.0 {
            Strategy::Simple
        } else if stepped {
            Strategy::Stepped
        } else {
            Strategy::Complex
        };

        self.frames = frames;
        self.strategy = Some(strategy);
        self.stepped = stepped;
        self.ease = ease;
        Ok(())
    }

    /// Return to the uninitialized state
    pub fn reset(&mut self) {
        self.frames.clear();
        self.strategy = None;
        self.stepped = false;
        self.ease = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.strategy.is_some()
    }

    /// The flat keyframe data this list was initialized from
    pub fn frames(&self) -> &[Keyframe<V>] {
        &self.frames
    }

    pub fn interpolate(&self, t: f32) -> Result<V::Output> {
        let strategy = self.strategy.ok_or(EmberError::UninitializedKeyframes)?;
        let t = match self.ease {
            Some(ease) => ease(t),
            None => t,
        };

        Ok(match strategy {
            Strategy::Simple => {
                let t = t.clamp(0.0, 1.0);
                let (a, b) = (&self.frames[0], &self.frames[1]);
                if self.stepped {
                    if t >= b.time {
                        b.value.hold()
                    } else {
                        a.value.hold()
                    }
                } else {
                    V::blend(a.value, b.value, t)
                }
            }
            Strategy::Stepped => {
                let mut i = 0;
                while i + 1 < self.frames.len() && self.frames[i + 1].time <= t {
                    i += 1;
                }
                self.frames[i].value.hold()
            }
            Strategy::Complex => {
                if t <= self.frames[0].time {
                    return Ok(self.frames[0].value.hold());
                }
                let mut i = 0;
                while i + 1 < self.frames.len() && t > self.frames[i + 1].time {
                    i += 1;
                }
                if i + 1 == self.frames.len() {
                    // Past the last keyframe — no extrapolation
                    return Ok(self.frames[i].value.hold());
                }
                let (cur, next) = (&self.frames[i], &self.frames[i + 1]);
                let span = next.time - cur.time;
                if span <= 0.0 {
                    // Coincident times — take the left value, never divide
                    return Ok(cur.value.hold());
                }
                V::blend(cur.value, next.value, (t - cur.time) / span)
            }
        })
    }
}

impl<V: Interpolable> Default for KeyframeList<V> {
    fn default() -> Self {
        Self::new()
    }
}
