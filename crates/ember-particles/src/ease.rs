//! Easing functions — map normalized progress to eased progress.
//!
//! All functions take and return values in [0, 1] (endpoints map exactly;
//! `back` overshoots in between by design). Keyframe lists apply one of
//! these to the query time before interpolating.

use serde::{Deserialize, Serialize};

/// An easing function pluggable into a keyframe list
pub type EaseFn = fn(f32) -> f32;

/// Named easing curves, as they appear in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    CircIn,
    CircOut,
    CircInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Ease {
    /// Resolve the named curve to its function
    pub fn as_fn(self) -> EaseFn {
        match self {
            Ease::Linear => linear,
            Ease::SineIn => sine_in,
            Ease::SineOut => sine_out,
            Ease::SineInOut => sine_in_out,
            Ease::QuadIn => quad_in,
            Ease::QuadOut => quad_out,
            Ease::QuadInOut => quad_in_out,
            Ease::CubicIn => cubic_in,
            Ease::CubicOut => cubic_out,
            Ease::CubicInOut => cubic_in_out,
            Ease::QuartIn => quart_in,
            Ease::QuartOut => quart_out,
            Ease::QuartInOut => quart_in_out,
            Ease::CircIn => circ_in,
            Ease::CircOut => circ_out,
            Ease::CircInOut => circ_in_out,
            Ease::ExpoIn => expo_in,
            Ease::ExpoOut => expo_out,
            Ease::ExpoInOut => expo_in_out,
            Ease::BackIn => back_in,
            Ease::BackOut => back_out,
            Ease::BackInOut => back_in_out,
            Ease::BounceIn => bounce_in,
            Ease::BounceOut => bounce_out,
            Ease::BounceInOut => bounce_in_out,
        }
    }
}

pub fn linear(t: f32) -> f32 {
    t
}

pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * std::f32::consts::FRAC_PI_2).cos()
}

pub fn sine_out(t: f32) -> f32 {
    (t * std::f32::consts::FRAC_PI_2).sin()
}

pub fn sine_in_out(t: f32) -> f32 {
    0.5 * (1.0 - (t * std::f32::consts::PI).cos())
}

pub fn quad_in(t: f32) -> f32 {
    t * t
}

pub fn quad_out(t: f32) -> f32 {
    t * (2.0 - t)
}

pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

pub fn cubic_out(t: f32) -> f32 {
    let u = t - 1.0;
    u * u * u + 1.0
}

pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * u * u * u + 1.0
    }
}

pub fn quart_in(t: f32) -> f32 {
    t * t * t * t
}

pub fn quart_out(t: f32) -> f32 {
    let u = t - 1.0;
    1.0 - u * u * u * u
}

pub fn quart_in_out(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let u = t - 1.0;
        1.0 - 8.0 * u * u * u * u
    }
}

pub fn circ_in(t: f32) -> f32 {
    1.0 - (1.0 - t * t).max(0.0).sqrt()
}

pub fn circ_out(t: f32) -> f32 {
    let u = t - 1.0;
    (1.0 - u * u).max(0.0).sqrt()
}

pub fn circ_in_out(t: f32) -> f32 {
    if t < 0.5 {
        0.5 * (1.0 - (1.0 - 4.0 * t * t).max(0.0).sqrt())
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * ((1.0 - u * u).max(0.0).sqrt() + 1.0)
    }
}

pub fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2.0_f32.powf(10.0 * (t - 1.0))
    }
}

pub fn expo_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

pub fn expo_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        0.5 * 2.0_f32.powf(20.0 * t - 10.0)
    } else {
        1.0 - 0.5 * 2.0_f32.powf(-20.0 * t + 10.0)
    }
}

const BACK_OVERSHOOT: f32 = 1.70158;

pub fn back_in(t: f32) -> f32 {
    t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT)
}

pub fn back_out(t: f32) -> f32 {
    let u = t - 1.0;
    u * u * ((BACK_OVERSHOOT + 1.0) * u + BACK_OVERSHOOT) + 1.0
}

pub fn back_in_out(t: f32) -> f32 {
    let s = BACK_OVERSHOOT * 1.525;
    if t < 0.5 {
        let u = 2.0 * t;
        0.5 * u * u * ((s + 1.0) * u - s)
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * (u * u * ((s + 1.0) * u + s) + 2.0)
    }
}

pub fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let u = t - 1.5 / D;
        N * u * u + 0.75
    } else if t < 2.5 / D {
        let u = t - 2.25 / D;
        N * u * u + 0.9375
    } else {
        let u = t - 2.625 / D;
        N * u * u + 0.984375
    }
}

pub fn bounce_in(t: f32) -> f32 {
    1.0 - bounce_out(1.0 - t)
}

pub fn bounce_in_out(t: f32) -> f32 {
    if t < 0.5 {
        0.5 * bounce_in(2.0 * t)
    } else {
        0.5 * bounce_out(2.0 * t - 1.0) + 0.5
    }
}
