//! Ember Core - Foundational types for the Ember particle engine
//!
//! This crate provides the types the engine crates depend on:
//! - `Vec2` - 2D vector math
//! - `Rgb` - hex-parsed colors with 24-bit packing
//! - Error types and Result alias

mod color;
mod error;
mod types;

pub use color::{lerp_packed, Rgb};
pub use error::{EmberError, Result};
pub use types::{lerp, Vec2};
