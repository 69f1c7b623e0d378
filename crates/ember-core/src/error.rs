//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    /// A keyframe list was asked to interpolate before `initialize` ran.
    /// Indicates a configuration-ordering bug in the caller.
    #[error("Keyframe list used before initialization")]
    UninitializedKeyframes,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    /// An animated texture computed a frame index outside its texture array.
    /// Signals a framerate/duration misconfiguration.
    #[error("Animation frame {frame} out of range (have {available} frames)")]
    MissingFrame { frame: usize, available: usize },
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;
