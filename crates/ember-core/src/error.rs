//! Error types for ember

use thiserror::Error;

/// The main error type for ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    /// A style string did not match any recognized encoding
    /// (hex color, functional color, number-with-unit).
    #[error("Decode error: {0}")]
    Decode(String),

    /// A keyframe list is empty, mixes scalar and color entries,
    /// mixes units, or contains an undecodable entry.
    #[error("Keyframe mismatch: {0}")]
    KeyframeMismatch(String),

    /// An emitter configuration is missing a required field or
    /// carries an out-of-range value.
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for ember operations
pub type Result<T> = std::result::Result<T, EmberError>;
