//! Error types for the synthesis pipeline

use thiserror::Error;

/// Result type for cadence operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by generation, encoding, and configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Requested duration is non-positive, not finite, or above the configured limit
    #[error("invalid duration: {seconds} seconds")]
    InvalidDuration {
        /// The rejected duration
        seconds: f64,
    },

    /// Sample rate outside the supported range
    #[error("unsupported sample rate: {rate} Hz (expected {min}..={max})")]
    UnsupportedSampleRate {
        /// The rejected rate
        rate: u32,
        /// Lowest accepted rate
        min: u32,
        /// Highest accepted rate
        max: u32,
    },

    /// Something in the request or configuration cannot be resolved
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// WAV encoding was asked to write zero frames
    #[error("cannot encode an empty audio buffer")]
    EmptyBuffer,

    /// WAV writer failure
    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
