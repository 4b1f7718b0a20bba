//! Error types for the wind field engine.

use thiserror::Error;

/// Result type alias using WindError.
pub type WindResult<T> = Result<T, WindError>;

/// Primary error type for wind field operations.
///
/// The type is `Clone` so that a single failed raster load can be handed to
/// every caller that was waiting on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindError {
    // === Caller programming errors ===
    #[error("Channel value out of range [0, 255]: {0}")]
    ChannelOutOfRange(f64),

    #[error("Wind speed must be a non-negative magnitude, got {0}")]
    InvalidSpeed(f64),

    #[error("Invalid tile {z}/{x}/{y}: {message}")]
    InvalidTile {
        z: u32,
        x: i64,
        y: i64,
        message: String,
    },

    #[error("Invalid coordinate (lon={lon}, lat={lat}): {message}")]
    InvalidCoordinate { lon: f64, lat: f64, message: String },

    // === Raster errors ===
    #[error("Failed to fetch raster: {0}")]
    RasterFetch(String),

    #[error("Failed to decode raster: {0}")]
    RasterDecode(String),

    // === Infrastructure errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WindError {
    /// Whether this error is a range violation made by the caller.
    ///
    /// These are never recovered from inside the engine.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            WindError::ChannelOutOfRange(_) | WindError::InvalidSpeed(_)
        )
    }

    /// Whether the error came from loading the source raster.
    ///
    /// Such failures stay cached until the load is explicitly retried.
    pub fn is_raster_error(&self) -> bool {
        matches!(self, WindError::RasterFetch(_) | WindError::RasterDecode(_))
    }
}
