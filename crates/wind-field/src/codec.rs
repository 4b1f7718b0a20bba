//! Conversion between encoded raster channels and physical wind speed.
//!
//! Each of the u and v axes is stored as an 8-bit channel. A calibration
//! range maps 0 to `min` and 255 to `max` in m/s.

use serde::{Deserialize, Serialize};
use wind_common::{WindError, WindResult};

/// Largest value an encoded channel can hold.
pub const CHANNEL_MAX: f64 = 255.0;

/// Physical range represented by one encoded channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRange {
    /// Velocity (m/s) encoded as 0
    pub min: f64,
    /// Velocity (m/s) encoded as 255
    pub max: f64,
}

impl CalibrationRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Decode a raw (possibly interpolated) channel value into m/s.
    ///
    /// Values outside `[0, 255]` are rejected rather than clamped.
    pub fn decode(&self, raw: f64) -> WindResult<f64> {
        if !(0.0..=CHANNEL_MAX).contains(&raw) {
            return Err(WindError::ChannelOutOfRange(raw));
        }
        Ok(self.min + (self.max - self.min) * raw / CHANNEL_MAX)
    }

    /// Encode a velocity into the nearest 8-bit channel value.
    ///
    /// Velocities outside the calibrated range saturate at 0 or 255.
    pub fn encode(&self, velocity: f64) -> u8 {
        let raw = (velocity - self.min) / (self.max - self.min) * CHANNEL_MAX;
        raw.round().clamp(0.0, CHANNEL_MAX) as u8
    }

    /// Check that the range is usable for decoding.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err("calibration bounds must be finite".to_string());
        }
        if self.max <= self.min {
            return Err(format!(
                "calibration max ({}) must be greater than min ({})",
                self.max, self.min
            ));
        }
        Ok(())
    }
}

/// Calibration for both wind axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindCalibration {
    pub u: CalibrationRange,
    pub v: CalibrationRange,
}

impl Default for WindCalibration {
    fn default() -> Self {
        Self {
            u: CalibrationRange::new(-27.43, 33.53),
            v: CalibrationRange::new(-27.43, 33.53),
        }
    }
}

impl WindCalibration {
    /// Decode a pair of raw u/v channel values.
    pub fn decode(&self, raw_u: f64, raw_v: f64) -> WindResult<(f64, f64)> {
        Ok((self.u.decode(raw_u)?, self.v.decode(raw_v)?))
    }

    /// Encode a physical wind vector into two channel values.
    pub fn encode(&self, u: f64, v: f64) -> (u8, u8) {
        (self.u.encode(u), self.v.encode(v))
    }

    pub fn validate(&self) -> Result<(), String> {
        self.u.validate().map_err(|e| format!("u axis: {}", e))?;
        self.v.validate().map_err(|e| format!("v axis: {}", e))
    }
}
