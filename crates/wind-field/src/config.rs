//! Configuration for the wind field engine.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::{BucketThresholds, KNOTS_PER_MPS};
use crate::codec::WindCalibration;
use crate::reproject::RasterDims;
use crate::source::RasterLocation;

/// Configuration for the wind field engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindFieldConfig {
    /// Per-axis decode ranges for the raster channels.
    pub calibration: WindCalibration,

    /// Destination tile width and height in pixels.
    pub tile_size: u32,

    /// Dimensions used when the raster bytes carry no image header.
    pub fallback_raster_dims: Option<RasterDims>,

    /// Conversion factor from m/s to knots.
    pub knots_per_mps: f64,

    /// Knot bucket boundaries.
    pub buckets: BucketThresholds,

    /// Pixels between sampled glyph features within a tile.
    pub feature_spacing: usize,

    /// Where to load the raster from.
    pub raster: Option<RasterLocation>,
}

impl Default for WindFieldConfig {
    fn default() -> Self {
        Self {
            calibration: WindCalibration::default(),
            tile_size: 256,
            fallback_raster_dims: None,
            knots_per_mps: KNOTS_PER_MPS,
            buckets: BucketThresholds::default(),
            feature_spacing: 32,
            raster: None,
        }
    }
}

impl WindFieldConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from environment variables that are set.
    pub fn apply_env(&mut self) {
        if let Some(val) = env_parse("WIND_U_MIN") {
            self.calibration.u.min = val;
        }
        if let Some(val) = env_parse("WIND_U_MAX") {
            self.calibration.u.max = val;
        }
        if let Some(val) = env_parse("WIND_V_MIN") {
            self.calibration.v.min = val;
        }
        if let Some(val) = env_parse("WIND_V_MAX") {
            self.calibration.v.max = val;
        }

        if let Some(size) = env_parse("WIND_TILE_SIZE") {
            self.tile_size = size;
        }

        let width = env_parse("WIND_RASTER_WIDTH");
        let height = env_parse("WIND_RASTER_HEIGHT");
        if let (Some(width), Some(height)) = (width, height) {
            self.fallback_raster_dims = Some(RasterDims::new(width, height));
        }

        if let Some(factor) = env_parse("WIND_KNOTS_PER_MPS") {
            self.knots_per_mps = factor;
        }

        if let Some(lowest) = env_parse("WIND_BUCKET_LOWEST") {
            self.buckets.lowest = lowest;
        }
        if let Some(step) = env_parse("WIND_BUCKET_STEP") {
            self.buckets.step = step;
        }
        if let Some(ceiling) = env_parse("WIND_BUCKET_CEILING") {
            self.buckets.ceiling = ceiling;
        }

        if let Some(spacing) = env_parse("WIND_FEATURE_SPACING") {
            self.feature_spacing = spacing;
        }

        // A URL wins over a path when both are set
        if let Ok(path) = std::env::var("WIND_RASTER_PATH") {
            self.raster = Some(RasterLocation::File { path: path.into() });
        }
        if let Ok(url) = std::env::var("WIND_RASTER_URL") {
            self.raster = Some(RasterLocation::Http { url });
        }
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse wind field config")
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.calibration.validate()?;

        if self.tile_size == 0 {
            return Err("tile_size must be > 0".to_string());
        }

        if let Some(dims) = self.fallback_raster_dims {
            if dims.width == 0 || dims.height == 0 {
                return Err("fallback_raster_dims must be non-zero".to_string());
            }
        }

        if !self.knots_per_mps.is_finite() || self.knots_per_mps <= 0.0 {
            return Err("knots_per_mps must be a positive number".to_string());
        }

        self.buckets.validate()?;

        if self.feature_spacing == 0 || self.feature_spacing > self.tile_size as usize {
            return Err(format!(
                "feature_spacing must be in [1, {}]",
                self.tile_size
            ));
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.parse().ok())
}
