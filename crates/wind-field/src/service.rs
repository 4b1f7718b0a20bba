//! High-level wind field service.
//!
//! `WindFieldService` ties the memoized raster load to tile generation,
//! glyph styling and point queries. It is what a map host calls into.
//!
//! # Example
//!
//! ```rust,ignore
//! use wind_field::{WindFieldConfig, WindFieldService};
//! use wind_common::TileCoord;
//!
//! let config = WindFieldConfig::from_env();
//! let service = WindFieldService::from_config(config)?;
//!
//! let tile = service.load_tile(TileCoord::new(8, 134, 72)).await?;
//! let sample = service.query_point(10.75, 59.91).await?;
//! println!("{}", sample); // "7.41m/s @212.3°"
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;
use wind_common::{TileCoord, TileGrid, WindError, WindResult};

use crate::classify::{SpeedBucket, SpeedClassifier};
use crate::codec::WindCalibration;
use crate::config::WindFieldConfig;
use crate::features::{sample_features, style_features, StyledFeature, WindFeature};
use crate::loader::RasterLoader;
use crate::metrics;
use crate::query::{query_mercator, query_point, WindSample};
use crate::raster::WindRaster;
use crate::source::RasterSource;
use crate::style::{FeatureStylist, StyleDescriptor};
use crate::tile::{compute_tile, compute_tiles};
use crate::types::TileBuffer;

/// Entry point for tile, feature and point requests.
#[derive(Debug)]
pub struct WindFieldService {
    loader: RasterLoader,
    grid: TileGrid,
    calibration: WindCalibration,
    stylist: FeatureStylist,
    classifier: SpeedClassifier,
    feature_spacing: usize,
}

impl WindFieldService {
    /// Create a service reading the raster from `source`.
    pub fn new(config: &WindFieldConfig, source: Arc<dyn RasterSource>) -> WindResult<Self> {
        config.validate().map_err(WindError::Config)?;

        let classifier = SpeedClassifier::new(config.knots_per_mps, config.buckets);
        Ok(Self {
            loader: RasterLoader::new(source, config.fallback_raster_dims),
            grid: TileGrid::web_mercator(config.tile_size),
            calibration: config.calibration,
            stylist: FeatureStylist::new(classifier),
            classifier,
            feature_spacing: config.feature_spacing,
        })
    }

    /// Create a service using the raster location from the config.
    pub fn from_config(config: WindFieldConfig) -> WindResult<Self> {
        let location = config
            .raster
            .clone()
            .ok_or_else(|| WindError::Config("no raster location configured".to_string()))?;
        Self::new(&config, location.into_source())
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn classifier(&self) -> &SpeedClassifier {
        &self.classifier
    }

    /// Await the shared raster load.
    pub async fn raster(&self) -> WindResult<Arc<WindRaster>> {
        self.loader.get().await
    }

    /// Retry after a failed raster load.
    pub async fn retry_raster(&self) -> WindResult<Arc<WindRaster>> {
        self.loader.retry().await
    }

    /// Forget the loaded raster so the next request fetches a fresh one.
    pub async fn reload_raster(&self) {
        self.loader.reset().await;
    }

    /// Wind vectors for every pixel of a tile.
    ///
    /// The CPU-bound resampling runs on the blocking pool.
    pub async fn load_tile(&self, coord: TileCoord) -> WindResult<TileBuffer> {
        let raster = self.loader.get().await?;
        let grid = self.grid;
        let calibration = self.calibration;

        let start = Instant::now();
        let buffer = tokio::task::spawn_blocking(move || {
            compute_tile(&raster, &grid, &calibration, coord)
        })
        .await
        .map_err(|e| WindError::Internal(format!("tile task failed: {}", e)))??;

        debug!(
            tile = %coord,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Computed wind tile"
        );
        metrics::record_tile(start.elapsed());
        Ok(buffer)
    }

    /// Wind vectors for several tiles, computed in parallel.
    pub async fn load_tiles(&self, coords: Vec<TileCoord>) -> WindResult<Vec<TileBuffer>> {
        let raster = self.loader.get().await?;
        let grid = self.grid;
        let calibration = self.calibration;

        let start = Instant::now();
        let buffers = tokio::task::spawn_blocking(move || {
            compute_tiles(&raster, &grid, &calibration, &coords)
        })
        .await
        .map_err(|e| WindError::Internal(format!("tile batch task failed: {}", e)))??;

        debug!(
            tiles = buffers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Computed wind tile batch"
        );
        if !buffers.is_empty() {
            let per_tile = start.elapsed() / buffers.len() as u32;
            for _ in &buffers {
                metrics::record_tile(per_tile);
            }
        }
        Ok(buffers)
    }

    /// Sparse point features for a tile.
    pub async fn tile_features(&self, coord: TileCoord) -> WindResult<Vec<WindFeature>> {
        let buffer = self.load_tile(coord).await?;
        sample_features(&buffer, &self.grid, self.feature_spacing)
    }

    /// Styled glyph features for a tile and view rotation.
    pub async fn styled_tile_features(
        &self,
        coord: TileCoord,
        view_rotation: f64,
    ) -> WindResult<Vec<StyledFeature>> {
        let features = self.tile_features(coord).await?;
        style_features(&self.stylist, &features, view_rotation)
    }

    /// Style a single wind sample.
    pub fn style(&self, u: f64, v: f64, view_rotation: f64) -> WindResult<StyleDescriptor> {
        self.stylist.style(u, v, view_rotation)
    }

    /// Knot bucket for a speed in m/s.
    pub fn classify(&self, speed_mps: f64) -> WindResult<SpeedBucket> {
        self.classifier.classify(speed_mps)
    }

    /// Wind at a geographic point.
    pub async fn query_point(&self, lon: f64, lat: f64) -> WindResult<WindSample> {
        let raster = self.loader.get().await?;
        metrics::record_point_query();
        query_point(&raster, &self.calibration, lon, lat)
    }

    /// Wind at a Web Mercator map coordinate.
    pub async fn query_mercator(&self, x: f64, y: f64) -> WindResult<WindSample> {
        let raster = self.loader.get().await?;
        metrics::record_point_query();
        query_mercator(&raster, &self.calibration, x, y)
    }
}
