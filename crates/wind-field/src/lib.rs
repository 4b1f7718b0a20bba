//! Wind field resampling and classification engine.
//!
//! Turns a world wind raster (u/v encoded in the red and green channels of
//! an RGBA image) into per-tile wind vectors on a Web Mercator grid, knot
//! buckets and glyph rotations for rendering, and point samples for
//! click-to-inspect.
//!
//! # Architecture
//!
//! ```text
//! Tile request (z/x/y)
//!      │
//!      ▼
//! WindFieldService::load_tile
//!      │
//!      ├─► RasterLoader::get ──► shared future (one fetch + decode)
//!      │
//!      └─► compute_tile (blocking pool)
//!               │
//!               ├─► to_source_raster   (mercator -> lon/lat -> column/row)
//!               ├─► bilinear           (four corners, per channel)
//!               └─► CalibrationRange::decode (0-255 -> m/s)
//!                        │
//!                        ▼
//!                   TileBuffer (u, v, speed per pixel)
//!                        │
//!                        ▼
//!            sample_features + FeatureStylist (bucket, rotation)
//! ```

pub mod classify;
pub mod codec;
pub mod config;
pub mod features;
pub mod interpolation;
pub mod loader;
pub mod metrics;
pub mod query;
pub mod raster;
pub mod reproject;
pub mod service;
pub mod source;
pub mod style;
pub mod tile;
pub mod types;

// Re-export commonly used types at crate root
pub use classify::{BucketThresholds, SpeedBucket, SpeedClassifier, KNOTS_PER_MPS};
pub use codec::{CalibrationRange, WindCalibration};
pub use config::WindFieldConfig;
pub use features::{StyledFeature, WindFeature};
pub use interpolation::bilinear;
pub use loader::RasterLoader;
pub use query::{compass_bearing, WindSample};
pub use raster::{RasterSample, WindRaster};
pub use reproject::{RasterDims, SourceCell};
pub use service::WindFieldService;
pub use source::{
    FileRasterSource, HttpRasterSource, MemoryRasterSource, RasterLocation, RasterSource,
};
pub use style::{glyph_rotation, FeatureStylist, StyleDescriptor};
pub use types::{TileBuffer, WindVector, TILE_CHANNELS};
