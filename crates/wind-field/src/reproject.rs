//! Mapping destination coordinates into the source raster.
//!
//! The source raster is an equirectangular world grid: column 0 starts at
//! -180 degrees, row 0 is the north pole. Longitude is periodic so columns
//! wrap; latitude is not, so rows clamp.

use serde::{Deserialize, Serialize};
use wind_common::mercator::mercator_to_lonlat;

/// Size of the source raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterDims {
    pub width: usize,
    pub height: usize,
}

impl RasterDims {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// The source cell surrounding a reprojected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceCell {
    /// Fractional offset from `x1` towards `x2`
    pub x_along: f64,
    /// Fractional offset from `y1` towards `y2`
    pub y_along: f64,
    pub x1: usize,
    pub x2: usize,
    pub y1: usize,
    pub y2: usize,
}

/// Wrap a column index onto the cylinder: `width` becomes 0, -1 becomes `width - 1`.
#[inline]
pub fn wrap_column(col: i64, width: usize) -> usize {
    col.rem_euclid(width as i64) as usize
}

/// Clamp a row index to `[0, height - 1]`.
#[inline]
pub fn clamp_row(row: i64, height: usize) -> usize {
    row.clamp(0, height as i64 - 1) as usize
}

/// Locate a geographic point in the source raster.
///
/// Latitude must lie in `[-90, 90]`; this is only asserted in debug builds.
pub fn geographic_to_source(lon: f64, lat: f64, dims: RasterDims) -> SourceCell {
    debug_assert!(
        (-90.0..=90.0).contains(&lat),
        "latitude {} outside [-90, 90]",
        lat
    );

    let x = dims.width as f64 * (lon + 180.0) / 360.0;
    let y = dims.height as f64 * (90.0 - lat) / 180.0;

    let x_floor = x.floor();
    let y_floor = y.floor();

    SourceCell {
        x_along: x - x_floor,
        y_along: y - y_floor,
        x1: wrap_column(x_floor as i64, dims.width),
        x2: wrap_column(x.ceil() as i64, dims.width),
        y1: clamp_row(y_floor as i64, dims.height),
        y2: clamp_row(y.ceil() as i64, dims.height),
    }
}

/// Locate a Web Mercator point (meters) in the source raster.
pub fn to_source_raster(x: f64, y: f64, dims: RasterDims) -> SourceCell {
    let (lon, lat) = mercator_to_lonlat(x, y);
    geographic_to_source(lon, lat, dims)
}
