//! Destination tile grid definitions.
//!
//! Implements the Web Mercator quad-tree pyramid the map widget renders
//! into: zoom `z` has `2^z x 2^z` tiles, each `tile_size` pixels square,
//! with the resolution halving at every zoom step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mercator::HALF_EXTENT;
use crate::{BoundingBox, WindError, WindResult};

/// Deepest zoom level any tile address may use.
///
/// Column and row indices at this level still fit comfortably in an `i64`.
pub const ZOOM_LIMIT: u32 = 30;

/// A tile coordinate (z/x/y).
///
/// Columns are signed because a cylindrical world map can request tiles
/// left of column 0 or right of the last column; see [`TileCoord::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: i64,
    /// Row (y), 0 at the top
    pub y: i64,
}

impl TileCoord {
    pub fn new(z: u32, x: i64, y: i64) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along each axis at this zoom, or `None` above
    /// [`ZOOM_LIMIT`].
    pub fn matrix_size(&self) -> Option<i64> {
        (self.z <= ZOOM_LIMIT).then(|| 1i64 << self.z)
    }

    /// Wrap the column into `[0, 2^z)` and check the row.
    ///
    /// Rows are not periodic, so a row outside the grid is an error.
    pub fn normalized(&self) -> WindResult<TileCoord> {
        let n = self.matrix_size().ok_or_else(|| WindError::InvalidTile {
            z: self.z,
            x: self.x,
            y: self.y,
            message: format!("zoom exceeds limit {}", ZOOM_LIMIT),
        })?;
        if self.y < 0 || self.y >= n {
            return Err(WindError::InvalidTile {
                z: self.z,
                x: self.x,
                y: self.y,
                message: format!("row must be in [0, {})", n),
            });
        }

        Ok(TileCoord {
            z: self.z,
            x: self.x.rem_euclid(n),
            y: self.y,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Descriptor of the destination tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Top-left corner of the grid in projected units
    pub origin: (f64, f64),
    /// Units per pixel at zoom 0
    pub base_resolution: f64,
    /// Tile width and height in pixels
    pub tile_size: u32,
    /// Highest zoom level accepted
    pub max_zoom: u32,
}

impl TileGrid {
    /// Standard Web Mercator (Google/OSM) grid for the given tile size.
    pub fn web_mercator(tile_size: u32) -> Self {
        Self {
            origin: (-HALF_EXTENT, HALF_EXTENT),
            base_resolution: 2.0 * HALF_EXTENT / tile_size as f64,
            tile_size,
            max_zoom: 24,
        }
    }

    /// Resolution (meters per pixel) at a zoom level.
    pub fn resolution(&self, zoom: u32) -> f64 {
        self.base_resolution / f64::from(zoom).exp2()
    }

    /// Projected extent of a tile.
    ///
    /// The column is normalized first, so `2^z + k` yields the same extent
    /// as `k`.
    pub fn tile_extent(&self, coord: &TileCoord) -> WindResult<BoundingBox> {
        if coord.z > self.max_zoom {
            return Err(WindError::InvalidTile {
                z: coord.z,
                x: coord.x,
                y: coord.y,
                message: format!("zoom exceeds maximum {}", self.max_zoom),
            });
        }

        let coord = coord.normalized()?;
        let span = self.resolution(coord.z) * self.tile_size as f64;

        let min_x = self.origin.0 + coord.x as f64 * span;
        let max_y = self.origin.1 - coord.y as f64 * span;

        Ok(BoundingBox::new(min_x, max_y - span, min_x + span, max_y))
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::web_mercator(256)
    }
}
