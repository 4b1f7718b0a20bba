//! Resampling the source raster onto one destination tile.

use rayon::prelude::*;
use wind_common::{TileCoord, TileGrid, WindResult};

use crate::codec::WindCalibration;
use crate::raster::WindRaster;
use crate::reproject::to_source_raster;
use crate::types::TileBuffer;

/// Compute the wind vectors for every pixel of a tile.
///
/// Pixel `(row, col)` samples the projected point
/// `(left + col * resolution, top - row * resolution)`. Columns outside the
/// grid wrap around the world; rows outside it are rejected. The whole tile
/// succeeds or the call fails, never a partial buffer.
pub fn compute_tile(
    raster: &WindRaster,
    grid: &TileGrid,
    calibration: &WindCalibration,
    coord: TileCoord,
) -> WindResult<TileBuffer> {
    let extent = grid.tile_extent(&coord)?;
    let coord = coord.normalized()?;
    let resolution = grid.resolution(coord.z);
    let tile_size = grid.tile_size as usize;
    let dims = raster.dims();

    let mut buffer = TileBuffer::new(coord, tile_size);

    for row in 0..tile_size {
        let y = extent.top() - row as f64 * resolution;
        for col in 0..tile_size {
            let x = extent.left() + col as f64 * resolution;
            let cell = to_source_raster(x, y, dims);
            buffer.set(row, col, raster.wind_at(&cell, calibration)?);
        }
    }

    Ok(buffer)
}

/// Compute several tiles in parallel.
///
/// Tiles share no mutable state, so they are spread over the rayon pool.
/// Output order matches `coords`; the first failure fails the batch.
pub fn compute_tiles(
    raster: &WindRaster,
    grid: &TileGrid,
    calibration: &WindCalibration,
    coords: &[TileCoord],
) -> WindResult<Vec<TileBuffer>> {
    coords
        .par_iter()
        .map(|coord| compute_tile(raster, grid, calibration, *coord))
        .collect()
}
