//! Core value types produced by the engine.

use serde::{Deserialize, Serialize};
use wind_common::TileCoord;

/// Physical wind vector in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindVector {
    /// Eastward component
    pub u: f64,
    /// Northward component
    pub v: f64,
}

impl WindVector {
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Magnitude in m/s.
    pub fn speed(&self) -> f64 {
        (self.u * self.u + self.v * self.v).sqrt()
    }
}

/// Number of floats stored per tile pixel: u, v and speed.
pub const TILE_CHANNELS: usize = 3;

/// Dense wind vectors for one destination tile.
///
/// Row-major, `tile_size * tile_size` pixels with [`TILE_CHANNELS`] floats
/// each. Produced fresh for every request and handed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TileBuffer {
    /// Normalized address of the tile
    pub coord: TileCoord,
    /// Width and height in pixels
    pub tile_size: usize,
    data: Vec<f32>,
}

impl TileBuffer {
    /// Allocate a zeroed buffer.
    pub fn new(coord: TileCoord, tile_size: usize) -> Self {
        Self {
            coord,
            tile_size,
            data: vec![0.0; tile_size * tile_size * TILE_CHANNELS],
        }
    }

    /// Index of the first channel of a pixel.
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        (row * self.tile_size + col) * TILE_CHANNELS
    }

    /// Store a vector (and its speed) at a pixel.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, wind: WindVector) {
        let i = self.offset(row, col);
        self.data[i] = wind.u as f32;
        self.data[i + 1] = wind.v as f32;
        self.data[i + 2] = wind.speed() as f32;
    }

    /// Vector stored at a pixel.
    pub fn get(&self, row: usize, col: usize) -> WindVector {
        let i = self.offset(row, col);
        WindVector::new(self.data[i] as f64, self.data[i + 1] as f64)
    }

    /// Stored speed channel at a pixel.
    pub fn speed(&self, row: usize, col: usize) -> f32 {
        self.data[self.offset(row, col) + 2]
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.tile_size * self.tile_size
    }

    /// Raw interleaved floats.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Minimum, maximum and mean speed over the tile.
    pub fn speed_stats(&self) -> (f32, f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for pixel in self.data.chunks_exact(TILE_CHANNELS) {
            min = min.min(pixel[2]);
            max = max.max(pixel[2]);
            sum += pixel[2] as f64;
        }
        let mean = if self.data.is_empty() {
            0.0
        } else {
            (sum / self.pixel_count() as f64) as f32
        };
        (min, max, mean)
    }
}
