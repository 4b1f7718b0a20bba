//! The decoded source wind raster.

use image::GenericImageView;
use tracing::debug;
use wind_common::{WindError, WindResult};

use crate::codec::WindCalibration;
use crate::interpolation::bilinear;
use crate::reproject::{RasterDims, SourceCell};
use crate::types::WindVector;

/// One RGBA pixel of the source raster.
///
/// Channel 0 holds the encoded u component, channel 1 the encoded v
/// component. Channels 2 and 3 are carried but unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSample(pub [u8; 4]);

impl RasterSample {
    #[inline]
    pub fn u(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn v(&self) -> u8 {
        self.0[1]
    }
}

/// Encoded world wind raster, immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct WindRaster {
    width: usize,
    height: usize,
    /// Interleaved RGBA, row-major from the north-west corner
    pixels: Vec<u8>,
}

impl WindRaster {
    /// Wrap an interleaved RGBA buffer.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> WindResult<Self> {
        if width == 0 || height == 0 {
            return Err(WindError::RasterDecode(format!(
                "raster dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if pixels.len() != width * height * 4 {
            return Err(WindError::RasterDecode(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                width * height * 4,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an encoded image, or a headerless RGBA buffer when the format
    /// is not recognized and fallback dimensions are configured.
    pub fn decode(bytes: &[u8], fallback: Option<RasterDims>) -> WindResult<Self> {
        match image::guess_format(bytes) {
            Ok(format) => {
                let img = image::load_from_memory_with_format(bytes, format)
                    .map_err(|e| WindError::RasterDecode(e.to_string()))?;
                let (width, height) = img.dimensions();
                debug!(?format, width, height, "Decoded wind raster image");
                Self::from_rgba(width as usize, height as usize, img.to_rgba8().into_raw())
            }
            Err(_) => match fallback {
                Some(dims) => {
                    debug!(
                        width = dims.width,
                        height = dims.height,
                        "Unrecognized image header, treating bytes as raw RGBA"
                    );
                    Self::from_rgba(dims.width, dims.height, bytes.to_vec())
                }
                None => Err(WindError::RasterDecode(
                    "unrecognized image format and no fallback dimensions configured".to_string(),
                )),
            },
        }
    }

    pub fn dims(&self) -> RasterDims {
        RasterDims::new(self.width, self.height)
    }

    /// Pixel at integer coordinates.
    ///
    /// Indices come from the reprojector and are always in bounds.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> RasterSample {
        debug_assert!(x < self.width && y < self.height);
        let i = (y * self.width + x) * 4;
        RasterSample([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Interpolated raw (u, v) channel values for a source cell.
    pub fn interpolate_channels(&self, cell: &SourceCell) -> (f64, f64) {
        let s11 = self.sample(cell.x1, cell.y1);
        let s21 = self.sample(cell.x2, cell.y1);
        let s12 = self.sample(cell.x1, cell.y2);
        let s22 = self.sample(cell.x2, cell.y2);

        let u = bilinear(
            cell.x_along,
            cell.y_along,
            s11.u() as f64,
            s21.u() as f64,
            s12.u() as f64,
            s22.u() as f64,
        );
        let v = bilinear(
            cell.x_along,
            cell.y_along,
            s11.v() as f64,
            s21.v() as f64,
            s12.v() as f64,
            s22.v() as f64,
        );
        (u, v)
    }

    /// Physical wind vector for a source cell.
    pub fn wind_at(&self, cell: &SourceCell, calibration: &WindCalibration) -> WindResult<WindVector> {
        let (raw_u, raw_v) = self.interpolate_channels(cell);
        let (u, v) = calibration.decode(raw_u, raw_v)?;
        Ok(WindVector::new(u, v))
    }
}
