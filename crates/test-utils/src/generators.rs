//! Synthetic wind raster generators.
//!
//! All generators return interleaved RGBA bytes, row-major from the
//! north-west corner, with u in the red channel and v in the green channel.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

/// A raster where every pixel holds the same encoded u/v pair.
///
/// # Example
///
/// ```
/// use test_utils::create_uniform_raster;
///
/// let pixels = create_uniform_raster(4, 2, 128, 64);
/// assert_eq!(pixels.len(), 4 * 2 * 4);
/// assert_eq!(&pixels[0..4], &[128, 64, 0, 255]);
/// ```
pub fn create_uniform_raster(width: usize, height: usize, raw_u: u8, raw_v: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&[raw_u, raw_v, 0, 255]);
    }
    data
}

/// A raster whose u channel encodes the column and v channel the row.
///
/// Values are `col % 256` and `row % 256`, which makes it easy to see which
/// source pixels a sample was taken from.
pub fn create_index_raster(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        for col in 0..width {
            data.extend_from_slice(&[(col % 256) as u8, (row % 256) as u8, 0, 255]);
        }
    }
    data
}

/// A raster with a west-to-east u gradient and a north-to-south v gradient.
///
/// u runs from 0 at the first column to 255 at the last; v from 0 at the
/// top row to 255 at the bottom row.
pub fn create_gradient_raster(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        for col in 0..width {
            let u = col as f64 / (width.max(2) - 1) as f64 * 255.0;
            let v = row as f64 / (height.max(2) - 1) as f64 * 255.0;
            data.extend_from_slice(&[u.round() as u8, v.round() as u8, 0, 255]);
        }
    }
    data
}

/// A raster alternating between the two extreme channel values.
///
/// Even cells hold u=0, v=255 and odd cells u=255, v=0, so every source
/// cell mixes fully saturated and empty corners.
pub fn create_checkerboard_raster(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for row in 0..height {
        for col in 0..width {
            let (u, v) = if (row + col) % 2 == 0 { (0, 255) } else { (255, 0) };
            data.extend_from_slice(&[u, v, 0, 255]);
        }
    }
    data
}

/// Encode RGBA bytes as a PNG image.
pub fn encode_png(width: usize, height: usize, rgba: Vec<u8>) -> Vec<u8> {
    let image = RgbaImage::from_raw(width as u32, height as u32, rgba)
        .expect("RGBA buffer length must match dimensions");
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageOutputFormat::Png)
        .expect("PNG encoding failed");
    out.into_inner()
}
