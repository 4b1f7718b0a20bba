//! Thinning a tile buffer into sparse glyph features.

use serde::Serialize;
use wind_common::{TileGrid, WindError, WindResult};

use crate::style::{FeatureStylist, StyleDescriptor};
use crate::types::TileBuffer;

/// One point feature carrying a wind vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindFeature {
    /// Web Mercator x in meters
    pub x: f64,
    /// Web Mercator y in meters
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

/// A feature together with its glyph style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyledFeature {
    #[serde(flatten)]
    pub feature: WindFeature,
    pub style: StyleDescriptor,
}

/// Pick one feature every `spacing` pixels, centered in each block.
pub fn sample_features(
    buffer: &TileBuffer,
    grid: &TileGrid,
    spacing: usize,
) -> WindResult<Vec<WindFeature>> {
    if spacing == 0 || spacing > buffer.tile_size {
        return Err(WindError::Config(format!(
            "feature spacing must be in [1, {}], got {}",
            buffer.tile_size, spacing
        )));
    }

    let extent = grid.tile_extent(&buffer.coord)?;
    let resolution = grid.resolution(buffer.coord.z);
    let start = spacing / 2;

    let mut features = Vec::new();
    for row in (start..buffer.tile_size).step_by(spacing) {
        for col in (start..buffer.tile_size).step_by(spacing) {
            let wind = buffer.get(row, col);
            features.push(WindFeature {
                x: extent.left() + col as f64 * resolution,
                y: extent.top() - row as f64 * resolution,
                u: wind.u,
                v: wind.v,
            });
        }
    }
    Ok(features)
}

/// Style a batch of features for one view rotation.
pub fn style_features(
    stylist: &FeatureStylist,
    features: &[WindFeature],
    view_rotation: f64,
) -> WindResult<Vec<StyledFeature>> {
    features
        .iter()
        .map(|feature| {
            Ok(StyledFeature {
                feature: *feature,
                style: stylist.style(feature.u, feature.v, view_rotation)?,
            })
        })
        .collect()
}
