//! Click-to-inspect wind queries at a single point.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::Serialize;
use wind_common::mercator::{mercator_to_lonlat, normalize_longitude};
use wind_common::{WindError, WindResult};

use crate::codec::WindCalibration;
use crate::raster::WindRaster;
use crate::reproject::geographic_to_source;
use crate::types::WindVector;

/// Interpolated wind at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindSample {
    pub u: f64,
    pub v: f64,
    /// Speed in m/s
    pub speed: f64,
    /// Compass bearing in degrees, always in `[0, 360)`
    pub bearing: f64,
}

impl WindSample {
    pub fn from_vector(wind: WindVector) -> Self {
        Self {
            u: wind.u,
            v: wind.v,
            speed: wind.speed(),
            bearing: compass_bearing(wind.u, wind.v),
        }
    }
}

impl fmt::Display for WindSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}m/s @{:.1}°", self.speed, self.bearing)
    }
}

/// Bearing in degrees for display, normalized to `[0, 360)`.
///
/// Same angle as the glyph rotation without the view term, but wrapped,
/// because it is shown to people rather than fed to an image rotation.
pub fn compass_bearing(u: f64, v: f64) -> f64 {
    let rad = PI - v.atan2(u) + FRAC_PI_2;
    (rad * (180.0 / PI) + 360.0) % 360.0
}

/// Wind at a geographic point.
pub fn query_point(
    raster: &WindRaster,
    calibration: &WindCalibration,
    lon: f64,
    lat: f64,
) -> WindResult<WindSample> {
    if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(WindError::InvalidCoordinate {
            lon,
            lat,
            message: "longitude must be finite and latitude in [-90, 90]".to_string(),
        });
    }

    let cell = geographic_to_source(lon, lat, raster.dims());
    let wind = raster.wind_at(&cell, calibration)?;
    Ok(WindSample::from_vector(wind))
}

/// Wind at a Web Mercator map coordinate.
pub fn query_mercator(
    raster: &WindRaster,
    calibration: &WindCalibration,
    x: f64,
    y: f64,
) -> WindResult<WindSample> {
    let (lon, lat) = mercator_to_lonlat(x, y);
    query_point(raster, calibration, normalize_longitude(lon), lat)
}
