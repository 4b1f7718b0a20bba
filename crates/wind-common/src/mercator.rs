//! Spherical Web Mercator (EPSG:3857) conversions.

use std::f64::consts::PI;

/// Sphere radius used by EPSG:3857, in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the equatorial circumference; the grid spans +/- this value.
pub const HALF_EXTENT: f64 = 20037508.342789244;

/// Convert Web Mercator meters to (longitude, latitude) in degrees.
///
/// Longitude is not wrapped; callers that need [-180, 180] should use
/// [`normalize_longitude`].
pub fn mercator_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Convert (longitude, latitude) in degrees to Web Mercator meters.
pub fn lonlat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Wrap a longitude into [-180, 180).
pub fn normalize_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}
