//! Common test fixtures for wind field tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Calibration bounds used throughout the tests (min, max) in m/s.
pub const CALIBRATION_RANGE: (f64, f64) = (-27.43, 33.53);

/// Well-known geographic points as (longitude, latitude).
pub mod points {
    /// Oslo
    pub const OSLO: (f64, f64) = (10.75, 59.91);

    /// Null Island
    pub const ORIGIN: (f64, f64) = (0.0, 0.0);

    /// Just west of the antimeridian
    pub const DATELINE_WEST: (f64, f64) = (179.9, -17.0);

    /// Just east of the antimeridian
    pub const DATELINE_EAST: (f64, f64) = (-179.9, -17.0);

    pub const NORTH_POLE: (f64, f64) = (0.0, 90.0);

    pub const SOUTH_POLE: (f64, f64) = (0.0, -90.0);
}

/// Common tile addresses as (z, x, y).
pub mod tiles {
    /// The whole world
    pub const WORLD: (u32, i64, i64) = (0, 0, 0);

    /// Southern Norway at zoom 8
    pub const NORWAY_Z8: (u32, i64, i64) = (8, 135, 74);
}

/// Write raster bytes to a temporary file that lives as long as the handle.
pub fn write_temp_raster(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(bytes).expect("failed to write temp raster");
    file.flush().expect("failed to flush temp raster");
    file
}
