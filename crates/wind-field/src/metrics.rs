//! Metric recording for raster loads, tiles and point queries.
//!
//! Only the `metrics` facade is used here; installing a recorder is left to
//! the host process.

use metrics::{counter, histogram};
use std::time::Duration;

/// Record the start of a raster fetch.
pub fn record_raster_fetch() {
    counter!("wind_raster_fetches_total").increment(1);
}

/// Record a failed raster fetch or decode.
pub fn record_raster_failure() {
    counter!("wind_raster_failures_total").increment(1);
}

/// Record a completed raster load.
pub fn record_raster_loaded(elapsed: Duration) {
    histogram!("wind_raster_load_seconds").record(elapsed.as_secs_f64());
}

/// Record one computed tile.
pub fn record_tile(elapsed: Duration) {
    counter!("wind_tiles_computed_total").increment(1);
    histogram!("wind_tile_compute_seconds").record(elapsed.as_secs_f64());
}

/// Record a point query.
pub fn record_point_query() {
    counter!("wind_point_queries_total").increment(1);
}
