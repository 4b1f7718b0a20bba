//! Tests for tile resampling and feature sampling.

use test_utils::{
    assert_approx_eq, create_checkerboard_raster, create_index_raster, create_uniform_raster, tiles,
};
use wind_common::{TileCoord, TileGrid, WindError};
use wind_field::features::{sample_features, style_features};
use wind_field::tile::{compute_tile, compute_tiles};
use wind_field::{
    CalibrationRange, FeatureStylist, WindCalibration, WindRaster, TILE_CHANNELS,
};

fn identity_calibration() -> WindCalibration {
    WindCalibration {
        u: CalibrationRange::new(0.0, 255.0),
        v: CalibrationRange::new(0.0, 255.0),
    }
}

fn index_raster() -> WindRaster {
    WindRaster::from_rgba(360, 180, create_index_raster(360, 180)).unwrap()
}

fn uniform_raster() -> WindRaster {
    WindRaster::from_rgba(72, 36, create_uniform_raster(72, 36, 128, 128)).unwrap()
}

// ============================================================================
// compute_tile
// ============================================================================

#[test]
fn test_buffer_shape() {
    let grid = TileGrid::web_mercator(16);
    let tile = compute_tile(
        &uniform_raster(),
        &grid,
        &WindCalibration::default(),
        TileCoord::new(3, 2, 5),
    )
    .unwrap();
    assert_eq!(tile.tile_size, 16);
    assert_eq!(tile.pixel_count(), 256);
    assert_eq!(tile.as_slice().len(), 16 * 16 * TILE_CHANNELS);
}

#[test]
fn test_uniform_raster_gives_constant_tile() {
    let grid = TileGrid::web_mercator(8);
    let calibration = WindCalibration::default();
    let expected = calibration.u.decode(128.0).unwrap();

    let tile = compute_tile(&uniform_raster(), &grid, &calibration, TileCoord::new(2, 1, 1))
        .unwrap();
    for row in 0..8 {
        for col in 0..8 {
            let wind = tile.get(row, col);
            assert_approx_eq!(wind.u, expected, 1e-5);
            assert_approx_eq!(wind.v, expected, 1e-5);
            assert_approx_eq!(tile.speed(row, col), expected * 2.0_f64.sqrt(), 1e-5);
        }
    }

    let (min, max, mean) = tile.speed_stats();
    assert!(max - min < 1e-5);
    assert_approx_eq!(mean, expected * 2.0_f64.sqrt(), 1e-5);
}

#[test]
fn test_saturated_raster_tile_succeeds() {
    let raster =
        WindRaster::from_rgba(360, 180, create_uniform_raster(360, 180, 255, 255)).unwrap();
    let grid = TileGrid::web_mercator(32);
    let calibration = WindCalibration::default();
    let max = calibration.u.decode(255.0).unwrap();

    for coord in [
        TileCoord::new(3, 4, 2),
        TileCoord::new(0, 0, 0),
        TileCoord::new(5, 17, 9),
    ] {
        let tile = compute_tile(&raster, &grid, &calibration, coord).unwrap();
        for row in 0..32 {
            for col in 0..32 {
                let wind = tile.get(row, col);
                assert_approx_eq!(wind.u, max, 1e-5);
                assert_approx_eq!(wind.v, max, 1e-5);
            }
        }
    }
}

#[test]
fn test_checkerboard_tile_stays_in_calibrated_range() {
    let raster = WindRaster::from_rgba(91, 45, create_checkerboard_raster(91, 45)).unwrap();
    let grid = TileGrid::web_mercator(64);
    let calibration = WindCalibration::default();
    let (min, max) = (calibration.u.min, calibration.u.max);

    let tile = compute_tile(&raster, &grid, &calibration, TileCoord::new(2, 1, 1)).unwrap();
    for row in 0..64 {
        for col in 0..64 {
            let wind = tile.get(row, col);
            assert!(wind.u >= min - 1e-5 && wind.u <= max + 1e-5);
            assert!(wind.v >= min - 1e-5 && wind.v <= max + 1e-5);
        }
    }
}

#[test]
fn test_encoded_vector_survives_resampling() {
    let calibration = WindCalibration::default();
    let (raw_u, raw_v) = calibration.encode(-12.0, 7.5);
    let raster =
        WindRaster::from_rgba(36, 18, create_uniform_raster(36, 18, raw_u, raw_v)).unwrap();
    let grid = TileGrid::web_mercator(8);

    let tile = compute_tile(&raster, &grid, &calibration, TileCoord::new(1, 0, 1)).unwrap();
    let wind = tile.get(4, 4);
    // One encoding step is about 0.24 m/s
    assert_approx_eq!(wind.u, -12.0, 0.12);
    assert_approx_eq!(wind.v, 7.5, 0.12);
}

#[test]
fn test_top_left_pixel_of_world_tile() {
    // (-180, 85.05) lands on column 0, between rows 4 and 5
    let grid = TileGrid::web_mercator(4);
    let (z, x, y) = tiles::WORLD;
    let tile = compute_tile(&index_raster(), &grid, &identity_calibration(), TileCoord::new(z, x, y))
        .unwrap();
    let wind = tile.get(0, 0);
    assert_approx_eq!(wind.u, 0.0, 1e-6);
    assert_approx_eq!(wind.v, 4.9489, 1e-3);
}

#[test]
fn test_pixel_at_null_island() {
    // Tile 1/1/1 starts at the origin
    let grid = TileGrid::web_mercator(4);
    let tile = compute_tile(&index_raster(), &grid, &identity_calibration(), TileCoord::new(1, 1, 1))
        .unwrap();
    let wind = tile.get(0, 0);
    assert_approx_eq!(wind.u, 180.0, 1e-4);
    assert_approx_eq!(wind.v, 90.0, 1e-4);
}

#[test]
fn test_wrapped_columns_match() {
    let raster = index_raster();
    let grid = TileGrid::web_mercator(8);
    let calibration = identity_calibration();

    let base = compute_tile(&raster, &grid, &calibration, TileCoord::new(2, 1, 2)).unwrap();
    let east = compute_tile(&raster, &grid, &calibration, TileCoord::new(2, 5, 2)).unwrap();
    let west = compute_tile(&raster, &grid, &calibration, TileCoord::new(2, -3, 2)).unwrap();

    assert_eq!(base.as_slice(), east.as_slice());
    assert_eq!(base.as_slice(), west.as_slice());
    assert_eq!(east.coord, TileCoord::new(2, 1, 2));
    assert_eq!(west.coord, TileCoord::new(2, 1, 2));
}

#[test]
fn test_row_outside_grid_fails() {
    let grid = TileGrid::web_mercator(8);
    let err = compute_tile(
        &index_raster(),
        &grid,
        &identity_calibration(),
        TileCoord::new(2, 0, 4),
    )
    .unwrap_err();
    assert!(matches!(err, WindError::InvalidTile { .. }));
}

#[test]
fn test_zoom_above_maximum_fails() {
    let grid = TileGrid::web_mercator(8);
    assert!(compute_tile(
        &index_raster(),
        &grid,
        &identity_calibration(),
        TileCoord::new(grid.max_zoom + 1, 0, 0)
    )
    .is_err());
}

#[test]
fn test_compute_tiles_preserves_order() {
    let raster = index_raster();
    let grid = TileGrid::web_mercator(8);
    let calibration = identity_calibration();
    let coords = vec![
        TileCoord::new(1, 0, 0),
        TileCoord::new(3, 7, 2),
        TileCoord::new(2, 1, 3),
    ];

    let tiles = compute_tiles(&raster, &grid, &calibration, &coords).unwrap();
    assert_eq!(tiles.len(), 3);
    for (tile, coord) in tiles.iter().zip(&coords) {
        let single = compute_tile(&raster, &grid, &calibration, *coord).unwrap();
        assert_eq!(tile, &single);
    }
}

#[test]
fn test_compute_tiles_fails_on_any_bad_tile() {
    let grid = TileGrid::web_mercator(8);
    let coords = vec![TileCoord::new(1, 0, 0), TileCoord::new(1, 0, 9)];
    assert!(compute_tiles(&index_raster(), &grid, &identity_calibration(), &coords).is_err());
}

// ============================================================================
// Feature sampling
// ============================================================================

#[test]
fn test_sample_features_grid() {
    let grid = TileGrid::web_mercator(4);
    let tile = compute_tile(&index_raster(), &grid, &identity_calibration(), TileCoord::new(1, 1, 1))
        .unwrap();
    let features = sample_features(&tile, &grid, 2).unwrap();
    assert_eq!(features.len(), 4);

    let resolution = grid.resolution(1);
    assert_approx_eq!(features[0].x, resolution, 1e-6);
    assert_approx_eq!(features[0].y, -resolution, 1e-6);

    let wind = tile.get(1, 1);
    assert_eq!(features[0].u, wind.u);
    assert_eq!(features[0].v, wind.v);
}

#[test]
fn test_sample_features_rejects_bad_spacing() {
    let grid = TileGrid::web_mercator(4);
    let tile = compute_tile(&index_raster(), &grid, &identity_calibration(), TileCoord::new(0, 0, 0))
        .unwrap();
    assert!(matches!(sample_features(&tile, &grid, 0), Err(WindError::Config(_))));
    assert!(sample_features(&tile, &grid, 5).is_err());
    assert_eq!(sample_features(&tile, &grid, 4).unwrap().len(), 1);
}

#[test]
fn test_style_features() {
    let grid = TileGrid::web_mercator(8);
    let calibration = WindCalibration::default();
    let tile = compute_tile(&uniform_raster(), &grid, &calibration, TileCoord::new(1, 0, 0))
        .unwrap();
    let features = sample_features(&tile, &grid, 4).unwrap();

    let styled = style_features(&FeatureStylist::default(), &features, 0.25).unwrap();
    assert_eq!(styled.len(), 4);
    for (item, feature) in styled.iter().zip(&features) {
        // 4.48 m/s = 8.7 kn
        assert_eq!(item.style.bucket.label(), "5");
        assert_eq!(&item.feature, feature);
        assert_approx_eq!(item.style.rotation, 1.25 * std::f64::consts::PI + 0.25, 1e-5);
    }

    let json = serde_json::to_value(&styled[0]).unwrap();
    assert!(json["x"].is_number());
    assert_eq!(json["style"]["bucket"], "5");
}
