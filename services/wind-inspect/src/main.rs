//! Wind field inspection tool.
//!
//! Loads the configured wind raster once and prints tiles, glyph features,
//! point samples or the bucket ladder as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wind_common::TileCoord;
use wind_field::{
    RasterLocation, SpeedBucket, SpeedClassifier, WindFieldConfig, WindFieldService,
    TILE_CHANNELS,
};

#[derive(Parser, Debug)]
#[command(name = "wind-inspect")]
#[command(about = "Inspect wind tiles, glyph features and point samples")]
struct Args {
    /// YAML configuration file (environment variables override it)
    #[arg(short, long, env = "WIND_CONFIG")]
    config: Option<PathBuf>,

    /// Raster path or http(s) URL, overriding the configuration
    #[arg(short, long)]
    raster: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resample one tile and print its speed summary
    Tile {
        z: u32,
        #[arg(allow_hyphen_values = true)]
        x: i64,
        y: i64,
        /// Print every pixel as [u, v, speed] triples
        #[arg(long)]
        full: bool,
    },
    /// Print the styled glyph features of a tile
    Features {
        z: u32,
        #[arg(allow_hyphen_values = true)]
        x: i64,
        y: i64,
        /// View rotation in radians
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotation: f64,
    },
    /// Sample the wind at a longitude/latitude
    Point {
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        #[arg(allow_hyphen_values = true)]
        lat: f64,
    },
    /// List the knot buckets
    Buckets,
}

#[derive(Serialize)]
struct TileSummary {
    tile: String,
    tile_size: usize,
    speed_min: f32,
    speed_max: f32,
    speed_mean: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<[f32; 3]>>,
}

#[derive(Serialize)]
struct PointReport {
    lon: f64,
    lat: f64,
    u: f64,
    v: f64,
    speed: f64,
    bearing: f64,
    bucket: String,
    label: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs);

    let config = load_config(&args)?;
    info!(
        tile_size = config.tile_size,
        raster = ?config.raster,
        "Loaded configuration"
    );

    match args.command {
        Command::Buckets => print_json(&list_buckets(&config)),
        Command::Tile { z, x, y, full } => {
            let service = WindFieldService::from_config(config)?;
            let tile = service.load_tile(TileCoord::new(z, x, y)).await?;
            let (speed_min, speed_max, speed_mean) = tile.speed_stats();
            let data = full.then(|| {
                tile.as_slice()
                    .chunks_exact(TILE_CHANNELS)
                    .map(|p| [p[0], p[1], p[2]])
                    .collect()
            });
            print_json(&TileSummary {
                tile: tile.coord.to_string(),
                tile_size: tile.tile_size,
                speed_min,
                speed_max,
                speed_mean,
                data,
            })
        }
        Command::Features { z, x, y, rotation } => {
            let service = WindFieldService::from_config(config)?;
            let features = service
                .styled_tile_features(TileCoord::new(z, x, y), rotation)
                .await?;
            print_json(&features)
        }
        Command::Point { lon, lat } => {
            let service = WindFieldService::from_config(config)?;
            let sample = service.query_point(lon, lat).await?;
            let bucket = service.classify(sample.speed)?;
            print_json(&PointReport {
                lon,
                lat,
                u: sample.u,
                v: sample.v,
                speed: sample.speed,
                bearing: sample.bearing,
                bucket: bucket.label(),
                label: sample.to_string(),
            })
        }
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> Result<WindFieldConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = WindFieldConfig::from_yaml_file(path)?;
            config.apply_env();
            config
        }
        None => WindFieldConfig::from_env(),
    };

    if let Some(raster) = &args.raster {
        config.raster = Some(parse_location(raster));
    }

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid wind field configuration")?;
    Ok(config)
}

/// Buckets of the configured classifier; needs no raster.
fn list_buckets(config: &WindFieldConfig) -> Vec<SpeedBucket> {
    SpeedClassifier::new(config.knots_per_mps, config.buckets).buckets()
}

fn parse_location(raster: &str) -> RasterLocation {
    if raster.starts_with("http://") || raster.starts_with("https://") {
        RasterLocation::Http {
            url: raster.to_string(),
        }
    } else {
        RasterLocation::File {
            path: raster.into(),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{}", out);
    Ok(())
}
