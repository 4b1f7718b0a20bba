//! Common types shared by the wind field engine and its front ends.

pub mod bbox;
pub mod error;
pub mod mercator;
pub mod tile;

pub use bbox::BoundingBox;
pub use error::{WindError, WindResult};
pub use tile::{TileCoord, TileGrid, ZOOM_LIMIT};
