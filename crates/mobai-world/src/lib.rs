//! Level geometry: rectangles, the collision query trait, and a tile grid.

pub mod collisions;
pub mod error;
pub mod geometry;
pub mod tile_grid;

pub use collisions::{Collisions, OpenField};
pub use error::WorldError;
pub use geometry::Rect;
pub use tile_grid::{Marker, TileGrid};
