#![warn(missing_docs)]
#![doc = "Tile grid, walkability model and isometric projection for room-based worlds."]
#![doc = ""]
#![doc = "This crate provides the room tile grid with its textual floorplan format,"]
#![doc = "the walkability query contract consumed by pathfinding and locomotion,"]
#![doc = "and the pure isometric screen projection."]

pub mod error;
pub mod map;
pub mod project;

pub use error::GridError;
pub use map::{RoomGrid, ScreenPoint, Tile, TilePoint, WalkableMap, MAX_TILE_HEIGHT};
pub use project::{tile_to_screen, screen_to_tile, HEIGHT_STEP, TILE_HALF_HEIGHT, TILE_HALF_WIDTH};
