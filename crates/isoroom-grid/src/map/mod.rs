//! Room map functionality.
//!
//! This module provides the room tile grid, its textual floorplan format and
//! the walkability query contract consumed by pathfinding and locomotion.

pub mod point_types;
pub mod room;

pub use point_types::{ScreenPoint, TilePoint};
pub use room::{RoomGrid, Tile, MAX_TILE_HEIGHT};

/// Walkability queries exposed by a room grid provider.
///
/// This trait is the in-process contract between the room model and its
/// consumers (pathfinding and avatar locomotion). All queries are total:
/// out-of-range coordinates answer "not walkable" / "no height" rather than
/// failing, so consumers can probe freely without pre-validating bounds.
pub trait WalkableMap {
    /// Returns whether an avatar may stand on or cross the tile at `p`.
    ///
    /// Out-of-range coordinates (including negative ones) are not walkable.
    fn is_walkable(&self, p: TilePoint) -> bool;

    /// Returns the tile elevation at `p`, defined only where walkable.
    fn height_at(&self, p: TilePoint) -> Option<u8>;

    /// Returns the designated door tile, if one is set.
    fn door(&self) -> Option<TilePoint>;
}
