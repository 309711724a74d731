#![warn(missing_docs)]

use crate::error::GridError;
use super::point_types::TilePoint;
use super::WalkableMap;

/// Highest tile elevation a floorplan may author.
pub const MAX_TILE_HEIGHT: u8 = 9;

/// One cell of the room grid.
///
/// A tile either carries a walkable surface at some elevation, or blocks
/// movement entirely. Tiles are addressed by their `TilePoint` and are only
/// changed through the explicit grid-edit operations on [`RoomGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Elevation of the tile surface, in height units (`0..=MAX_TILE_HEIGHT`).
    pub height: u8,
    /// Whether an avatar may stand on or cross this tile.
    pub walkable: bool,
}

impl Tile {
    /// Creates a walkable tile at the given elevation.
    #[must_use]
    pub const fn open(height: u8) -> Self {
        Tile { height, walkable: true }
    }

    /// Creates a blocked tile.
    #[must_use]
    pub const fn blocked() -> Self {
        Tile { height: 0, walkable: false }
    }
}

/// A 2D grid of room tiles with an optional door reference.
///
/// The grid is authored once per room load (usually from a textual
/// floorplan) and replaced wholesale on floorplan updates. The door is a
/// coordinate reference into the grid, never ownership; it must always point
/// at a walkable tile.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomGrid {
    /// Width of the room in tiles (x axis).
    width: usize,
    /// Depth of the room in tiles (y axis).
    depth: usize,
    /// Designated door tile, if any.
    door: Option<TilePoint>,
    /// Row-major tile storage.
    tiles: Vec<Tile>,
}

impl RoomGrid {
    /// Creates a new `RoomGrid` with every tile open at elevation zero.
    ///
    /// # Arguments
    /// * `width` - Width of the room in tiles (x axis)
    /// * `depth` - Depth of the room in tiles (y axis)
    ///
    /// # Returns
    /// * `Result<Self, GridError>` - The created grid or an error if the
    ///   dimensions are invalid
    pub fn new(width: usize, depth: usize) -> Result<Self, GridError> {
        if width == 0 || depth == 0 {
            return Err(GridError::InvalidDimensions("Width and depth must be non-zero"));
        }

        // Check for potential overflow in tile allocation
        if width.checked_mul(depth).is_none() {
            return Err(GridError::InvalidDimensions("Room dimensions too large, would cause overflow"));
        }

        Ok(RoomGrid {
            width,
            depth,
            door: None,
            tiles: vec![Tile::open(0); width * depth],
        })
    }

    /// Parses a textual floorplan into a `RoomGrid`.
    ///
    /// The format is one row of tiles per line: a digit `0..=9` authors a
    /// walkable tile at that elevation, `x` (or `X`) a blocked tile. Blank
    /// lines and surrounding whitespace are ignored; all rows must have the
    /// same length.
    ///
    /// # Arguments
    /// * `plan` - The floorplan text
    ///
    /// # Returns
    /// * `Result<Self, GridError>` - The authored grid or an error if the
    ///   plan is empty, ragged or contains unrecognized characters
    pub fn from_floorplan(plan: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = plan
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let depth = rows.len();
        if depth == 0 {
            return Err(GridError::InvalidFloorplan("plan contains no rows"));
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(GridError::InvalidFloorplan("plan contains no columns"));
        }

        let mut grid = RoomGrid::new(width, depth)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GridError::InvalidFloorplan("rows must all have the same length"));
            }
            for (x, c) in row.chars().enumerate() {
                let tile = match c {
                    'x' | 'X' => Tile::blocked(),
                    '0'..='9' => Tile::open(c as u8 - b'0'),
                    _ => return Err(GridError::InvalidFloorplan("unrecognized tile character")),
                };
                grid.tiles[y * width + x] = tile;
            }
        }
        Ok(grid)
    }

    /// Calculates the index in the tile vector for an in-bounds point
    fn index(&self, p: TilePoint) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    /// Returns whether `p` lies inside the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, p: TilePoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.depth
    }

    /// Returns the width of the room in tiles.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the depth of the room in tiles.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the highest elevation among walkable tiles, or zero for a
    /// fully blocked room.
    #[must_use]
    pub fn max_height(&self) -> u8 {
        self.tiles
            .iter()
            .filter(|t| t.walkable)
            .map(|t| t.height)
            .max()
            .unwrap_or(0)
    }

    /// Returns the tile at `p`, if in bounds.
    #[must_use]
    pub fn tile_at(&self, p: TilePoint) -> Option<&Tile> {
        if self.in_bounds(p) {
            Some(&self.tiles[self.index(p)])
        } else {
            None
        }
    }

    /// Sets whether the tile at `p` is walkable.
    ///
    /// Blocking the current door tile clears the door reference, keeping the
    /// door invariant intact.
    ///
    /// # Arguments
    /// * `p` - Tile coordinate to edit
    /// * `walkable` - New walkability flag
    ///
    /// # Returns
    /// * `Result<(), GridError>` - Success or error if out of bounds
    pub fn set_walkable(&mut self, p: TilePoint, walkable: bool) -> Result<(), GridError> {
        if !self.in_bounds(p) {
            return Err(GridError::OutOfBounds("Tile index out of bounds"));
        }
        let index = self.index(p);
        self.tiles[index].walkable = walkable;
        if !walkable && self.door == Some(p) {
            self.door = None;
        }
        Ok(())
    }

    /// Sets the elevation of the tile at `p`.
    ///
    /// # Arguments
    /// * `p` - Tile coordinate to edit
    /// * `height` - New elevation (`0..=MAX_TILE_HEIGHT`)
    ///
    /// # Returns
    /// * `Result<(), GridError>` - Success or error if out of bounds or the
    ///   elevation exceeds the supported maximum
    pub fn set_height(&mut self, p: TilePoint, height: u8) -> Result<(), GridError> {
        if !self.in_bounds(p) {
            return Err(GridError::OutOfBounds("Tile index out of bounds"));
        }
        if height > MAX_TILE_HEIGHT {
            return Err(GridError::InvalidHeight("elevation exceeds maximum"));
        }
        let index = self.index(p);
        self.tiles[index].height = height;
        Ok(())
    }

    /// Designates the tile at `p` as the room door.
    ///
    /// # Arguments
    /// * `p` - Tile coordinate of the door
    ///
    /// # Returns
    /// * `Result<(), GridError>` - Success or error if the tile is out of
    ///   bounds or not walkable
    pub fn set_door(&mut self, p: TilePoint) -> Result<(), GridError> {
        if !self.in_bounds(p) || !self.tiles[self.index(p)].walkable {
            return Err(GridError::InvalidDoor("door must reference a walkable tile"));
        }
        self.door = Some(p);
        Ok(())
    }

    /// Removes the door designation, if any.
    pub fn clear_door(&mut self) {
        self.door = None;
    }
}

impl WalkableMap for RoomGrid {
    fn is_walkable(&self, p: TilePoint) -> bool {
        self.tile_at(p).is_some_and(|t| t.walkable)
    }

    fn height_at(&self, p: TilePoint) -> Option<u8> {
        self.tile_at(p).filter(|t| t.walkable).map(|t| t.height)
    }

    fn door(&self) -> Option<TilePoint> {
        self.door
    }
}

impl std::fmt::Display for RoomGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Renders back the floorplan format: digits for walkable tiles,
        // 'x' for blocked ones.
        for y in 0..self.depth {
            for x in 0..self.width {
                let tile = self.tiles[y * self.width + x];
                if tile.walkable {
                    write!(f, "{}", tile.height)?;
                } else {
                    write!(f, "x")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = RoomGrid::new(10, 8).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.depth(), 8);
        assert!(grid.door().is_none());
        // Freshly created grids are fully open at elevation zero
        assert!(grid.is_walkable(TilePoint::new(0, 0)));
        assert!(grid.is_walkable(TilePoint::new(9, 7)));
        assert_eq!(grid.height_at(TilePoint::new(5, 5)), Some(0));
    }

    #[test]
    fn test_invalid_creation() {
        assert!(matches!(
            RoomGrid::new(0, 10),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            RoomGrid::new(10, 0),
            Err(GridError::InvalidDimensions(_))
        ));
        assert!(matches!(
            RoomGrid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_out_of_range_queries_are_total() {
        let grid = RoomGrid::new(4, 4).unwrap();
        assert!(!grid.is_walkable(TilePoint::new(-1, 0)));
        assert!(!grid.is_walkable(TilePoint::new(0, -3)));
        assert!(!grid.is_walkable(TilePoint::new(4, 0)));
        assert!(!grid.is_walkable(TilePoint::new(0, 4)));
        assert_eq!(grid.height_at(TilePoint::new(-1, -1)), None);
        assert_eq!(grid.height_at(TilePoint::new(100, 100)), None);
    }

    #[test]
    fn test_edit_operations() {
        let mut grid = RoomGrid::new(5, 5).unwrap();
        let p = TilePoint::new(2, 3);

        grid.set_walkable(p, false).unwrap();
        assert!(!grid.is_walkable(p));
        assert_eq!(grid.height_at(p), None);

        grid.set_walkable(p, true).unwrap();
        grid.set_height(p, 4).unwrap();
        assert_eq!(grid.height_at(p), Some(4));

        assert!(matches!(
            grid.set_walkable(TilePoint::new(5, 0), false),
            Err(GridError::OutOfBounds(_))
        ));
        assert!(matches!(
            grid.set_height(TilePoint::new(0, -1), 2),
            Err(GridError::OutOfBounds(_))
        ));
        assert!(matches!(
            grid.set_height(p, MAX_TILE_HEIGHT + 1),
            Err(GridError::InvalidHeight(_))
        ));
    }

    #[test]
    fn test_door_invariant() {
        let mut grid = RoomGrid::new(4, 4).unwrap();
        let p = TilePoint::new(1, 2);

        grid.set_door(p).unwrap();
        assert_eq!(grid.door(), Some(p));

        // A door may not reference a blocked or out-of-bounds tile
        grid.set_walkable(TilePoint::new(3, 3), false).unwrap();
        assert!(matches!(
            grid.set_door(TilePoint::new(3, 3)),
            Err(GridError::InvalidDoor(_))
        ));
        assert!(matches!(
            grid.set_door(TilePoint::new(-1, 0)),
            Err(GridError::InvalidDoor(_))
        ));
        assert_eq!(grid.door(), Some(p));

        // Blocking the door tile clears the weak reference
        grid.set_walkable(p, false).unwrap();
        assert_eq!(grid.door(), None);

        grid.set_walkable(p, true).unwrap();
        grid.set_door(p).unwrap();
        grid.clear_door();
        assert_eq!(grid.door(), None);
    }

    #[test]
    fn test_floorplan_parsing() {
        let plan = "
            0001
            x021
            0x00
        ";
        let grid = RoomGrid::from_floorplan(plan).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.depth(), 3);
        assert!(grid.is_walkable(TilePoint::new(0, 0)));
        assert!(!grid.is_walkable(TilePoint::new(0, 1)));
        assert!(!grid.is_walkable(TilePoint::new(1, 2)));
        assert_eq!(grid.height_at(TilePoint::new(3, 0)), Some(1));
        assert_eq!(grid.height_at(TilePoint::new(2, 1)), Some(2));
        assert_eq!(grid.max_height(), 2);
    }

    #[test]
    fn test_floorplan_rejects_malformed_plans() {
        assert!(matches!(
            RoomGrid::from_floorplan(""),
            Err(GridError::InvalidFloorplan(_))
        ));
        assert!(matches!(
            RoomGrid::from_floorplan("   \n  \n"),
            Err(GridError::InvalidFloorplan(_))
        ));
        assert!(matches!(
            RoomGrid::from_floorplan("000\n00"),
            Err(GridError::InvalidFloorplan(_))
        ));
        assert!(matches!(
            RoomGrid::from_floorplan("0a0\n000"),
            Err(GridError::InvalidFloorplan(_))
        ));
    }

    #[test]
    fn test_floorplan_display_round_trip() {
        let plan = "00x1\nx220\n0009\n";
        let grid = RoomGrid::from_floorplan(plan).unwrap();
        assert_eq!(format!("{}", grid), plan);
    }

    #[test]
    fn test_max_height_fully_blocked() {
        let grid = RoomGrid::from_floorplan("xx\nxx").unwrap();
        assert_eq!(grid.max_height(), 0);
    }
}
