#![warn(missing_docs)]
#![doc = "Avatar locomotion for isometric room worlds."]
#![doc = ""]
#![doc = "This crate provides the walker state machine that turns a computed tile"]
#![doc = "route into a continuous, frame-interpolated, direction-aware movement"]
#![doc = "trace, driven by caller-supplied update ticks."]

use std::collections::VecDeque;
use std::fmt;

use isoroom_grid::{TilePoint, WalkableMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::LocomotionError;

/// Default leg duration, in caller time units.
pub const DEFAULT_LEG_DURATION: u64 = 500;
/// Default number of update calls per walk-cycle frame advance.
pub const DEFAULT_FRAME_INTERVAL: u32 = 3;
/// Default number of frames in the walk cycle.
pub const DEFAULT_FRAME_COUNT: u32 = 4;

/// A continuous avatar position `(x, y, z)` in tile units.
///
/// `x` and `y` live on the same axes as the discrete tile grid but take
/// fractional values while a leg interpolates; `z` is the elevation in tile
/// height units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3Position {
    /// Tile-space x position.
    pub x: f32,
    /// Tile-space y position.
    pub y: f32,
    /// Elevation in tile height units.
    pub z: f32,
}

impl Vec3Position {
    /// Construct a new position.
    ///
    /// # Arguments
    ///
    /// * `x`: Tile-space x position.
    /// * `y`: Tile-space y position.
    /// * `z`: Elevation in tile height units.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3Position { x, y, z }
    }

    /// Construct a position centered on a discrete tile.
    pub fn from_tile(tile: TilePoint, z: f32) -> Self {
        Vec3Position::new(tile.x as f32, tile.y as f32, z)
    }

    /// Returns this position snapped to the nearest whole tile, rounding
    /// each axis independently. The elevation is unchanged.
    #[must_use]
    pub fn snapped(self) -> Self {
        Vec3Position::new(self.x.round(), self.y.round(), self.z)
    }

    /// Returns the discrete tile this position occupies (floor of `x`, `y`).
    #[must_use]
    pub fn tile(self) -> TilePoint {
        TilePoint::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Returns the nearest discrete tile (round of `x`, `y`).
    #[must_use]
    pub fn nearest_tile(self) -> TilePoint {
        TilePoint::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl fmt::Display for Vec3Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2}, y: {:.2}, z: {:.2})", self.x, self.y, self.z)
    }
}

/// One of the 8 discrete facing directions, clockwise from north.
///
/// The discriminant is the wire/sprite index convention: `0=N, 1=NE, 2=E,
/// 3=SE, 4=S, 5=SW, 6=W, 7=NW`. North is decreasing `y`, east is
/// increasing `x`.
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Facing decreasing `y`.
    North = 0,
    /// Facing increasing `x`, decreasing `y`.
    NorthEast = 1,
    /// Facing increasing `x`.
    East = 2,
    /// Facing increasing `x`, increasing `y`.
    SouthEast = 3,
    /// Facing increasing `y`.
    South = 4,
    /// Facing decreasing `x`, increasing `y`.
    SouthWest = 5,
    /// Facing decreasing `x`.
    West = 6,
    /// Facing decreasing `x`, decreasing `y`.
    NorthWest = 7,
}

impl Heading {
    /// Derives a heading from the sign pattern of a tile delta.
    ///
    /// Deltas with both axes nonzero map to the diagonal headings,
    /// axis-aligned deltas to the cardinal ones. A delta of `(0, 0)` carries
    /// no direction and returns `None`; callers keep their current heading
    /// in that case.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        let heading = match (dx.signum(), dy.signum()) {
            (0, -1) => Heading::North,
            (1, -1) => Heading::NorthEast,
            (1, 0) => Heading::East,
            (1, 1) => Heading::SouthEast,
            (0, 1) => Heading::South,
            (-1, 1) => Heading::SouthWest,
            (-1, 0) => Heading::West,
            (-1, -1) => Heading::NorthWest,
            _ => return None,
        };
        Some(heading)
    }

    /// Returns the sprite/wire index of this heading.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "N",
            Heading::NorthEast => "NE",
            Heading::East => "E",
            Heading::SouthEast => "SE",
            Heading::South => "S",
            Heading::SouthWest => "SW",
            Heading::West => "W",
            Heading::NorthWest => "NW",
        };
        write!(f, "{}", name)
    }
}

/// Walker timing and walk-cycle configuration.
///
/// All of the walker's fixed constants are injected through this struct so
/// the state machine stays testable in isolation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Duration of one leg, in caller time units.
    leg_duration: u64,
    /// Update calls per walk-cycle frame advance.
    frame_interval: u32,
    /// Frames in the walk cycle.
    frame_count: u32,
}

impl WalkerConfig {
    /// Construct a new walker configuration.
    ///
    /// # Arguments
    ///
    /// * `leg_duration`: Duration of one waypoint traversal, in the same
    ///   time units the caller passes to [`Walker::update`].
    /// * `frame_interval`: Number of update calls between walk-cycle frame
    ///   advances. The cadence is deliberately tied to update-call frequency
    ///   rather than wall-clock time.
    /// * `frame_count`: Number of frames in the walk cycle.
    ///
    /// # Errors
    ///
    /// Returns `Err(LocomotionError::InvalidLegDuration)` if `leg_duration` is zero.
    /// Returns `Err(LocomotionError::InvalidFrameInterval)` if `frame_interval` is zero.
    /// Returns `Err(LocomotionError::InvalidFrameCount)` if `frame_count` is zero.
    pub const fn new(
        leg_duration: u64,
        frame_interval: u32,
        frame_count: u32,
    ) -> Result<Self, LocomotionError> {
        if leg_duration == 0 {
            return Err(LocomotionError::InvalidLegDuration("must be positive"));
        }
        if frame_interval == 0 {
            return Err(LocomotionError::InvalidFrameInterval("must be positive"));
        }
        if frame_count == 0 {
            return Err(LocomotionError::InvalidFrameCount("must be positive"));
        }
        Ok(WalkerConfig {
            leg_duration,
            frame_interval,
            frame_count,
        })
    }

    /// Returns the leg duration in caller time units.
    pub fn leg_duration(&self) -> u64 {
        self.leg_duration
    }

    /// Returns the number of update calls per frame advance.
    pub fn frame_interval(&self) -> u32 {
        self.frame_interval
    }

    /// Returns the number of frames in the walk cycle.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        WalkerConfig {
            leg_duration: DEFAULT_LEG_DURATION,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            frame_count: DEFAULT_FRAME_COUNT,
        }
    }
}

impl fmt::Display for WalkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WalkerConfig (leg: {} units, cadence: 1/{} calls, {} frames)",
            self.leg_duration, self.frame_interval, self.frame_count
        )
    }
}

/// One straight-line interpolated traversal toward the next waypoint.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    /// Continuous position at the start of the leg.
    pub start: Vec3Position,
    /// Tile-aligned position the leg ends on.
    pub target: Vec3Position,
    /// Timestamp the leg started at, in caller time units.
    pub started_at: u64,
}

/// The walker's motion state: either idle or advancing through a route.
///
/// The state is a single tagged record; there are no separate "is walking"
/// flags to fall out of sync with the route.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    /// No active route.
    Idle,
    /// Advancing through waypoints.
    Moving {
        /// The leg currently being interpolated.
        leg: Leg,
        /// Waypoints remaining after the current leg target.
        route: VecDeque<TilePoint>,
    },
}

impl Motion {
    /// Returns whether this state is `Moving`.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self, Motion::Moving { .. })
    }
}

/// The avatar locomotion state machine.
///
/// A walker owns one continuous position, one facing direction and at most
/// one active route. It is advanced by periodic [`update`](Walker::update)
/// calls carrying a monotonically increasing timestamp; between updates,
/// [`walk_to`](Walker::walk_to) and [`stop`](Walker::stop) may retarget or
/// cancel the route at any time. Multiple walkers are independent values and
/// can be updated in any order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    config: WalkerConfig,
    position: Vec3Position,
    heading: Heading,
    frame: u32,
    cadence: u32,
    motion: Motion,
}

impl Walker {
    /// Construct an idle walker at the given continuous position.
    ///
    /// The walker faces south until its first movement changes the heading.
    pub const fn new(config: WalkerConfig, position: Vec3Position) -> Self {
        Walker {
            config,
            position,
            heading: Heading::South,
            frame: 0,
            cadence: 0,
            motion: Motion::Idle,
        }
    }

    /// Construct an idle walker standing on a tile of `map`.
    ///
    /// The elevation is taken from the tile height, or zero when the tile
    /// carries none.
    pub fn spawn<M: WalkableMap>(config: WalkerConfig, map: &M, tile: TilePoint) -> Self {
        let z = map.height_at(tile).map(f32::from).unwrap_or(0.0);
        Walker::new(config, Vec3Position::from_tile(tile, z))
    }

    /// Returns the current continuous position.
    pub fn position(&self) -> Vec3Position {
        self.position
    }

    /// Returns the discrete tile currently occupied (floor of `x`, `y`).
    pub fn tile(&self) -> TilePoint {
        self.position.tile()
    }

    /// Returns the current facing direction.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Returns the current walk-cycle frame index.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Returns whether a route is being advanced.
    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    /// Returns the current motion state.
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Returns the walker configuration.
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Starts walking along `route`, replacing any route in progress.
    ///
    /// An empty route is a no-op. When the walker is already moving, its
    /// continuous position is first snapped to the nearest whole tile
    /// (each axis rounded independently) so fractional drift cannot compound
    /// across redirects; a walk started from idle keeps the unrounded
    /// position. The newest call always wins immediately; there is no
    /// queuing.
    ///
    /// # Arguments
    ///
    /// * `map`: Grid provider; leg target elevations are read from it.
    /// * `route`: Waypoints to traverse, excluding the current tile.
    /// * `now`: Current timestamp, in the caller's monotonic time units.
    pub fn walk_to<M: WalkableMap>(&mut self, map: &M, route: Vec<TilePoint>, now: u64) {
        let mut route: VecDeque<TilePoint> = route.into();
        let Some(first) = route.pop_front() else {
            return;
        };
        if self.motion.is_moving() {
            self.position = self.position.snapped();
        }
        self.begin_leg(map, first, route, now);
    }

    /// Advances the walker to `now`.
    ///
    /// Does nothing while idle. Otherwise the current leg's progress is
    /// `min(elapsed / leg_duration, 1)`: below 1 the position interpolates
    /// component-wise between the leg endpoints and the walk-cycle frame
    /// advances once every `frame_interval` calls; at 1 the position snaps
    /// to the leg target and either the next waypoint starts a fresh leg
    /// timed from `now`, or the walker goes idle.
    pub fn update<M: WalkableMap>(&mut self, map: &M, now: u64) {
        match std::mem::replace(&mut self.motion, Motion::Idle) {
            Motion::Idle => {}
            Motion::Moving { leg, mut route } => {
                let elapsed = now.saturating_sub(leg.started_at);
                let progress = (elapsed as f32 / self.config.leg_duration as f32).min(1.0);

                if progress >= 1.0 {
                    self.position = leg.target;
                    if let Some(next) = route.pop_front() {
                        self.begin_leg(map, next, route, now);
                    }
                } else {
                    self.position = Vec3Position::new(
                        leg.start.x + (leg.target.x - leg.start.x) * progress,
                        leg.start.y + (leg.target.y - leg.start.y) * progress,
                        leg.start.z + (leg.target.z - leg.start.z) * progress,
                    );
                    self.cadence += 1;
                    if self.cadence == self.config.frame_interval {
                        self.cadence = 0;
                        self.frame = (self.frame + 1) % self.config.frame_count;
                    }
                    self.motion = Motion::Moving { leg, route };
                }
            }
        }
    }

    /// Cancels the route and returns to idle.
    ///
    /// Pending waypoints are dropped and the frame cadence counter resets.
    /// The continuous position is left wherever it was, including
    /// mid-interpolation; callers needing a tile-aligned result must round
    /// explicitly.
    pub fn stop(&mut self) {
        self.motion = Motion::Idle;
        self.cadence = 0;
    }

    /// Starts a leg from the current position toward `target`.
    ///
    /// The heading is recomputed from the tile delta; a zero delta leaves it
    /// unchanged. The target elevation comes from the map, falling back to
    /// the current elevation off-grid.
    fn begin_leg<M: WalkableMap>(
        &mut self,
        map: &M,
        target: TilePoint,
        route: VecDeque<TilePoint>,
        now: u64,
    ) {
        let current = self.position.nearest_tile();
        if let Some(heading) = Heading::from_delta(target.x - current.x, target.y - current.y) {
            self.heading = heading;
        }
        let z = map.height_at(target).map(f32::from).unwrap_or(self.position.z);
        let leg = Leg {
            start: self.position,
            target: Vec3Position::from_tile(target, z),
            started_at: now,
        };
        self.motion = Motion::Moving { leg, route };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isoroom_grid::RoomGrid;

    const EPSILON: f32 = 1e-5;

    fn flat_room() -> RoomGrid {
        RoomGrid::new(8, 8).unwrap()
    }

    fn walker_at(x: f32, y: f32) -> Walker {
        Walker::new(WalkerConfig::default(), Vec3Position::new(x, y, 0.0))
    }

    fn tiles(points: &[(i32, i32)]) -> Vec<TilePoint> {
        points.iter().map(|&(x, y)| TilePoint::new(x, y)).collect()
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            WalkerConfig::new(0, 3, 4),
            Err(LocomotionError::InvalidLegDuration("must be positive"))
        ));
        assert!(matches!(
            WalkerConfig::new(500, 0, 4),
            Err(LocomotionError::InvalidFrameInterval("must be positive"))
        ));
        assert!(matches!(
            WalkerConfig::new(500, 3, 0),
            Err(LocomotionError::InvalidFrameCount("must be positive"))
        ));

        let config = WalkerConfig::new(250, 2, 6).unwrap();
        assert_eq!(config.leg_duration(), 250);
        assert_eq!(config.frame_interval(), 2);
        assert_eq!(config.frame_count(), 6);
        assert_eq!(WalkerConfig::default(), WalkerConfig::new(500, 3, 4).unwrap());
    }

    #[test]
    fn test_heading_from_delta() {
        assert_eq!(Heading::from_delta(0, -1), Some(Heading::North));
        assert_eq!(Heading::from_delta(1, -1), Some(Heading::NorthEast));
        assert_eq!(Heading::from_delta(1, 0), Some(Heading::East));
        assert_eq!(Heading::from_delta(1, 1), Some(Heading::SouthEast));
        assert_eq!(Heading::from_delta(0, 1), Some(Heading::South));
        assert_eq!(Heading::from_delta(-1, 1), Some(Heading::SouthWest));
        assert_eq!(Heading::from_delta(-1, 0), Some(Heading::West));
        assert_eq!(Heading::from_delta(-1, -1), Some(Heading::NorthWest));
        assert_eq!(Heading::from_delta(0, 0), None);

        // Magnitude is irrelevant, only the sign pattern counts
        assert_eq!(Heading::from_delta(5, -3), Some(Heading::NorthEast));
        assert_eq!(Heading::from_delta(-7, 0), Some(Heading::West));

        assert_eq!(Heading::NorthEast.index(), 1);
        assert_eq!(Heading::West.index(), 6);
    }

    #[test]
    fn test_position_quantization() {
        let p = Vec3Position::new(2.3, 4.7, 1.0);
        let snapped = p.snapped();
        assert!((snapped.x - 2.0).abs() < EPSILON);
        assert!((snapped.y - 5.0).abs() < EPSILON);
        assert!((snapped.z - 1.0).abs() < EPSILON);

        assert_eq!(p.tile(), TilePoint::new(2, 4));
        assert_eq!(p.nearest_tile(), TilePoint::new(2, 5));
    }

    #[test]
    fn test_empty_route_is_noop() {
        let room = flat_room();
        let mut walker = walker_at(3.0, 3.0);
        walker.walk_to(&room, Vec::new(), 0);
        assert!(!walker.is_moving());
        assert_eq!(walker.position(), Vec3Position::new(3.0, 3.0, 0.0));
    }

    #[test]
    fn test_leg_interpolates_component_wise() {
        let room = flat_room();
        let mut walker = walker_at(0.0, 0.0);
        walker.walk_to(&room, tiles(&[(1, 1)]), 0);
        assert!(walker.is_moving());

        walker.update(&room, 250);
        let position = walker.position();
        assert!((position.x - 0.5).abs() < EPSILON);
        assert!((position.y - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_arrival_at_route_end() {
        let room = flat_room();
        let mut walker = walker_at(0.0, 0.0);
        walker.walk_to(&room, tiles(&[(1, 0), (2, 0), (3, 0)]), 0);

        // Each update past a leg boundary snaps and re-targets; after three
        // full legs the walker is idle on the final waypoint exactly.
        walker.update(&room, 500);
        assert!(walker.is_moving());
        walker.update(&room, 1_000);
        assert!(walker.is_moving());
        walker.update(&room, 1_500);

        assert!(!walker.is_moving());
        assert_eq!(walker.position(), Vec3Position::new(3.0, 0.0, 0.0));
        assert_eq!(walker.tile(), TilePoint::new(3, 0));
    }

    #[test]
    fn test_heading_follows_route() {
        let room = flat_room();
        let mut walker = walker_at(2.0, 2.0);
        assert_eq!(walker.heading(), Heading::South);

        walker.walk_to(&room, tiles(&[(3, 1), (3, 2)]), 0);
        assert_eq!(walker.heading(), Heading::NorthEast);

        walker.update(&room, 500);
        assert_eq!(walker.heading(), Heading::South);
    }

    #[test]
    fn test_snap_on_redirect() {
        let room = flat_room();
        let mut walker = walker_at(2.0, 5.0);
        walker.walk_to(&room, tiles(&[(3, 4)]), 0);

        // 30% through the leg the position is fractional
        walker.update(&room, 150);
        let position = walker.position();
        assert!((position.x - 2.3).abs() < EPSILON);
        assert!((position.y - 4.7).abs() < EPSILON);

        // Redirecting mid-leg restarts from the nearest whole tile,
        // rounding each axis independently: (2.3, 4.7) -> (2, 5)
        walker.walk_to(&room, tiles(&[(2, 6)]), 150);
        let Motion::Moving { leg, .. } = walker.motion() else {
            panic!("walker should be moving");
        };
        assert!((leg.start.x - 2.0).abs() < EPSILON);
        assert!((leg.start.y - 5.0).abs() < EPSILON);
        assert_eq!(walker.position(), Vec3Position::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn test_no_snap_when_starting_from_idle() {
        let room = flat_room();
        let mut walker = walker_at(2.0, 5.0);
        walker.walk_to(&room, tiles(&[(3, 4)]), 0);
        walker.update(&room, 150);
        walker.stop();

        // The walker stopped mid-interpolation; a fresh walk keeps the
        // fractional start instead of rounding it.
        walker.walk_to(&room, tiles(&[(3, 5)]), 200);
        let Motion::Moving { leg, .. } = walker.motion() else {
            panic!("walker should be moving");
        };
        assert!((leg.start.x - 2.3).abs() < EPSILON);
        assert!((leg.start.y - 4.7).abs() < EPSILON);
    }

    #[test]
    fn test_redirect_replaces_route() {
        let room = flat_room();
        let mut walker = walker_at(0.0, 0.0);
        walker.walk_to(&room, tiles(&[(1, 0), (2, 0), (3, 0)]), 0);
        walker.update(&room, 100);

        // The newest call wins immediately; the old route is gone.
        walker.walk_to(&room, tiles(&[(0, 1)]), 100);
        walker.update(&room, 600);
        assert!(!walker.is_moving());
        assert_eq!(walker.tile(), TilePoint::new(0, 1));
    }

    #[test]
    fn test_frame_cadence() {
        let room = flat_room();
        let mut walker = walker_at(0.0, 0.0);

        // Idle updates never advance the walk cycle
        for now in 0..10 {
            walker.update(&room, now);
        }
        assert_eq!(walker.frame(), 0);

        walker.walk_to(&room, tiles(&[(7, 0)]), 0);
        // Nine interpolating updates with cadence 3 advance the frame
        // exactly three times
        for call in 1..=9u64 {
            walker.update(&room, call * 10);
        }
        assert_eq!(walker.frame(), 3);

        // Three more wrap the 4-frame cycle back to 0
        for call in 10..=12u64 {
            walker.update(&room, call * 10);
        }
        assert_eq!(walker.frame(), 0);
    }

    #[test]
    fn test_stop_keeps_position() {
        let room = flat_room();
        let mut walker = walker_at(0.0, 0.0);
        walker.walk_to(&room, tiles(&[(1, 0), (2, 0)]), 0);
        walker.update(&room, 250);

        let mid_leg = walker.position();
        walker.stop();
        assert!(!walker.is_moving());
        assert_eq!(walker.position(), mid_leg);

        // No pending waypoints survive the stop
        walker.update(&room, 10_000);
        assert_eq!(walker.position(), mid_leg);
    }

    #[test]
    fn test_elevation_follows_tile_height() {
        let mut room = flat_room();
        room.set_height(TilePoint::new(1, 0), 2).unwrap();

        let mut walker = walker_at(0.0, 0.0);
        walker.walk_to(&room, tiles(&[(1, 0)]), 0);

        walker.update(&room, 250);
        assert!((walker.position().z - 1.0).abs() < EPSILON);

        walker.update(&room, 500);
        assert!((walker.position().z - 2.0).abs() < EPSILON);
        assert!(!walker.is_moving());
    }

    #[test]
    fn test_spawn_takes_tile_elevation() {
        let mut room = flat_room();
        room.set_height(TilePoint::new(4, 4), 3).unwrap();

        let walker = Walker::spawn(WalkerConfig::default(), &room, TilePoint::new(4, 4));
        assert_eq!(walker.position(), Vec3Position::new(4.0, 4.0, 3.0));
        assert!(!walker.is_moving());

        let off_grid = Walker::spawn(WalkerConfig::default(), &room, TilePoint::new(-5, 0));
        assert!((off_grid.position().z - 0.0).abs() < EPSILON);
    }
}
