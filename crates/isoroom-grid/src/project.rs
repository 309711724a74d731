//! Isometric screen projection.
//!
//! Pure, stateless mapping between tile coordinates and screen pixels. The
//! functions accept fractional tile coordinates so that continuously
//! interpolated avatar positions project smoothly, with no discontinuity at
//! integer tile boundaries.

use crate::map::ScreenPoint;

/// Half the on-screen width of one tile diamond, in pixels.
pub const TILE_HALF_WIDTH: f32 = 32.0;
/// Half the on-screen height of one tile diamond, in pixels.
pub const TILE_HALF_HEIGHT: f32 = 16.0;
/// Vertical pixel offset per unit of tile elevation.
pub const HEIGHT_STEP: f32 = 32.0;

/// Projects a (possibly fractional) tile coordinate to screen pixels.
///
/// One unit of `tile_x` moves the projected point right and down by
/// `(TILE_HALF_WIDTH, TILE_HALF_HEIGHT)`; one unit of `tile_y` moves it left
/// and down by `(-TILE_HALF_WIDTH, TILE_HALF_HEIGHT)`; one unit of `height`
/// moves it straight up by `HEIGHT_STEP`.
///
/// # Arguments
/// * `tile_x` - Tile x coordinate (fractional values interpolate)
/// * `tile_y` - Tile y coordinate (fractional values interpolate)
/// * `height` - Elevation in tile height units
///
/// # Returns
/// * `ScreenPoint` - The projected screen position in pixels
#[must_use]
pub fn tile_to_screen(tile_x: f32, tile_y: f32, height: f32) -> ScreenPoint {
    ScreenPoint::new(
        (tile_x - tile_y) * TILE_HALF_WIDTH,
        (tile_x + tile_y) * TILE_HALF_HEIGHT - height * HEIGHT_STEP,
    )
}

/// Inverts [`tile_to_screen`] at a known elevation.
///
/// Returns the fractional tile coordinate whose projection at `height` is
/// `(screen_x, screen_y)`. Used by input layers to turn pointer positions
/// into tile picks.
///
/// # Arguments
/// * `screen_x` - Screen x coordinate in pixels
/// * `screen_y` - Screen y coordinate in pixels
/// * `height` - Elevation in tile height units at which to invert
///
/// # Returns
/// * `(f32, f32)` - The fractional `(tile_x, tile_y)` coordinate
#[must_use]
pub fn screen_to_tile(screen_x: f32, screen_y: f32, height: f32) -> (f32, f32) {
    let a = screen_x / TILE_HALF_WIDTH;
    let b = (screen_y + height * HEIGHT_STEP) / TILE_HALF_HEIGHT;
    ((a + b) / 2.0, (b - a) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_projection_axes() {
        let origin = tile_to_screen(0.0, 0.0, 0.0);
        assert!((origin.x - 0.0).abs() < EPSILON);
        assert!((origin.y - 0.0).abs() < EPSILON);

        // +x projects right and down
        let px = tile_to_screen(1.0, 0.0, 0.0);
        assert!((px.x - 32.0).abs() < EPSILON);
        assert!((px.y - 16.0).abs() < EPSILON);

        // +y projects left and down
        let py = tile_to_screen(0.0, 1.0, 0.0);
        assert!((py.x - (-32.0)).abs() < EPSILON);
        assert!((py.y - 16.0).abs() < EPSILON);

        // +height projects straight up
        let ph = tile_to_screen(0.0, 0.0, 1.0);
        assert!((ph.x - 0.0).abs() < EPSILON);
        assert!((ph.y - (-32.0)).abs() < EPSILON);
    }

    #[test]
    fn test_fractional_continuity() {
        // A fractional step of epsilon along x must move the projection by
        // (32, 16) * epsilon, with no snapping at integer boundaries.
        let eps = 0.001;
        for base in [0.0_f32, 1.0, 2.999, 7.5] {
            let at = tile_to_screen(base, 4.0, 1.0);
            let ahead = tile_to_screen(base + eps, 4.0, 1.0);
            assert!((ahead.x - at.x - TILE_HALF_WIDTH * eps).abs() < EPSILON);
            assert!((ahead.y - at.y - TILE_HALF_HEIGHT * eps).abs() < EPSILON);
        }
    }

    #[test]
    fn test_projection_is_linear_in_height() {
        let low = tile_to_screen(3.25, 1.75, 0.0);
        let high = tile_to_screen(3.25, 1.75, 2.5);
        assert!((low.x - high.x).abs() < EPSILON);
        assert!((low.y - high.y - 2.5 * HEIGHT_STEP).abs() < EPSILON);
    }

    #[test]
    fn test_screen_to_tile_round_trip() {
        for (x, y, h) in [
            (0.0_f32, 0.0_f32, 0.0_f32),
            (5.0, 3.0, 1.0),
            (2.3, 4.7, 0.0),
            (-1.5, 0.25, 3.0),
        ] {
            let screen = tile_to_screen(x, y, h);
            let (back_x, back_y) = screen_to_tile(screen.x, screen.y, h);
            assert!((back_x - x).abs() < EPSILON);
            assert!((back_y - y).abs() < EPSILON);
        }
    }
}
