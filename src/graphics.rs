use macroquad::prelude::*;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use isoroom_avatar::Heading;
use isoroom_grid::{screen_to_tile, tile_to_screen, RoomGrid, TilePoint, WalkableMap};

use crate::blackboard::{snapshot, AvatarSnapshot, Blackboard};
use crate::bus::Topic;

// Function to configure the macroquad window
pub fn window_conf() -> Conf {
    Conf {
        window_title: "Isoroom Visualization".to_string(),
        window_width: 960,
        window_height: 640,
        high_dpi: true,
        ..Default::default()
    }
}

// Screen position of tile (0, 0) so the room sits around the window center
fn room_anchor(grid: &RoomGrid) -> (f32, f32) {
    let anchor_x = screen_width() / 2.0 - (grid.width() as f32 - grid.depth() as f32) * 16.0;
    let anchor_y = screen_height() / 2.0 - (grid.width() as f32 + grid.depth() as f32) * 8.0;
    (anchor_x, anchor_y)
}

fn heading_vector(heading: Heading) -> (f32, f32) {
    match heading {
        Heading::North => (0.0, -1.0),
        Heading::NorthEast => (1.0, -1.0),
        Heading::East => (1.0, 0.0),
        Heading::SouthEast => (1.0, 1.0),
        Heading::South => (0.0, 1.0),
        Heading::SouthWest => (-1.0, 1.0),
        Heading::West => (-1.0, 0.0),
        Heading::NorthWest => (-1.0, -1.0),
    }
}

fn draw_tile_diamond(x: f32, y: f32, h: f32, anchor: (f32, f32), color: Color) {
    let n = tile_to_screen(x - 0.5, y - 0.5, h);
    let e = tile_to_screen(x + 0.5, y - 0.5, h);
    let s = tile_to_screen(x + 0.5, y + 0.5, h);
    let w = tile_to_screen(x - 0.5, y + 0.5, h);
    let n = Vec2::new(n.x + anchor.0, n.y + anchor.1);
    let e = Vec2::new(e.x + anchor.0, e.y + anchor.1);
    let s = Vec2::new(s.x + anchor.0, s.y + anchor.1);
    let w = Vec2::new(w.x + anchor.0, w.y + anchor.1);
    draw_triangle(n, e, s, color);
    draw_triangle(n, s, w, color);
    draw_line(n.x, n.y, e.x, e.y, 1.0, DARKGRAY);
    draw_line(e.x, e.y, s.x, s.y, 1.0, DARKGRAY);
    draw_line(s.x, s.y, w.x, w.y, 1.0, DARKGRAY);
    draw_line(w.x, w.y, n.x, n.y, 1.0, DARKGRAY);
}

pub async fn run_visualization_loop(
    grid: Arc<RoomGrid>,
    bb: Blackboard,
    mut snapshot_rx: broadcast::Receiver<Arc<AvatarSnapshot>>,
    goal_tx: Topic<TilePoint>,
) {
    let mut avatar = AvatarSnapshot::default();
    let mut first_snapshot_received = false;

    info!("Visualization loop starting inside graphics module...");

    loop {
        match snapshot_rx.try_recv() {
            Ok(snapshot_arc) => {
                avatar = (*snapshot_arc).clone();
                first_snapshot_received = true;
            }
            Err(broadcast::error::TryRecvError::Empty) => {
                // No new snapshot, keep drawing the last known one
            }
            Err(broadcast::error::TryRecvError::Lagged(_)) => {
                warn!("Visualization snapshot receiver lagged.");
                // Drain the lag, then try once more for a fresh snapshot
                while let Err(broadcast::error::TryRecvError::Lagged(_)) = snapshot_rx.try_recv() {}
                if let Ok(snapshot_arc) = snapshot_rx.try_recv() {
                    avatar = (*snapshot_arc).clone();
                    first_snapshot_received = true;
                }
            }
            Err(broadcast::error::TryRecvError::Closed) => {
                error!("Visualization snapshot channel closed. Exiting visualization loop.");
                break;
            }
        }

        clear_background(LIGHTGRAY);
        let anchor = room_anchor(&grid);
        let board = snapshot(&bb);

        // Floor tiles, back to front
        for y in 0..grid.depth() as i32 {
            for x in 0..grid.width() as i32 {
                let p = TilePoint::new(x, y);
                match grid.height_at(p) {
                    Some(h) => {
                        let shade = 0.04 * h as f32 + if (x + y) % 2 == 0 { 0.0 } else { 0.03 };
                        let color = Color::new(0.55 + shade, 0.62 + shade, 0.48 + shade, 1.0);
                        draw_tile_diamond(x as f32, y as f32, h as f32, anchor, color);
                    }
                    None => {
                        draw_tile_diamond(x as f32, y as f32, 0.0, anchor, GRAY);
                    }
                }
            }
        }

        // Door marker
        if let Some(door) = grid.door() {
            let h = grid.height_at(door).unwrap_or(0);
            draw_tile_diamond(door.x as f32, door.y as f32, h as f32, anchor, GOLD);
        }

        // Current goal marker
        if let Some(goal) = board.goal {
            let h = grid.height_at(goal).unwrap_or(0);
            let center = tile_to_screen(goal.x as f32, goal.y as f32, h as f32);
            draw_circle(center.x + anchor.0, center.y + anchor.1, 5.0, RED);
        }

        if first_snapshot_received {
            let center = tile_to_screen(avatar.position.x, avatar.position.y, avatar.position.z);
            let avatar_x = center.x + anchor.0;
            // Lift the body off the floor plus a small walk-cycle bob
            let bob = if avatar.moving { [0.0, 1.5, 0.0, -1.5][avatar.frame as usize % 4] } else { 0.0 };
            let avatar_y = center.y + anchor.1 - 14.0 + bob;
            draw_circle(avatar_x, avatar_y, 10.0, BLUE);

            let (dx, dy) = heading_vector(avatar.heading);
            let tip = tile_to_screen(
                avatar.position.x + 0.4 * dx,
                avatar.position.y + 0.4 * dy,
                avatar.position.z,
            );
            draw_line(avatar_x, avatar_y, tip.x + anchor.0, tip.y + anchor.1 - 14.0, 2.0, DARKBLUE);
        }

        // Click-to-walk: invert the projection at floor level and pick the
        // nearest tile
        if is_mouse_button_pressed(MouseButton::Left) {
            let (mouse_x, mouse_y) = mouse_position();
            let (tile_x, tile_y) = screen_to_tile(mouse_x - anchor.0, mouse_y - anchor.1, 0.0);
            let pick = TilePoint::new(tile_x.round() as i32, tile_y.round() as i32);
            if grid.in_bounds(pick) {
                goal_tx.publish(pick);
            }
        }

        draw_text(
            &format!(
                "Avatar: x={:.2} y={:.2} z={:.2} heading={} frame={} moving={}",
                avatar.position.x,
                avatar.position.y,
                avatar.position.z,
                avatar.heading,
                avatar.frame,
                avatar.moving
            ),
            10.0,
            20.0,
            20.0,
            BLACK,
        );
        draw_text("Click a walkable tile to walk there", 10.0, 40.0, 20.0, BLACK);
        if !board.faults.is_empty() {
            draw_text(&format!("Faults: {}", board.faults.join(", ")), 10.0, 60.0, 20.0, RED);
        }

        next_frame().await
    }
}
