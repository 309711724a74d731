use isoroom_avatar::*;
use isoroom_grid::{RoomGrid, TilePoint};

fn main() {
    let leg_duration = 500;
    let frame_interval = 3;
    let frame_count = 4;
    let config_result = WalkerConfig::new(leg_duration, frame_interval, frame_count);

    let room = RoomGrid::from_floorplan(
        "
        000011
        000011
        000000
        000000
    ",
    )
    .expect("floorplan is well-formed");

    let route = vec![
        TilePoint::new(1, 1),
        TilePoint::new(2, 2),
        TilePoint::new(3, 2),
        TilePoint::new(4, 1),
    ];

    match config_result {
        Ok(config) => {
            let mut walker = Walker::spawn(config, &room, TilePoint::new(0, 0));
            println!("Initializing walk...");
            println!("  Configuration: {}", config);
            println!("  Spawn: {}", walker.position());
            println!("  Route: {:?}", route);
            println!("\nWalking...");

            walker.walk_to(&room, route, 0);

            // Tick at 10 updates per leg until the route is done
            let tick = leg_duration / 10;
            let mut now = 0;
            while walker.is_moving() {
                now += tick;
                walker.update(&room, now);
                println!(
                    "t={:>5}: pos {} heading {:>2} frame {}",
                    now,
                    walker.position(),
                    walker.heading(),
                    walker.frame()
                );
            }

            println!("\nWalk complete.");
            println!("Final tile: {:?}", walker.tile());
        }
        Err(e) => {
            eprintln!("Failed to build walker configuration: {:?}", e);
            eprintln!(
                "Please ensure leg_duration ({}), frame_interval ({}) and frame_count ({}) are positive.",
                leg_duration, frame_interval, frame_count
            );
        }
    }
}
