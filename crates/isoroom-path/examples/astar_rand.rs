use isoroom_grid::{RoomGrid, TilePoint, WalkableMap};
use isoroom_path::find_path;
use rand::Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a 20x20 room and scatter random furniture blocks through it
    let width = 20;
    let depth = 20;
    let mut grid = RoomGrid::new(width, depth)?;

    let mut rng = rand::rng();
    let num_obstacles = 15;
    let max_obstacle_size = 2;

    println!("Generating {} random obstacles...", num_obstacles);
    for _ in 0..num_obstacles {
        // Random starting position
        let start_x = rng.random_range(0..width);
        let start_y = rng.random_range(0..depth);

        // Random obstacle size
        let obstacle_width = rng.random_range(1..=max_obstacle_size);
        let obstacle_depth = rng.random_range(1..=max_obstacle_size);

        // Block the covered tiles
        for x in start_x..std::cmp::min(start_x + obstacle_width, width) {
            for y in start_y..std::cmp::min(start_y + obstacle_depth, depth) {
                grid.set_walkable(TilePoint::new(x as i32, y as i32), false)?;
            }
        }
    }

    println!("Room after random generation:");
    print!("{}", grid);

    // Route between opposite corners, nudging the endpoints onto walkable
    // tiles if the obstacle soup happened to cover them.
    let start = find_open_tile(&grid, TilePoint::new(0, 0));
    let goal = find_open_tile(&grid, TilePoint::new(width as i32 - 1, depth as i32 - 1));

    match (start, goal) {
        (Some(start), Some(goal)) => {
            println!("\nStart: {:?}", start);
            println!("Goal: {:?}", goal);
            match find_path(&grid, start, goal) {
                Some(route) => println!("Found a route with {} waypoints.", route.len()),
                None => println!("The obstacles sealed the goal off; no route."),
            }
        }
        _ => println!("\nNo open tiles left to route between."),
    }

    Ok(())
}

// Scans outward from `near` in row-major order for a walkable tile.
fn find_open_tile(grid: &RoomGrid, near: TilePoint) -> Option<TilePoint> {
    if grid.is_walkable(near) {
        return Some(near);
    }
    for y in 0..grid.depth() as i32 {
        for x in 0..grid.width() as i32 {
            let p = TilePoint::new(x, y);
            if grid.is_walkable(p) {
                return Some(p);
            }
        }
    }
    None
}
