use std::collections::HashSet;

use isoroom_grid::{RoomGrid, TilePoint, WalkableMap};
use isoroom_path::find_path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Room Pathfinding Example");
    println!("========================");

    let grid = RoomGrid::from_floorplan(
        "
        00000000
        0xxxxx00
        00000x00
        0x000x00
        0x0xxx00
        0x000000
        0xxxxxx0
        00000000
    ",
    )?;

    let start = TilePoint::new(0, 0);
    let goal = TilePoint::new(2, 3);

    println!("\nRoom layout:");
    print!("{}", grid);
    println!("\nStart: {:?}", start);
    println!("Goal: {:?}", goal);

    match find_path(&grid, start, goal) {
        Some(route) => {
            println!("\nRoute with {} waypoints:", route.len());
            for (i, waypoint) in route.iter().enumerate() {
                println!("  {}: {:?}", i, waypoint);
            }
            println!("\nRoute visualization:");
            print_route(&grid, start, &route);
        }
        None => println!("\nNo route found!"),
    }

    // A goal on the far side of a sealed wall is unreachable.
    let sealed = RoomGrid::from_floorplan("000\nxxx\n000")?;
    println!(
        "\nSealed room result: {:?}",
        find_path(&sealed, TilePoint::new(0, 0), TilePoint::new(0, 2))
    );

    Ok(())
}

fn print_route(grid: &RoomGrid, start: TilePoint, route: &[TilePoint]) {
    println!("Legend: digit = walkable elevation, x = blocked, * = route, S = start, G = goal");
    let route_set: HashSet<TilePoint> = route.iter().copied().collect();
    let goal = *route.last().unwrap();
    for y in 0..grid.depth() as i32 {
        for x in 0..grid.width() as i32 {
            let p = TilePoint::new(x, y);
            if p == start {
                print!("S");
            } else if p == goal {
                print!("G");
            } else if route_set.contains(&p) {
                print!("*");
            } else if let Some(h) = grid.height_at(p) {
                print!("{}", h);
            } else {
                print!("x");
            }
        }
        println!();
    }
}
