use isoroom_grid::{tile_to_screen, RoomGrid, TilePoint, WalkableMap};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Author a small room from its textual floorplan:
    // digits are walkable tiles at that elevation, 'x' blocks movement.
    let plan = "
        000011
        000x11
        000x11
        0000x0
        000000
    ";

    let mut grid = RoomGrid::from_floorplan(plan)?;
    grid.set_door(TilePoint::new(0, 2))?;

    println!("Room ({}x{}, max elevation {}):", grid.width(), grid.depth(), grid.max_height());
    print!("{}", grid);

    println!("\nDoor: {:?}", grid.door());

    // Walkability queries are total: out-of-range coordinates are simply
    // not walkable.
    for p in [
        TilePoint::new(0, 0),
        TilePoint::new(3, 1),
        TilePoint::new(-2, 0),
        TilePoint::new(100, 100),
    ] {
        println!(
            "tile {:?}: walkable={} height={:?}",
            p,
            grid.is_walkable(p),
            grid.height_at(p)
        );
    }

    // Project a few tiles into screen space, including a fractional position
    // halfway between two tiles.
    println!();
    for (x, y) in [(0.0_f32, 0.0_f32), (5.0, 0.0), (0.0, 4.0), (2.5, 2.5)] {
        let h = grid
            .height_at(TilePoint::new(x.floor() as i32, y.floor() as i32))
            .unwrap_or(0);
        let screen = tile_to_screen(x, y, h as f32);
        println!("tile ({:.1}, {:.1}) -> screen ({:.1}, {:.1})", x, y, screen.x, screen.y);
    }

    Ok(())
}
