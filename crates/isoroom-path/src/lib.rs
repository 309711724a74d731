#![warn(missing_docs)]
#![doc = "Deterministic tile pathfinding over walkable room grids."]
#![doc = ""]
#![doc = "This crate computes shortest walkable routes between tile coordinates"]
#![doc = "for avatar movement. Routes exclude the start tile, end with the goal"]
#![doc = "tile, and are deterministic for an unchanged grid."]

pub mod astar;

pub use astar::find_path;
