/*

A* = f(n) = g(n) + h(n)

Where:
    n = a tile in the walkable-tile graph
    g(n) = number of steps from the start tile to n
    h(n) = estimated steps from n to the goal (heuristic)
    f(n) = total estimated length of the cheapest route through n

Movement is 8-connected with uniform step cost 1, so the Chebyshev
distance is an admissible heuristic: a diagonal step covers one unit of
both axes at the same cost as a cardinal step.

*/

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use isoroom_grid::{TilePoint, WalkableMap};
use tracing::debug;

/// Neighbor visitation order, clockwise from north. Fixed so that repeated
/// queries on an unchanged grid expand tiles identically and return the
/// identical route.
const NEIGHBOR_DELTAS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn chebyshev_distance(a: TilePoint, b: TilePoint) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: i32,
    position: TilePoint,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap, and break cost ties on the tile coordinates so
// equal-cost tiles pop in a stable order.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that the we flip the ordering on costs.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.position.x.cmp(&other.position.x))
            .then_with(|| self.position.y.cmp(&other.position.y))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn reconstruct_route(came_from: &HashMap<TilePoint, TilePoint>, mut current: TilePoint) -> Vec<TilePoint> {
    let mut route = vec![current];
    while let Some(&previous) = came_from.get(&current) {
        route.push(previous);
        current = previous;
    }
    route.reverse();
    route
}

/// Computes the shortest walkable route from `start` to `goal`.
///
/// The search runs over the 8-connected graph of walkable tiles: a tile's
/// neighbors are exactly its adjacent tiles for which
/// [`WalkableMap::is_walkable`] holds. The start tile itself is not required
/// to be walkable, so an avatar standing on a freshly blocked tile can still
/// route off it.
///
/// # Arguments
/// * `map` - The walkability provider to search over
/// * `start` - The tile the avatar currently occupies
/// * `goal` - The requested destination tile
///
/// # Returns
/// * `Some(route)` - Ordered waypoints excluding `start` and ending with
///   `goal`; empty when `start == goal`
/// * `None` - `goal` is not walkable, or is walkable but unreachable from
///   `start`
#[must_use]
pub fn find_path<M: WalkableMap>(map: &M, start: TilePoint, goal: TilePoint) -> Option<Vec<TilePoint>> {
    if !map.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<TilePoint, TilePoint> = HashMap::new();

    let mut g_score: HashMap<TilePoint, i32> = HashMap::new();
    g_score.insert(start, 0);

    open_set.push(State {
        cost: chebyshev_distance(start, goal),
        position: start,
    });

    let mut explored: usize = 0;

    while let Some(State { cost: _, position: current }) = open_set.pop() {
        if current == goal {
            let mut route = reconstruct_route(&came_from, current);
            // The route excludes the tile the avatar already stands on.
            route.remove(0);
            debug!(explored, waypoints = route.len(), "route found");
            return Some(route);
        }
        explored += 1;

        for (dx, dy) in NEIGHBOR_DELTAS {
            let neighbor = TilePoint::new(current.x + dx, current.y + dy);
            if !map.is_walkable(neighbor) {
                continue;
            }

            let tentative_g_score = g_score[&current] + 1; // Uniform step cost, diagonals included

            if tentative_g_score < *g_score.get(&neighbor).unwrap_or(&i32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g_score);
                open_set.push(State {
                    cost: tentative_g_score + chebyshev_distance(neighbor, goal),
                    position: neighbor,
                });
            }
        }
    }

    debug!(explored, "goal unreachable");
    None
}
