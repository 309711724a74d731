use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::time;
use tracing::{debug, info, warn};

use isoroom_avatar::{Walker, WalkerConfig};
use isoroom_grid::{RoomGrid, TilePoint, WalkableMap};
use isoroom_path::find_path;

use crate::blackboard::{AvatarSnapshot, Blackboard};
use crate::bus::Topic;

/// Fixed-rate walker simulation task.
///
/// Advances the walker on every tick with a monotonic millisecond clock,
/// resolves incoming goal tiles through the pathfinder and publishes an
/// avatar snapshot per tick.
pub async fn walk_task(
    bb: Blackboard,
    grid: Arc<RoomGrid>,
    config: WalkerConfig,
    tick: Duration,
    goal_rx: &mut broadcast::Receiver<Arc<TilePoint>>,
    snapshot_tx: Topic<AvatarSnapshot>,
) -> anyhow::Result<()> {
    info!("Walk task started.");
    let spawn = grid.door().unwrap_or(TilePoint::new(0, 0));
    let mut walker = Walker::spawn(config, grid.as_ref(), spawn);
    let clock = Instant::now();
    let mut ticker = time::interval(tick);
    info!(spawn = ?spawn, config = %walker.config(), "Walk task initialized at spawn tile");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = clock.elapsed().as_millis() as u64;
                walker.update(grid.as_ref(), now);
                let snap = AvatarSnapshot {
                    position: walker.position(),
                    heading: walker.heading(),
                    frame: walker.frame(),
                    moving: walker.is_moving(),
                };
                debug!(x = snap.position.x, y = snap.position.y, heading = %snap.heading, frame = snap.frame, "Walker advanced");
                snapshot_tx.publish(snap.clone());
                let mut guard = bb.write();
                if !snap.moving {
                    guard.goal = None;
                }
                guard.avatar = snap;
                guard.last_tick_ts = Instant::now();
            }
            result = goal_rx.recv() => {
                match result {
                    Ok(goal_arc) => {
                        let goal = *goal_arc;
                        // Goals on blocked tiles are filtered here so the
                        // pathfinder's "no route" answer always means
                        // unreachable.
                        if !grid.is_walkable(goal) {
                            debug!(goal = ?goal, "Ignoring goal on a blocked tile");
                            continue;
                        }
                        let now = clock.elapsed().as_millis() as u64;
                        match find_path(grid.as_ref(), walker.tile(), goal) {
                            Some(route) if route.is_empty() => {
                                debug!(goal = ?goal, "Already standing on the goal tile");
                            }
                            Some(route) => {
                                info!(goal = ?goal, waypoints = route.len(), "Walking to goal");
                                walker.walk_to(grid.as_ref(), route, now);
                                bb.write().goal = Some(goal);
                            }
                            None => {
                                warn!(goal = ?goal, from = ?walker.tile(), "Goal is unreachable from the current tile");
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Goal receiver lagged by {} messages in walk_task.", n);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::error!("Goal channel closed. Walk task cannot continue.");
                        return Err(anyhow::anyhow!("Goal channel closed for walk task"));
                    }
                }
            }
        }
    }
}
