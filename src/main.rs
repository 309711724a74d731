mod blackboard;
mod bus;
mod graphics;
mod settings;
mod sim;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use tracing_subscriber::{self, EnvFilter};

use isoroom_avatar::WalkerConfig;
use isoroom_grid::{GridError, RoomGrid, TilePoint};

use blackboard::{raise_fault, snapshot, AvatarSnapshot, Blackboard};
use bus::Topic;
use graphics::window_conf;

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Isoroom (Macroquad Frontend) Started. Loading configuration and spawning simulation...");

    let app_config = match settings::load_config() {
        Ok(app_config) => app_config,
        Err(e) => {
            error!("Cannot start without configuration: {}", e);
            return;
        }
    };

    let grid = match build_room(&app_config) {
        Ok(grid) => Arc::new(grid),
        Err(e) => {
            error!("Room floorplan rejected: {}", e);
            return;
        }
    };

    let walker_config = match WalkerConfig::new(
        app_config.walker.leg_duration,
        app_config.walker.frame_interval,
        app_config.walker.frame_count,
    ) {
        Ok(walker_config) => walker_config,
        Err(e) => {
            error!("Walker configuration rejected: {}", e);
            return;
        }
    };

    let tick = Duration::from_millis(1_000 / app_config.sim.tick_hz.max(1));

    let snapshot_topic: Topic<AvatarSnapshot> = Topic::new(16);
    let goal_topic: Topic<TilePoint> = Topic::new(16);
    let snapshot_rx_for_vis = snapshot_topic.subscribe();

    let bb: Blackboard = Arc::default();

    let tokio_rt = tokio::runtime::Runtime::new().unwrap();

    let sim_bb = bb.clone();
    let sim_grid = Arc::clone(&grid);
    let sim_snapshot_topic = snapshot_topic.clone();
    let sim_goal_topic = goal_topic.clone();

    tokio_rt.spawn(async move {
        info!("Simulation task started.");
        match run(sim_bb, sim_grid, walker_config, tick, sim_goal_topic, sim_snapshot_topic).await {
            Ok(_) => info!("Simulation tasks finished successfully."),
            Err(e) => {
                error!("Simulation tasks failed: {:?}. Core simulation might have stopped.", e);
            }
        }
    });

    graphics::run_visualization_loop(grid, bb, snapshot_rx_for_vis, goal_topic).await;
}

async fn run(
    bb: Blackboard,
    grid: Arc<RoomGrid>,
    walker_config: WalkerConfig,
    tick: Duration,
    goal_topic: Topic<TilePoint>,
    snapshot_topic: Topic<AvatarSnapshot>,
) -> anyhow::Result<()> {
    let mut goal_rx = goal_topic.subscribe();
    tokio::try_join!(
        sim::walk_task(bb.clone(), grid, walker_config, tick, &mut goal_rx, snapshot_topic),
        watchdog(bb),
    )?;
    Ok(())
}

async fn watchdog(bb: Blackboard) -> anyhow::Result<()> {
    info!("Watchdog task started.");
    let mut tick = tokio::time::interval(Duration::from_millis(250));
    loop {
        tick.tick().await;
        let last_tick_ts = snapshot(&bb).last_tick_ts;
        let age = Instant::now() - last_tick_ts;
        if age > Duration::from_millis(500) {
            warn!(?age, "Simulation tick timeout! Walker state is stale.");
            raise_fault(&bb, "sim tick timeout");
        }
    }
}

fn build_room(app_config: &settings::AppConfig) -> Result<RoomGrid, GridError> {
    let mut grid = RoomGrid::from_floorplan(&app_config.room.floorplan)?;
    if let Some([x, y]) = app_config.room.door {
        grid.set_door(TilePoint::new(x, y))?;
    }
    Ok(grid)
}
