use parking_lot::RwLock;
use std::{sync::Arc, time::Instant};

use isoroom_avatar::{Heading, Vec3Position};
use isoroom_grid::TilePoint;

/// Renderer-facing snapshot of the walker, published once per simulation
/// tick.
#[derive(Clone, Debug)]
pub struct AvatarSnapshot {
    pub position: Vec3Position,
    pub heading: Heading,
    pub frame: u32,
    pub moving: bool,
}

impl Default for AvatarSnapshot {
    fn default() -> Self {
        AvatarSnapshot {
            position: Vec3Position::default(),
            heading: Heading::South,
            frame: 0,
            moving: false,
        }
    }
}

#[derive(Clone)]
pub struct State {
    pub avatar: AvatarSnapshot,
    pub goal: Option<TilePoint>,
    pub last_tick_ts: Instant,
    pub faults: Vec<String>,
}

impl Default for State {
    fn default() -> Self {
        State {
            avatar: AvatarSnapshot::default(),
            goal: None,
            last_tick_ts: Instant::now(),
            faults: Vec::new(),
        }
    }
}

pub type Blackboard = Arc<RwLock<State>>;

pub fn snapshot(bb: &Blackboard) -> State {
    (*bb.read()).clone()
}

pub fn raise_fault(bb: &Blackboard, msg: &str) {
    let mut g = bb.write();
    if !g.faults.iter().any(|s| s == msg) {
        g.faults.push(msg.to_string());
    }
}
