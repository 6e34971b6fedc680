use vista_geom::Vec3;
use vista_world::ChunkCoord;

use crate::player::{PlayerParams, Walker};

pub struct GameState {
    pub tick: u64,
    pub seed: f64,

    // Streaming
    pub view_radius_chunks: i32,
    pub center_chunk: Option<ChunkCoord>,

    // Player
    pub walker: Walker,

    // Session counters for the periodic summary
    pub jumps: u64,
    pub regenerations: u64,
    pub distance_walked: f64,
}

impl GameState {
    pub fn new(seed: f64, view_radius_chunks: i32, player: PlayerParams) -> Self {
        Self {
            tick: 0,
            seed,
            view_radius_chunks: view_radius_chunks.max(0),
            center_chunk: None,
            walker: Walker::new(Vec3::ZERO, player),
            jumps: 0,
            regenerations: 0,
            distance_walked: 0.0,
        }
    }
}
