use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use rand::rngs::StdRng;
use vista_runtime::ChunkStreamer;

use crate::event::EventQueue;
use crate::gamestate::GameState;
use crate::input::InputSource;
use crate::sink::LogSink;

pub struct App {
    pub gs: GameState,
    pub queue: EventQueue,
    pub streamer: ChunkStreamer,
    pub sink: LogSink,
    pub input: Box<dyn InputSource>,
    pub debug_stats: DebugStats,
    pub(crate) rng: StdRng,
    pub(crate) evt_processed_total: usize,
    pub(crate) evt_processed_by: HashMap<&'static str, usize>,
    pub(crate) worldgen_event_rx: Receiver<()>,
    pub(crate) world_config_path: PathBuf,
    pub(crate) render_distance_override: Option<i32>,
    pub(crate) regen_every: u64,
    pub(crate) sim_time: f64,
    pub(crate) next_summary: f64,
}

/// Per-summary-window counters, reset after each summary line.
#[derive(Default, Debug, Clone)]
pub struct DebugStats {
    pub frames: u64,
    pub chunk_loads: usize,
    pub chunk_unloads: usize,
    pub center_changes: u64,
}
