use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use vista_runtime::ChunkStreamer;
use vista_world::WorldGenParams;

use super::{App, DebugStats};
use crate::event::EventQueue;
use crate::gamestate::GameState;
use crate::input::InputSource;
use crate::player::PlayerParams;
use crate::sink::LogSink;

pub struct AppOptions {
    pub seed: f64,
    pub world_params: WorldGenParams,
    pub player_params: PlayerParams,
    pub render_distance: Option<i32>,
    pub world_config_path: PathBuf,
    pub watch_worldgen: bool,
    /// Ticks between automatic regenerations; 0 disables.
    pub regen_every: u64,
}

impl App {
    pub fn new(opts: AppOptions, input: Box<dyn InputSource>) -> Self {
        let seed = if opts.seed.is_finite() {
            opts.seed
        } else {
            log::warn!("non-finite seed {}; using 0", opts.seed);
            0.0
        };
        let view_radius = opts
            .render_distance
            .unwrap_or(opts.world_params.render_distance);
        let streamer = ChunkStreamer::new(seed, Arc::new(opts.world_params));
        let gs = GameState::new(seed, view_radius, opts.player_params);

        // File watcher for worldgen config
        let (wg_tx, wg_rx) = std::sync::mpsc::channel::<()>();
        if opts.watch_worldgen {
            let tx = wg_tx.clone();
            let path = opts.world_config_path.clone();
            std::thread::spawn(move || {
                use notify::{EventKind, RecursiveMode, Watcher};
                if let Ok(mut watcher) =
                    notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                        if let Ok(event) = res {
                            match event.kind {
                                EventKind::Modify(_)
                                | EventKind::Create(_)
                                | EventKind::Remove(_)
                                | EventKind::Any => {
                                    let _ = tx.send(());
                                }
                                _ => {}
                            }
                        }
                    })
                {
                    if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
                        log::warn!("cannot watch {}: {}", path.display(), e);
                        return;
                    }
                    loop {
                        std::thread::sleep(std::time::Duration::from_secs(3600));
                    }
                }
            });
        }

        let mut app = Self {
            gs,
            queue: EventQueue::new(),
            streamer,
            sink: LogSink::new(),
            input,
            debug_stats: DebugStats::default(),
            rng: StdRng::seed_from_u64(seed.to_bits()),
            evt_processed_total: 0,
            evt_processed_by: HashMap::new(),
            worldgen_event_rx: wg_rx,
            world_config_path: opts.world_config_path,
            render_distance_override: opts.render_distance,
            regen_every: opts.regen_every,
            sim_time: 0.0,
            next_summary: 1.0,
        };
        log::info!(
            "world seed {} (chunk size {}, view radius {})",
            seed,
            app.streamer.chunk_size(),
            app.gs.view_radius_chunks
        );
        app.respawn();
        app.restream();
        app
    }
}
