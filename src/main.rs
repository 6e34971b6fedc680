//! Headless driver for the terrain streamer and walker.
#![forbid(unsafe_code)]

mod app;
mod event;
mod gamestate;
mod input;
mod player;
mod sink;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use vista_world::WorldGenParams;

use crate::app::{App, AppOptions};
use crate::input::Autopilot;
use crate::player::PlayerParams;

#[derive(Parser, Debug)]
#[command(name = "vista", about = "Procedural terrain with a terrain-following walker")]
struct Args {
    /// World seed; random when omitted
    #[arg(long)]
    seed: Option<f64>,

    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Simulation rate (frames per second)
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Pace frames in wall-clock time
    #[arg(long)]
    realtime: bool,

    #[arg(long, default_value = "assets/worldgen.toml")]
    world_config: PathBuf,

    #[arg(long, default_value = "assets/player.toml")]
    player_config: PathBuf,

    /// Chunks loaded around the walker (Chebyshev radius); overrides the worldgen file
    #[arg(long)]
    render_distance: Option<i32>,

    /// Reload worldgen params and rebuild the world when the config file changes
    #[arg(long)]
    watch_worldgen: bool,

    /// Regenerate the world with a fresh seed every N frames
    #[arg(long, default_value_t = 0)]
    regen_every: u64,

    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            let level = std::env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse::<LevelFilter>().ok())
                .unwrap_or(LevelFilter::Info);
            CombinedLogger::init(vec![
                TermLogger::new(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
                WriteLogger::new(level, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

fn load_world_params(path: &Path) -> WorldGenParams {
    if !path.exists() {
        log::warn!("worldgen config {} not found; using defaults", path.display());
        return WorldGenParams::default();
    }
    match vista_world::worldgen::load_params_from_path(path) {
        Ok(p) => {
            log::info!("worldgen config loaded from {}", path.display());
            p
        }
        Err(e) => {
            log::warn!("worldgen config {} unreadable ({}); using defaults", path.display(), e);
            WorldGenParams::default()
        }
    }
}

fn load_player_params(path: &Path) -> PlayerParams {
    if !path.exists() {
        log::warn!("player config {} not found; using defaults", path.display());
        return PlayerParams::default();
    }
    match player::load_params_from_path(path) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("player config {} unreadable ({}); using defaults", path.display(), e);
            PlayerParams::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let opts = AppOptions {
        seed: args.seed.unwrap_or_else(rand::random::<f64>),
        world_params: load_world_params(&args.world_config),
        player_params: load_player_params(&args.player_config),
        render_distance: args.render_distance,
        world_config_path: args.world_config.clone(),
        watch_worldgen: args.watch_worldgen,
        regen_every: args.regen_every,
    };
    let mut app = App::new(opts, Box::new(Autopilot::default()));

    let fps = if args.fps.is_finite() && args.fps > 0.0 {
        args.fps
    } else {
        60.0
    };
    let dt = 1.0 / fps;
    let frame_time = Duration::from_secs_f32(dt);
    let started = Instant::now();
    for _ in 0..args.frames {
        let t0 = Instant::now();
        app.step(dt);
        if args.realtime {
            if let Some(rest) = frame_time.checked_sub(t0.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let st = app.streamer.stats();
    log::info!(
        "done: {} frames in {:.2?}, seed {}, {} loads / {} unloads, {} regenerations",
        args.frames,
        started.elapsed(),
        app.gs.seed,
        st.loads,
        st.unloads,
        st.regenerations
    );
    for (label, n) in app.event_counts() {
        log::debug!("  {label}: {n}");
    }
    Ok(())
}
