use super::App;
use crate::event::Event;

impl App {
    /// Coalesces pending worldgen file notifications into one reload event.
    pub fn process_worldgen_file_events(&mut self) {
        let mut changed = false;
        for _ in self.worldgen_event_rx.try_iter() {
            changed = true;
        }
        if changed {
            self.queue.emit_now(Event::WorldGenConfigChanged);
        }
    }

    pub(super) fn reload_worldgen_config(&mut self) {
        let path = self.world_config_path.clone();
        if !path.exists() {
            log::warn!("worldgen config missing: {}", path.display());
            return;
        }
        match vista_world::worldgen::load_params_from_path(&path) {
            Ok(params) => {
                if let Some(r) = self.render_distance_override {
                    self.gs.view_radius_chunks = r.max(0);
                } else {
                    self.gs.view_radius_chunks = params.render_distance;
                }
                self.streamer
                    .set_params(std::sync::Arc::new(params), &mut self.sink);
                log::info!("worldgen config reloaded from {}", path.display());
                self.replace_walker();
                self.gs.center_chunk = None;
                self.restream();
            }
            Err(e) => {
                log::warn!("worldgen config reload failed ({}): {}", path.display(), e);
            }
        }
    }
}
