mod logging;
mod movement;
mod streaming;
mod world;

use super::App;
use crate::event::{Event, EventEnvelope};

impl App {
    pub(super) fn handle_event(&mut self, env: EventEnvelope) {
        // Log a concise line for the processed event
        Self::log_event(&env);
        match env.kind {
            Event::Tick => {
                self.handle_tick();
            }
            Event::MovementRequested {
                dt,
                dx,
                dz,
                running,
            } => {
                self.handle_movement_requested(dt, dx, dz, running);
            }
            Event::JumpRequested => {
                self.handle_jump_requested();
            }
            Event::WorldRegenerateRequested { seed } => {
                self.handle_world_regenerate_requested(seed);
            }
            Event::WorldGenConfigChanged => {
                self.reload_worldgen_config();
            }
            Event::ViewCenterChanged { ccx, ccz } => {
                self.handle_view_center_changed(ccx, ccz);
            }
        }
    }
}
