use vista_geom::Vec3;
use vista_runtime::RenderSink;
use vista_world::ChunkCoord;

use super::App;
use crate::event::Event;

impl App {
    pub(super) fn handle_movement_requested(&mut self, dt: f32, dx: f32, dz: f32, running: bool) {
        let before = self.gs.walker.pos;
        let field = self.streamer.field_mut();
        let mut ground = |x: f32, z: f32| field.elevation(f64::from(x), f64::from(z)) as f32;
        let walker = &mut self.gs.walker;
        walker.move_with_sampler(Vec3::new(dx, 0.0, dz), dt, running, &mut ground);
        walker.update(dt, &mut ground);
        self.gs.distance_walked += f64::from((walker.pos - before).planar_length());
    }

    pub(super) fn handle_jump_requested(&mut self) {
        if self.gs.walker.jump() {
            self.gs.jumps += 1;
            let walker = &self.gs.walker;
            log::debug!(
                "jump at y={:.1}, next power {:.1}/{:.1}",
                walker.pos.y,
                walker.jump_power,
                walker.params().max_jump_power
            );
        } else {
            let walker = &self.gs.walker;
            log::trace!(
                "jump refused (grounded={}, cooldown {:.2}s)",
                walker.on_ground,
                walker.jump_cooldown()
            );
        }
    }

    /// Publishes the avatar pose and notices chunk-boundary crossings.
    pub(super) fn handle_tick(&mut self) {
        let p = self.gs.walker.pos;
        let size = self.streamer.chunk_size();
        let center = ChunkCoord::containing(f64::from(p.x), f64::from(p.z), size);
        if self.gs.center_chunk != Some(center) {
            self.queue.emit_now(Event::ViewCenterChanged {
                ccx: center.cx,
                ccz: center.cz,
            });
        }
        self.sink.avatar_moved(p, self.gs.walker.yaw);
    }
}
