use super::App;
use crate::event::Event;

impl App {
    /// One frame: input, player physics, streaming, render hand-off.
    pub fn step(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.process_worldgen_file_events();

        let tick = self.gs.tick;
        let frame = self.input.poll(tick, dt);
        let scheduled = self.regen_every > 0 && tick > 0 && tick % self.regen_every == 0;
        if frame.regenerate || scheduled {
            self.queue
                .emit_now(Event::WorldRegenerateRequested { seed: None });
        }
        if frame.jump {
            self.queue.emit_now(Event::JumpRequested);
        }
        self.queue.emit_now(Event::MovementRequested {
            dt,
            dx: frame.direction.x,
            dz: frame.direction.z,
            running: frame.running,
        });
        self.queue.emit_now(Event::Tick);

        while let Some(env) = self.queue.pop_ready() {
            // Tally processed stats (session-wide)
            self.evt_processed_total = self.evt_processed_total.saturating_add(1);
            *self.evt_processed_by.entry(env.kind.label()).or_insert(0) += 1;
            self.handle_event(env);
        }
        self.queue.advance_tick();
        self.gs.tick = self.gs.tick.wrapping_add(1);
        self.debug_stats.frames += 1;

        self.sim_time += f64::from(dt);
        if self.sim_time >= self.next_summary {
            self.log_summary();
            self.next_summary = self.sim_time.floor() + 1.0;
        }
    }

    fn log_summary(&mut self) {
        let w = &self.gs.walker;
        let ground = self
            .streamer
            .field_mut()
            .elevation(f64::from(w.pos.x), f64::from(w.pos.z));
        let st = self.streamer.stats();
        log::info!(
            "t={:.0}s tick={} pos=({:.1}, {:.1}, {:.1}) ground={:.1} {} chunks={} (+{} -{}) features={} jumps={} walked={:.0}",
            self.sim_time,
            self.gs.tick,
            w.pos.x,
            w.pos.y,
            w.pos.z,
            ground,
            if w.on_ground { "grounded" } else { "airborne" },
            st.loaded,
            self.debug_stats.chunk_loads,
            self.debug_stats.chunk_unloads,
            self.streamer.field().features().len(),
            self.gs.jumps,
            self.gs.distance_walked
        );
        log::debug!(
            "frames={} center_changes={} events={} queued={} live={} uploads={} disposals={} verts_uploaded={} tris_uploaded={}",
            self.debug_stats.frames,
            self.debug_stats.center_changes,
            self.evt_processed_total,
            self.queue.pending(),
            self.sink.chunks_live(),
            self.sink.uploads,
            self.sink.disposals,
            self.sink.uploaded_vertices,
            self.sink.uploaded_triangles
        );
        if let Some((p, yaw)) = self.sink.avatar {
            let feet = self.gs.walker.bbox.min.y;
            log::trace!(
                "avatar at ({:.1}, {:.1}, {:.1}) yaw {:.2}, feet {:.1}",
                p.x,
                p.y,
                p.z,
                yaw,
                feet
            );
        }
        self.debug_stats = Default::default();
    }

    /// Processed events by kind, most frequent first.
    pub fn event_counts(&self) -> Vec<(&'static str, usize)> {
        let mut v: Vec<_> = self.evt_processed_by.iter().map(|(k, n)| (*k, *n)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        v
    }
}
