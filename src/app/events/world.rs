use rand::Rng;

use super::App;

impl App {
    pub(super) fn handle_world_regenerate_requested(&mut self, seed: Option<f64>) {
        let seed = seed
            .filter(|s| s.is_finite())
            .unwrap_or_else(|| self.rng.random::<f64>());
        self.streamer.regenerate(seed, &mut self.sink);
        self.gs.seed = seed;
        self.gs.regenerations += 1;
        log::debug!(
            "[tick {}] regeneration #{} (seed {})",
            self.gs.tick,
            self.gs.regenerations,
            seed
        );
        self.respawn();
        self.gs.center_chunk = None;
        self.restream();
    }

    /// Drops the walker at a random spot near the origin of the current world.
    pub(crate) fn respawn(&mut self) {
        let field = self.streamer.field_mut();
        let mut ground = |x: f32, z: f32| field.elevation(f64::from(x), f64::from(z)) as f32;
        self.gs.walker.spawn(&mut self.rng, &mut ground);
    }

    /// Re-seats the walker above the (possibly changed) terrain at its current column.
    pub(crate) fn replace_walker(&mut self) {
        let (x, z) = (self.gs.walker.pos.x, self.gs.walker.pos.z);
        let field = self.streamer.field_mut();
        let mut ground = |x: f32, z: f32| field.elevation(f64::from(x), f64::from(z)) as f32;
        self.gs.walker.place(x, z, &mut ground);
    }
}
