use vista_world::ChunkCoord;

use super::App;

impl App {
    pub(super) fn handle_view_center_changed(&mut self, ccx: i32, ccz: i32) {
        let center = ChunkCoord::new(ccx, ccz);
        if self.gs.center_chunk == Some(center) {
            return;
        }
        self.debug_stats.center_changes += 1;
        self.restream();
    }

    /// Brings the loaded set in line with the walker's current chunk.
    pub(crate) fn restream(&mut self) {
        let p = self.gs.walker.pos;
        let up = self.streamer.update_around_position(
            f64::from(p.x),
            f64::from(p.z),
            self.gs.view_radius_chunks,
            &mut self.sink,
        );
        self.gs.center_chunk = Some(ChunkCoord::containing(
            f64::from(p.x),
            f64::from(p.z),
            self.streamer.chunk_size(),
        ));
        self.debug_stats.chunk_loads += up.loaded;
        self.debug_stats.chunk_unloads += up.unloaded;
    }
}
