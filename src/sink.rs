use hashbrown::HashSet;
use vista_geom::Vec3;
use vista_mesh_cpu::ChunkMeshCPU;
use vista_runtime::RenderSink;
use vista_world::ChunkCoord;

/// Headless stand-in for a renderer: tracks what would be on screen and logs it.
#[derive(Default, Debug)]
pub struct LogSink {
    live: HashSet<ChunkCoord>,
    pub uploaded_vertices: usize,
    pub uploaded_triangles: usize,
    pub uploads: u64,
    pub disposals: u64,
    pub avatar: Option<(Vec3, f32)>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn chunks_live(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn is_live(&self, coord: ChunkCoord) -> bool {
        self.live.contains(&coord)
    }
}

impl RenderSink for LogSink {
    fn chunk_loaded(&mut self, mesh: &ChunkMeshCPU) {
        if !self.live.insert(mesh.coord) {
            log::warn!("chunk ({}, {}) uploaded twice", mesh.coord.cx, mesh.coord.cz);
        }
        self.uploaded_vertices += mesh.mesh.vertex_count();
        self.uploaded_triangles += mesh.mesh.triangle_count();
        self.uploads += 1;
        log::trace!(
            "upload ({}, {}): {} tris, y {:.1}..{:.1}",
            mesh.coord.cx,
            mesh.coord.cz,
            mesh.mesh.triangle_count(),
            mesh.bbox.min.y,
            mesh.bbox.max.y
        );
    }

    fn chunk_unloaded(&mut self, coord: ChunkCoord) {
        if !self.live.remove(&coord) {
            log::warn!("dispose of unknown chunk ({}, {})", coord.cx, coord.cz);
        }
        self.disposals += 1;
    }

    fn avatar_moved(&mut self, position: Vec3, yaw: f32) {
        self.avatar = Some((position, yaw));
    }
}
