use vista_geom::Vec3;
use vista_mesh_cpu::ChunkMeshCPU;
use vista_world::ChunkCoord;

/// Receiver for everything the renderer needs to draw. Purely a consumer:
/// nothing it does feeds back into the terrain or the walker.
pub trait RenderSink {
    fn chunk_loaded(&mut self, mesh: &ChunkMeshCPU);
    fn chunk_unloaded(&mut self, coord: ChunkCoord);
    fn avatar_moved(&mut self, position: Vec3, yaw: f32);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn chunk_loaded(&mut self, _mesh: &ChunkMeshCPU) {}
    fn chunk_unloaded(&mut self, _coord: ChunkCoord) {}
    fn avatar_moved(&mut self, _position: Vec3, _yaw: f32) {}
}
