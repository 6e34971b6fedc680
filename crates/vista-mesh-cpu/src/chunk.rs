use vista_geom::Aabb;
use vista_world::ChunkCoord;

use crate::mesh_build::MeshBuild;

#[derive(Clone, Debug)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub mesh: MeshBuild,
}
