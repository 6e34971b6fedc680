use vista_chunk::ChunkBuf;
use vista_geom::{Aabb, Vec3};

use crate::band::Band;
use crate::chunk::ChunkMeshCPU;
use crate::constants::INDICES_PER_CELL;
use crate::mesh_build::MeshBuild;

/// Builds the terrain surface for a sampled chunk.
///
/// Vertices sit at integer world columns, row-major by z then x, tinted by
/// elevation band. Each grid cell emits `(tl, bl, tr)` and `(tr, bl, br)`,
/// both wound so their face normals point up.
pub fn build_chunk_mesh(buf: &ChunkBuf) -> ChunkMeshCPU {
    let n = buf.samples_per_side();
    let (bx, bz) = buf.coord.origin(buf.size);
    let mut mesh = MeshBuild::default();
    mesh.reserve(n * n, buf.size * buf.size * INDICES_PER_CELL);

    for z in 0..n {
        for x in 0..n {
            let h = buf.get_local(x, z);
            let p = Vec3::new((bx + x as i64) as f32, h, (bz + z as i64) as f32);
            mesh.push_vertex(p, Band::for_height(h).rgb());
        }
    }

    let stride = n as u32;
    for z in 0..buf.size as u32 {
        for x in 0..buf.size as u32 {
            let tl = z * stride + x;
            let tr = tl + 1;
            let bl = tl + stride;
            let br = bl + 1;
            mesh.push_triangle(tl, bl, tr);
            mesh.push_triangle(tr, bl, br);
        }
    }
    mesh.compute_smooth_normals();

    let bbox = Aabb::enclosing((0..mesh.vertex_count() as u32).map(|i| mesh.position(i)))
        .unwrap_or_default();
    log::trace!(
        "meshed chunk ({}, {}): {} verts, {} tris",
        buf.coord.cx,
        buf.coord.cz,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    ChunkMeshCPU {
        coord: buf.coord,
        bbox,
        mesh,
    }
}
