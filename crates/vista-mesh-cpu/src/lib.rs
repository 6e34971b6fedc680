//! CPU terrain meshing: chunk height grids to colored, smooth-shaded triangle lists.
#![forbid(unsafe_code)]

mod band;
mod build;
mod chunk;
mod constants;
mod mesh_build;

pub use band::Band;
pub use build::build_chunk_mesh;
pub use chunk::ChunkMeshCPU;
pub use mesh_build::MeshBuild;
