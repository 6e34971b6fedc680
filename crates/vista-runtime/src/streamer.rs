use std::sync::Arc;

use hashbrown::HashMap;
use vista_chunk::{ChunkBuf, generate_chunk_buffer};
use vista_mesh_cpu::{ChunkMeshCPU, build_chunk_mesh};
use vista_world::{ChunkCoord, HeightField, WorldGenParams};

use crate::sink::RenderSink;
use crate::stats::{StreamStats, StreamUpdate};

pub struct Chunk {
    pub coord: ChunkCoord,
    pub buf: ChunkBuf,
    pub mesh: ChunkMeshCPU,
}

/// Owns the height field and the table of loaded chunks; sole authority on
/// chunk lifetime. The sink is only told about loads and unloads.
pub struct ChunkStreamer {
    field: HeightField,
    chunks: HashMap<ChunkCoord, Chunk>,
    center: Option<ChunkCoord>,
    loads: u64,
    unloads: u64,
    hits: u64,
    regenerations: u64,
}

impl ChunkStreamer {
    pub fn new(seed: f64, params: Arc<WorldGenParams>) -> Self {
        Self {
            field: HeightField::new(seed, params),
            chunks: HashMap::new(),
            center: None,
            loads: 0,
            unloads: 0,
            hits: 0,
            regenerations: 0,
        }
    }

    #[inline]
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Mutable height field access, for walkers sampling ground between chunk loads.
    #[inline]
    pub fn field_mut(&mut self) -> &mut HeightField {
        &mut self.field
    }

    #[inline]
    pub fn seed(&self) -> f64 {
        self.field.seed()
    }

    #[inline]
    pub fn params(&self) -> &Arc<WorldGenParams> {
        self.field.params()
    }

    #[inline]
    pub fn elevation(&mut self, x: f64, z: f64) -> f64 {
        self.field.elevation(x, z)
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.field.params().chunk_size
    }

    #[inline]
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Loaded coordinates in ascending order.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        v.sort_unstable();
        v
    }

    pub fn stats(&self) -> StreamStats {
        StreamStats {
            loads: self.loads,
            unloads: self.unloads,
            hits: self.hits,
            loaded: self.chunks.len(),
            regenerations: self.regenerations,
        }
    }

    /// Returns the chunk at `coord`, sampling, meshing and announcing it first
    /// if it is not loaded yet.
    pub fn load_chunk(&mut self, coord: ChunkCoord, sink: &mut dyn RenderSink) -> &Chunk {
        match self.chunks.entry(coord) {
            hashbrown::hash_map::Entry::Occupied(e) => {
                self.hits += 1;
                e.into_mut()
            }
            hashbrown::hash_map::Entry::Vacant(v) => {
                let buf = generate_chunk_buffer(&mut self.field, coord);
                let mesh = build_chunk_mesh(&buf);
                sink.chunk_loaded(&mesh);
                self.loads += 1;
                log::debug!("chunk ({}, {}) loaded", coord.cx, coord.cz);
                v.insert(Chunk { coord, buf, mesh })
            }
        }
    }

    /// Drops the chunk at `coord`; returns whether one was loaded.
    pub fn unload_chunk(&mut self, coord: ChunkCoord, sink: &mut dyn RenderSink) -> bool {
        if self.chunks.remove(&coord).is_none() {
            return false;
        }
        sink.chunk_unloaded(coord);
        self.unloads += 1;
        log::debug!("chunk ({}, {}) unloaded", coord.cx, coord.cz);
        true
    }

    /// Makes the loaded set exactly the Chebyshev square of `render_distance`
    /// around the chunk holding `(x, z)`.
    pub fn update_around_position(
        &mut self,
        x: f64,
        z: f64,
        render_distance: i32,
        sink: &mut dyn RenderSink,
    ) -> StreamUpdate {
        let center = ChunkCoord::containing(x, z, self.chunk_size());
        let r = render_distance.max(0);
        let mut out = StreamUpdate::default();

        for coord in center.square_around(r) {
            if !self.chunks.contains_key(&coord) {
                self.load_chunk(coord, sink);
                out.loaded += 1;
            }
        }

        let mut stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .copied()
            .filter(|c| c.chebyshev(center) > i64::from(r))
            .collect();
        stale.sort_unstable();
        for coord in stale {
            if self.unload_chunk(coord, sink) {
                out.unloaded += 1;
            }
        }

        if self.center != Some(center) {
            log::debug!(
                "stream center ({}, {}): +{} -{} ({} loaded)",
                center.cx,
                center.cz,
                out.loaded,
                out.unloaded,
                self.chunks.len()
            );
            self.center = Some(center);
        }
        out
    }

    fn unload_all(&mut self, sink: &mut dyn RenderSink) {
        for coord in self.loaded_coords() {
            self.unload_chunk(coord, sink);
        }
        self.center = None;
    }

    /// Starts a new world: every chunk unloaded, features dropped, fresh noise.
    pub fn regenerate(&mut self, seed: f64, sink: &mut dyn RenderSink) {
        let dropped = self.chunks.len();
        self.unload_all(sink);
        self.field.reseed(seed);
        self.regenerations += 1;
        log::info!("world regenerated with seed {seed} ({dropped} chunks dropped)");
    }

    /// Swaps worldgen parameters and regenerates under the current seed.
    pub fn set_params(&mut self, params: Arc<WorldGenParams>, sink: &mut dyn RenderSink) {
        self.unload_all(sink);
        self.field.set_params(params);
        self.regenerations += 1;
        log::info!("worldgen params replaced; world rebuilt with seed {}", self.seed());
    }
}
