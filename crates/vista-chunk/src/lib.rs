//! Height samples for one terrain chunk.
#![forbid(unsafe_code)]

use vista_world::{ChunkCoord, HeightField};

/// `(size + 1)^2` elevation samples covering a chunk including its far edges,
/// so neighbouring chunks share their boundary rows.
#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub size: usize,
    pub heights: Vec<f32>,
}

impl ChunkBuf {
    #[inline]
    pub fn samples_per_side(&self) -> usize {
        self.size + 1
    }

    #[inline]
    pub fn idx(&self, x: usize, z: usize) -> usize {
        z * self.samples_per_side() + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, z: usize) -> f32 {
        self.heights[self.idx(x, z)]
    }

    pub fn from_heights_local(coord: ChunkCoord, size: usize, heights: Vec<f32>) -> Self {
        let mut h = heights;
        let expect = (size + 1) * (size + 1);
        if h.len() != expect {
            h.resize(expect, 0.0);
        }
        ChunkBuf {
            coord,
            size,
            heights: h,
        }
    }
}

/// Samples the height field over a chunk's footprint.
pub fn generate_chunk_buffer(field: &mut HeightField, coord: ChunkCoord) -> ChunkBuf {
    let size = field.params().chunk_size;
    let n = size + 1;
    let (bx, bz) = coord.origin(size);
    let half = size as f64 * 0.5;
    let reach = field.params().coverage_radius();
    field.ensure_features(bx as f64 + half, bz as f64 + half, half + reach);

    let mut heights = Vec::with_capacity(n * n);
    for z in 0..n {
        for x in 0..n {
            let wx = (bx + x as i64) as f64;
            let wz = (bz + z as i64) as f64;
            heights.push(field.elevation(wx, wz) as f32);
        }
    }
    ChunkBuf {
        coord,
        size,
        heights,
    }
}
