use vista_geom::Vec3;

use crate::constants::{COL_STRIDE, POS_STRIDE};

/// Flat vertex/index buffers handed to the renderer.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub col: Vec<u8>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    #[inline]
    pub fn reserve(&mut self, vertices: usize, indices: usize) {
        self.pos.reserve(vertices * POS_STRIDE);
        self.norm.reserve(vertices * POS_STRIDE);
        self.col.reserve(vertices * COL_STRIDE);
        self.idx.reserve(indices);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / POS_STRIDE
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Appends a vertex with a zero normal; returns its index.
    pub fn push_vertex(&mut self, p: Vec3, rgb: [u8; 3]) -> u32 {
        let i = self.vertex_count() as u32;
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.norm.extend_from_slice(&[0.0, 0.0, 0.0]);
        self.col.extend_from_slice(&rgb);
        i
    }

    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.idx.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn position(&self, i: u32) -> Vec3 {
        let o = i as usize * POS_STRIDE;
        Vec3::new(self.pos[o], self.pos[o + 1], self.pos[o + 2])
    }

    #[inline]
    pub fn normal(&self, i: u32) -> Vec3 {
        let o = i as usize * POS_STRIDE;
        Vec3::new(self.norm[o], self.norm[o + 1], self.norm[o + 2])
    }

    /// Smooth per-vertex normals: each triangle's unit face normal
    /// `(b - a) x (c - a)` is summed into its three vertices, then every
    /// vertex normal is normalized.
    pub fn compute_smooth_normals(&mut self) {
        self.norm.iter_mut().for_each(|n| *n = 0.0);
        for t in 0..self.triangle_count() {
            let (a, b, c) = (self.idx[t * 3], self.idx[t * 3 + 1], self.idx[t * 3 + 2]);
            let (pa, pb, pc) = (self.position(a), self.position(b), self.position(c));
            let n = (pb - pa).cross(pc - pa).normalized();
            for v in [a, b, c] {
                let o = v as usize * POS_STRIDE;
                self.norm[o] += n.x;
                self.norm[o + 1] += n.y;
                self.norm[o + 2] += n.z;
            }
        }
        for v in self.norm.chunks_exact_mut(POS_STRIDE) {
            let n = Vec3::new(v[0], v[1], v[2]).normalized();
            v.copy_from_slice(&[n.x, n.y, n.z]);
        }
    }
}
