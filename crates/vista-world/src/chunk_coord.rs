/// Column coordinate of a terrain chunk in chunk units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk holding world position `(x, z)`.
    #[inline]
    pub fn containing(x: f64, z: f64, chunk_size: usize) -> Self {
        let s = chunk_size as f64;
        Self {
            cx: (x / s).floor() as i32,
            cz: (z / s).floor() as i32,
        }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// World-space corner with the smallest x and z.
    #[inline]
    pub fn origin(self, chunk_size: usize) -> (i64, i64) {
        let s = chunk_size as i64;
        (i64::from(self.cx) * s, i64::from(self.cz) * s)
    }

    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i64 {
        let dx = (i64::from(self.cx) - i64::from(other.cx)).abs();
        let dz = (i64::from(self.cz) - i64::from(other.cz)).abs();
        dx.max(dz)
    }

    /// Every coordinate within Chebyshev `radius` of `self`, row by row.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        let r = radius.max(0);
        (-r..=r).flat_map(move |dz| (-r..=r).map(move |dx| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}
