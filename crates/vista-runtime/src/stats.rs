#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Chunks sampled and meshed.
    pub loads: u64,
    pub unloads: u64,
    /// `load_chunk` calls answered from the table.
    pub hits: u64,
    pub loaded: usize,
    pub regenerations: u64,
}

/// Outcome of one `update_around_position` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamUpdate {
    pub loaded: usize,
    pub unloaded: usize,
}

impl StreamUpdate {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.loaded == 0 && self.unloaded == 0
    }
}
