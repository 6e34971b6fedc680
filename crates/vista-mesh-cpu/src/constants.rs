//! Shared constants for vista-mesh-cpu.

/// Floats per position/normal, bytes per color (rgb).
pub(crate) const POS_STRIDE: usize = 3;
pub(crate) const COL_STRIDE: usize = 3;

/// Indices emitted per grid cell (two triangles).
pub(crate) const INDICES_PER_CELL: usize = 6;
