//! Seeded terrain: noise, landscape features, the height field, and worldgen parameters.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod features;
pub mod height;
pub mod noise;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use features::{FeatureCache, FeatureKind, GridKey, LandscapeFeature};
pub use height::HeightField;
pub use noise::{NoiseField, OctavePass};
pub use worldgen::{WorldGenConfig, WorldGenParams};
