//! Chunk streaming around a moving point, and the renderer boundary.
#![forbid(unsafe_code)]

mod sink;
mod stats;
mod streamer;

pub use sink::{NullSink, RenderSink};
pub use stats::{StreamStats, StreamUpdate};
pub use streamer::{Chunk, ChunkStreamer};
