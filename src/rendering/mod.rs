//! Renderer boundary for the voxel world.
//!
//! The world does not talk to a GPU. It produces per-chunk vertex and index buffers in the
//! layout a renderer uploads directly, plus the model offset each chunk is drawn at.
//!
//! # Architecture
//! - [`Vertex`]: the 6-float vertex format (position, atlas UV, face id)
//! - [`meshing`]: faces, the per-chunk mesh container and its index pattern

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use vertex::{Vertex, FLOATS_PER_VERTEX};
