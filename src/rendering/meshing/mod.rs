//! Mesh generation for voxel rendering.
//!
//! Converts visible block faces into GPU-friendly vertex and index buffers. Every visible
//! face becomes one quad; there is no face merging.
//!
//! # Architecture
//! - [`Face`]: one visible block face with its corners and atlas UVs
//! - [`ChunkMesh`]: the vertex and index buffers of one chunk

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
