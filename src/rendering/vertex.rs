//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format handed to the renderer. The layout is plain `f32`s
//! so a mesh can be viewed as a flat float buffer without copying.

use cgmath::Point3;

/// Number of `f32`s per vertex in the flat buffer.
pub const FLOATS_PER_VERTEX: usize = 6;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Texture Coordinates: [f32; 2] (8 bytes), normalized atlas UV
/// - Face Id: f32 (4 bytes), the `BlockSide` discriminant
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// UV texture coordinates into the atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
    /// Which face of the block this vertex belongs to
    pub face_id: f32,
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `pos` - Chunk-local position of the vertex
    /// * `tex_coords` - Normalized atlas UV
    /// * `face_id` - Index of the block side the vertex belongs to
    ///
    /// # Returns
    /// A new `Vertex` instance
    pub fn new(pos: Point3<f32>, tex_coords: [f32; 2], face_id: u32) -> Self {
        Vertex {
            position: [pos.x, pos.y, pos.z],
            tex_coords,
            face_id: face_id as f32,
        }
    }
}
