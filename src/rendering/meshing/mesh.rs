//! Mesh data structures and operations for voxel rendering.
//!
//! This module holds the per-chunk vertex and index buffers and the fixed quad index
//! pattern every face is emitted with.

use super::face::Face;
use crate::rendering::Vertex;

/// The vertex and index buffers of one chunk.
///
/// Vertices are chunk-local; the renderer places them with the chunk's model offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// The vertex data, four vertices per face
    pub vertices: Vec<Vertex>,
    /// The index data, six indices per face
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    ///
    /// # Returns
    /// A new `ChunkMesh` with empty vertex and index buffers. An empty mesh renders nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one face as a quad.
    ///
    /// # Arguments
    /// * `face` - The face to add
    ///
    /// # Note
    /// The indices are offset by the number of faces already in the mesh.
    pub fn push_face(&mut self, face: &Face) {
        let faces_so_far = self.quad_count() as u32;
        let face_id = face.block_side as u32;
        self.vertices.extend(
            face.corners
                .iter()
                .zip(face.tex_coords())
                .map(|(corner, uv)| Vertex::new(*corner, uv, face_id)),
        );
        self.indices
            .extend_from_slice(&Self::generate_face_indices(faces_so_far));
    }

    /// Generates index data for a face, adjusted by the number of previously generated faces.
    ///
    /// # Arguments
    /// * `num_faces_generated` - The number of faces that have been generated so far
    ///
    /// # Returns
    /// Indices forming two triangles (`0 1 2`, `2 3 0` of the face's corners), which keeps
    /// the corners' counter-clockwise winding.
    pub fn generate_face_indices(num_faces_generated: u32) -> [u32; 6] {
        let base = num_faces_generated * 4;
        [base, base + 1, base + 2, base + 2, base + 3, base]
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertex buffer as a flat float slice, six floats per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::FLOATS_PER_VERTEX;
    use crate::voxels::block::block_side::BlockSide;

    #[test]
    fn indices_follow_face_count() {
        assert_eq!(ChunkMesh::generate_face_indices(0), [0, 1, 2, 2, 3, 0]);
        assert_eq!(ChunkMesh::generate_face_indices(3), [12, 13, 14, 14, 15, 12]);
    }

    #[test]
    fn push_face_appends_quads() {
        let mut mesh = ChunkMesh::new();
        assert!(mesh.is_empty());
        mesh.push_face(&Face::new(0, 0, 0, [0.0, 15.0], BlockSide::FRONT));
        mesh.push_face(&Face::new(0, 0, 0, [2.0, 15.0], BlockSide::TOP));

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.indices.len(), 12);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 6, 7, 4]);
        assert_eq!(mesh.as_floats().len(), 8 * FLOATS_PER_VERTEX);
        assert_eq!(mesh.vertices[4].face_id, BlockSide::TOP as u32 as f32);
    }
}
