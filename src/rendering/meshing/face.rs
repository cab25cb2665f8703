use cgmath::{Point3, Vector3};

use crate::voxels::block::{block_side::BlockSide, catalog::ATLAS_TILES};

/// Atlas UV offsets of a face's corners, within one tile, in corner order.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points, counter-clockwise when viewed from outside the
/// block, and the atlas tile it samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corners of the face in chunk coordinates
    pub corners: [Point3<f32>; 4],
    /// Atlas tile origin, in tile units
    pub tile: [f32; 2],
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for a voxel at the given coordinates.
    ///
    /// # Arguments
    /// * `x`, `y`, `z` - The coordinates of the voxel in chunk space
    /// * `tile` - The atlas tile origin for this side of the block
    /// * `block_side` - Which side of the block this face represents
    ///
    /// # Returns
    /// A new `Face` whose corners are the block side's unit-cube corners moved to the voxel.
    pub fn new(x: usize, y: usize, z: usize, tile: [f32; 2], block_side: BlockSide) -> Self {
        let origin = Vector3::new(x as f32, y as f32, z as f32);
        let corners = block_side
            .corners()
            .map(|corner| Point3::new(0.0, 0.0, 0.0) + origin + corner);
        Face {
            corners,
            tile,
            block_side,
        }
    }

    /// Normalized atlas UV for each corner.
    pub fn tex_coords(&self) -> [[f32; 2]; 4] {
        CORNER_UVS.map(|[u, v]| [(self.tile[0] + u) / ATLAS_TILES, (self.tile[1] + v) / ATLAS_TILES])
    }
}
