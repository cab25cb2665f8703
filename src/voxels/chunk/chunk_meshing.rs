//! # Chunk Meshing
//!
//! Face culling and mesh construction. A face is emitted only when the voxel it faces is
//! empty, and the voxel across a chunk border is looked up through [`ChunkNeighbors`].

use log::trace;

use super::{Chunk, ChunkNeighbors, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::rendering::meshing::{ChunkMesh, Face};
use crate::voxels::block::{block_side::BlockSide, catalog::BlockCatalog};
use crate::voxels::position::{floor_div, LocalPos};

impl Chunk {
    /// Determines whether one face of the block at `local` should be drawn.
    ///
    /// # Arguments
    /// * `local` - The block whose face is tested
    /// * `side` - Which face
    /// * `neighbors` - Lookup for the chunks around this one
    ///
    /// # Returns
    /// `true` if the face borders empty space. Space above and below the world counts as
    /// empty, and so does a neighbouring chunk that is not loaded.
    pub fn is_face_visible(
        &self,
        local: LocalPos,
        side: BlockSide,
        neighbors: &impl ChunkNeighbors,
    ) -> bool {
        let target = local.to_point() + side.offset();

        if !(0..CHUNK_HEIGHT).contains(&target.y) {
            return true;
        }

        if let Some(block) = self.get(target.x, target.y, target.z) {
            return block.is_air();
        }

        let (chunk_dx, local_x) = floor_div(target.x, CHUNK_WIDTH);
        let (chunk_dz, local_z) = floor_div(target.z, CHUNK_DEPTH);
        match neighbors.chunk_at(self.position.offset(chunk_dx, chunk_dz)) {
            Some(neighbor) => neighbor
                .get(local_x, target.y, local_z)
                .map_or(true, |block| block.is_air()),
            None => true,
        }
    }

    /// Builds this chunk's mesh.
    ///
    /// # Arguments
    /// * `neighbors` - Lookup for the chunks around this one
    /// * `catalog` - Block descriptors used for atlas tiles
    ///
    /// # Returns
    /// The new mesh, or `None` when any of the four horizontal neighbours is missing. In that
    /// case the current mesh should be left as it is; the build is retried once the
    /// neighbour loads. Blocks whose id the catalog does not know produce no faces.
    pub fn build_mesh(
        &self,
        neighbors: &impl ChunkNeighbors,
        catalog: &BlockCatalog,
    ) -> Option<ChunkMesh> {
        if !neighbors.has_horizontal_neighbors(self.position) {
            trace!("Deferring mesh for chunk {:?}: neighbours missing", self.position);
            return None;
        }

        let mut mesh = ChunkMesh::new();
        for (local, block) in self.iter_blocks() {
            let Some(descriptor) = catalog.get(block.block_type) else {
                continue;
            };
            for side in BlockSide::all() {
                if self.is_face_visible(local, side, neighbors) {
                    mesh.push_face(&Face::new(local.x, local.y, local.z, descriptor.tile(side), side));
                }
            }
        }
        Some(mesh)
    }
}
