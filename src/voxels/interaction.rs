//! # Block Interaction
//!
//! Breaking, placing and inspecting blocks along the player's line of sight, plus direct
//! edits by world position. Every edit remeshes the edited chunk and, when the edited column
//! sits on a chunk border, the neighbour sharing that border.
//!
//! None of these operations fail loudly. A miss, an unloaded chunk, a height outside the world
//! or an occupied cell all leave the world untouched and report `false` or `None`.

use cgmath::{Point3, Vector3};
use log::debug;

use super::block::{block_side::BlockSide, Block};
use super::position::{split_world, ChunkPos, LocalPos};
use super::world::World;

/// What the player is looking at, for external display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookedAtBlock {
    /// World position of the block.
    pub world_position: Point3<i32>,
    /// The block itself.
    pub block: Block,
    /// Face the line of sight enters through, `None` from inside the block.
    pub face: Option<BlockSide>,
    /// Display name from the block catalog, `None` for ids it does not know.
    pub name: Option<&'static str>,
}

impl World {
    /// The block at a world position.
    ///
    /// # Returns
    /// `None` if the position is outside the world's height or its chunk is not loaded.
    pub fn get_block(&self, world_position: Point3<i32>) -> Option<Block> {
        let (chunk, local) = split_world(world_position)?;
        self.chunk(chunk).map(|chunk| chunk.block(local))
    }

    /// Writes a block at a world position and remeshes what it touches.
    ///
    /// # Returns
    /// `true` if the block changed. `false` if the position is outside the world's height,
    /// its chunk is not loaded, or the block was already there.
    pub fn set_block(&mut self, world_position: Point3<i32>, block: Block) -> bool {
        let Some((chunk_pos, local)) = split_world(world_position) else {
            return false;
        };
        let Some(chunk) = self.chunk_mut(chunk_pos) else {
            return false;
        };
        if chunk.set_block(local, block) == block {
            return false;
        }
        self.remesh_edit(chunk_pos, local);
        true
    }

    /// Clears the first block along the ray within reach.
    ///
    /// # Arguments
    /// * `origin` - Camera position in world space
    /// * `direction` - Normalized camera forward vector
    ///
    /// # Returns
    /// `true` if a block was removed.
    pub fn break_block(&mut self, origin: Point3<f32>, direction: Vector3<f32>) -> bool {
        let Some(hit) = self.raycast(origin, direction, self.reach()) else {
            return false;
        };
        let Some(chunk) = self.chunk_mut(hit.block.chunk) else {
            return false;
        };
        if chunk.set_block(hit.block.local, Block::AIR).is_air() {
            return false;
        }

        debug!("Broke block at {:?}", hit.block.world_position());
        self.remesh_edit(hit.block.chunk, hit.block.local);
        true
    }

    /// Places a block in the empty cell just before the first block along the ray.
    ///
    /// # Arguments
    /// * `origin` - Camera position in world space
    /// * `direction` - Normalized camera forward vector
    /// * `block` - The block to place
    ///
    /// # Returns
    /// `true` if the block was placed. Nothing happens when there is no hit, the ray started
    /// inside a block, the target cell is above or below the world or in an unloaded chunk,
    /// or the cell is already occupied.
    pub fn place_block(&mut self, origin: Point3<f32>, direction: Vector3<f32>, block: Block) -> bool {
        if block.is_air() {
            return false;
        }
        let Some(placement) = self
            .raycast(origin, direction, self.reach())
            .and_then(|hit| hit.placement)
        else {
            return false;
        };
        let Some((chunk_pos, local)) = split_world(placement.world_position) else {
            return false;
        };
        let Some(chunk) = self.chunk_mut(chunk_pos) else {
            return false;
        };
        if !chunk.block(local).is_air() {
            return false;
        }

        chunk.set_block(local, block);
        debug!("Placed {:?} at {:?}", block, placement.world_position);
        self.remesh_edit(chunk_pos, local);
        true
    }

    /// The first block along the ray within reach, with its catalog name.
    pub fn looked_at_block(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
    ) -> Option<LookedAtBlock> {
        let hit = self.raycast(origin, direction, self.reach())?;
        let block = self.hit_block(&hit)?;
        Some(LookedAtBlock {
            world_position: hit.block.world_position(),
            block,
            face: hit.face(),
            name: self.block_catalog().name(block.block_type),
        })
    }

    /// Remeshes an edited chunk and every neighbour sharing the edited column's border.
    fn remesh_edit(&mut self, chunk: ChunkPos, local: LocalPos) {
        self.build_chunk_mesh(chunk);
        for neighbor in local.bordering_chunks(chunk) {
            self.build_chunk_mesh(neighbor);
        }
    }
}
