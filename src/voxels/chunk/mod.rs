//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x256x16 columns of voxel data: the block grid itself, the biome tag chosen at
//! generation time, and the mesh built from it.
//!
//! ## Storage
//!
//! Blocks live in one flat boxed slice, one byte per block, indexed `(x * HEIGHT + y) * DEPTH + z`.
//! Iterating the slice front to back therefore visits blocks in x, then y, then z order,
//! which is also the order faces are emitted in.
//!
//! ## Neighbours
//!
//! A chunk never holds a reference to the world. Operations that need to see across a chunk
//! border take a [`ChunkNeighbors`] lookup instead.

use std::collections::HashMap;

use cgmath::{Point3, Vector3};

use super::biome::Biome;
use super::block::Block;
use super::position::{ChunkPos, LocalPos};
use crate::rendering::meshing::ChunkMesh;

mod chunk_meshing;
pub mod chunk_terrain;

/// The width (X extent) of a chunk in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// The height (Y extent) of a chunk in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
/// The depth (Z extent) of a chunk in blocks.
pub const CHUNK_DEPTH: i32 = 16;
/// The total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_DEPTH) as usize;

/// Read-only access to loaded chunks by position.
///
/// This is the only view of the world a chunk gets when it needs to look across its border.
pub trait ChunkNeighbors {
    /// The loaded chunk at `position`, if any.
    fn chunk_at(&self, position: ChunkPos) -> Option<&Chunk>;

    /// Whether all four horizontal neighbours of `position` are loaded.
    fn has_horizontal_neighbors(&self, position: ChunkPos) -> bool {
        position
            .horizontal_neighbors()
            .into_iter()
            .all(|neighbor| self.chunk_at(neighbor).is_some())
    }
}

impl ChunkNeighbors for HashMap<ChunkPos, Chunk> {
    fn chunk_at(&self, position: ChunkPos) -> Option<&Chunk> {
        self.get(&position)
    }
}

/// Represents a 16x256x16 column of voxel blocks in the world.
///
/// Chunks are the unit of generation, meshing and streaming. The mesh starts empty and is
/// only replaced by a successful build; a chunk whose neighbours have not loaded yet simply
/// renders nothing.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkPos,
    blocks: Box<[Block]>,
    biome: Biome,
    mesh: ChunkMesh,
    mesh_revision: u32,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    ///
    /// # Returns
    /// A new `Chunk` instance filled with air blocks and tagged as plains.
    pub fn empty(position: ChunkPos) -> Self {
        Self::filled(position, Block::AIR)
    }

    /// Creates a new chunk with every cell set to `block`.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `block` - The block to fill with
    pub fn filled(position: ChunkPos, block: Block) -> Self {
        Chunk {
            position,
            blocks: vec![block; CHUNK_VOLUME].into_boxed_slice(),
            biome: Biome::Plains,
            mesh: ChunkMesh::new(),
            mesh_revision: 0,
        }
    }

    fn index(local: LocalPos) -> usize {
        (local.x * CHUNK_HEIGHT as usize + local.y) * CHUNK_DEPTH as usize + local.z
    }

    fn local_at(index: usize) -> LocalPos {
        let z = index % CHUNK_DEPTH as usize;
        let y = (index / CHUNK_DEPTH as usize) % CHUNK_HEIGHT as usize;
        let x = index / (CHUNK_DEPTH * CHUNK_HEIGHT) as usize;
        LocalPos::new(x, y, z)
    }

    /// Gets the block at the specified chunk-relative position.
    pub fn block(&self, local: LocalPos) -> Block {
        self.blocks[Self::index(local)]
    }

    /// Gets the block at signed chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` if the coordinates fall outside the chunk.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        LocalPos::checked(x, y, z).map(|local| self.block(local))
    }

    /// Writes a block, returning the one it replaced.
    ///
    /// The mesh is not touched; callers decide when to rebuild.
    pub fn set_block(&mut self, local: LocalPos, block: Block) -> Block {
        std::mem::replace(&mut self.blocks[Self::index(local)], block)
    }

    /// Every non-air block with its position, in x, y, z order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (LocalPos, Block)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| !block.is_air())
            .map(|(index, block)| (Self::local_at(index), *block))
    }

    /// The raw block grid, one byte per block in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Height of the highest non-air block in a column.
    ///
    /// # Returns
    /// `None` if the column is entirely air, or if `x`/`z` are outside the chunk.
    pub fn top_solid_y(&self, x: usize, z: usize) -> Option<usize> {
        if x >= CHUNK_WIDTH as usize || z >= CHUNK_DEPTH as usize {
            return None;
        }
        (0..CHUNK_HEIGHT as usize)
            .rev()
            .find(|&y| !self.block(LocalPos::new(x, y, z)).is_air())
    }

    /// The biome this chunk was tagged with at generation.
    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub(crate) fn set_biome(&mut self, biome: Biome) {
        self.biome = biome;
    }

    /// Model transform translation for the renderer: the chunk's world origin.
    pub fn model_offset(&self) -> Vector3<f32> {
        let origin: Point3<i32> = self.position.world_origin();
        Vector3::new(origin.x as f32, origin.y as f32, origin.z as f32)
    }

    /// The most recently built mesh. Empty until the first successful build.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// How many times a mesh has been built for this chunk.
    pub fn mesh_revision(&self) -> u32 {
        self.mesh_revision
    }

    /// Replaces the mesh with a freshly built one.
    pub fn replace_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
        self.mesh_revision += 1;
    }
}
