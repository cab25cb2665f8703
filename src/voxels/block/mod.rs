//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel world.
//! It includes block type definitions, block face handling, the atlas catalog and the
//! compact block value stored in chunk grids.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;
pub mod catalog;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage of block data in chunk grids.
pub type BlockTypeSize = u8;

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the block's type id. Everything else
/// (texture, transparency, display name) is looked up from the
/// [`catalog::BlockCatalog`].
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the grid a plain byte array, one byte per block.
/// The id is kept raw rather than as a [`BlockType`] so a grid can carry ids the catalog
/// does not know; meshing simply skips those.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// The empty block. Id 0 is reserved for air.
    pub const AIR: Block = Block::from_id(0);

    /// Creates a new block of the specified type.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to create
    ///
    /// # Returns
    /// A new `Block` instance with the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Creates a block from a raw type id, known to the catalog or not.
    pub const fn from_id(block_type: BlockTypeSize) -> Self {
        Block { block_type }
    }

    /// Whether this is the empty block.
    pub fn is_air(&self) -> bool {
        self.block_type == 0
    }

    /// The typed form of this block, or `None` for ids outside the closed set.
    pub fn kind(&self) -> Option<BlockType> {
        BlockType::from_id(self.block_type)
    }
}

impl From<BlockType> for Block {
    fn from(block_type: BlockType) -> Self {
        Block::new(block_type)
    }
}
