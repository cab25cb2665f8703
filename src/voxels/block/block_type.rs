//! # Block Type Module
//!
//! This module defines the closed set of block types in the voxel world and provides
//! conversion from the raw ids stored in chunk grids.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants are the ids stored in chunk grids and structure templates. The
/// `FromPrimitive` derive allows conversion back from those raw ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Never meshed, never hit by a raycast.
    AIR = 0,
    /// Surface block of plains and forests, grass on top and dirt underneath.
    GRASS = 1,
    /// The two layers under grass.
    DIRT = 2,
    /// Everything below the near-surface layers.
    STONE = 3,
    /// Desert surface and near-surface block.
    SAND = 4,
    /// Tree trunks.
    LOG = 5,
    /// The y = 0 floor of every column.
    BEDROCK = 6,
    /// Loose stone, placeable only.
    GRAVEL = 7,
    /// Building block, placeable only.
    BRICKS = 8,
    /// Fills columns below sea level.
    WATER = 9,
    /// Placeable only.
    LAVA = 10,
    /// Tree canopies.
    LEAVES = 11,
    /// Desert feature.
    CACTUS = 12,
}

impl BlockType {
    /// Every non-air block type, in id order.
    pub const SOLIDS: [BlockType; 12] = [
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::STONE,
        BlockType::SAND,
        BlockType::LOG,
        BlockType::BEDROCK,
        BlockType::GRAVEL,
        BlockType::BRICKS,
        BlockType::WATER,
        BlockType::LAVA,
        BlockType::LEAVES,
        BlockType::CACTUS,
    ];

    /// Converts a raw id to a `BlockType`.
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the id is not part of the closed set.
    pub fn from_id(btype: BlockTypeSize) -> Option<Self> {
        FromPrimitive::from_u8(btype)
    }

    /// The raw id stored in chunk grids.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for block_type in BlockType::SOLIDS {
            assert_eq!(BlockType::from_id(block_type.id()), Some(block_type));
        }
        assert_eq!(BlockType::from_id(0), Some(BlockType::AIR));
        assert_eq!(BlockType::from_id(13), None);
    }
}
