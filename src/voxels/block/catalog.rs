//! # Block Catalog
//!
//! Maps block type ids to their texture-atlas descriptors. The standard entries live in a
//! compile-time `phf` table; [`BlockCatalog`] is the runtime object built from it once and
//! handed to the world by reference.

use std::collections::HashMap;

use phf::phf_map;

use super::{block_side::BlockSide, BlockTypeSize};

/// Number of tiles along each edge of the texture atlas.
pub const ATLAS_TILES: f32 = 16.0;

/// How a block type looks: one atlas tile origin per face, plus transparency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDescriptor {
    /// Display name, as shown by look-at queries.
    pub name: &'static str,
    /// Atlas tile origin for each face, indexed by [`BlockSide`], in atlas tile units.
    pub texture_coords: [[f32; 2]; 6],
    /// Whether light passes through the block.
    ///
    /// Informational for now; meshing treats every non-air block as an occluder.
    pub transparent: bool,
}

impl BlockDescriptor {
    /// A block using the same tile on every face.
    pub const fn uniform(name: &'static str, tile: [f32; 2], transparent: bool) -> Self {
        BlockDescriptor {
            name,
            texture_coords: [tile; 6],
            transparent,
        }
    }

    /// A block with its own top and bottom tiles and a shared tile on the four sides.
    pub const fn capped(
        name: &'static str,
        sides: [f32; 2],
        top: [f32; 2],
        bottom: [f32; 2],
        transparent: bool,
    ) -> Self {
        BlockDescriptor {
            name,
            texture_coords: [sides, sides, sides, sides, top, bottom],
            transparent,
        }
    }

    /// Atlas tile origin of one face, in tile units.
    pub fn tile(&self, side: BlockSide) -> [f32; 2] {
        self.texture_coords[side as usize]
    }
}

static STANDARD_BLOCKS: phf::Map<u8, BlockDescriptor> = phf_map! {
    1u8 => BlockDescriptor::capped("Grass", [0.0, 15.0], [2.0, 15.0], [1.0, 15.0], false),
    2u8 => BlockDescriptor::uniform("Dirt", [1.0, 15.0], false),
    3u8 => BlockDescriptor::uniform("Stone", [3.0, 15.0], false),
    4u8 => BlockDescriptor::uniform("Sand", [4.0, 15.0], false),
    5u8 => BlockDescriptor::capped("Log", [2.0, 14.0], [3.0, 14.0], [3.0, 14.0], false),
    6u8 => BlockDescriptor::uniform("Bedrock", [1.0, 14.0], false),
    7u8 => BlockDescriptor::uniform("Gravel", [5.0, 15.0], false),
    8u8 => BlockDescriptor::uniform("Bricks", [4.0, 14.0], false),
    9u8 => BlockDescriptor::uniform("Water", [0.0, 13.0], true),
    10u8 => BlockDescriptor::uniform("Lava", [1.0, 13.0], true),
    11u8 => BlockDescriptor::uniform("Leaves", [6.0, 15.0], true),
    12u8 => BlockDescriptor::capped("Cactus", [7.0, 15.0], [7.0, 14.0], [8.0, 15.0], false),
};

/// Runtime registry of block descriptors, keyed by block type id.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    descriptors: HashMap<BlockTypeSize, BlockDescriptor>,
}

impl BlockCatalog {
    /// An empty catalog. Every block meshes as nothing until registered.
    pub fn empty() -> Self {
        BlockCatalog {
            descriptors: HashMap::new(),
        }
    }

    /// The twelve standard block types.
    pub fn standard() -> Self {
        BlockCatalog {
            descriptors: STANDARD_BLOCKS
                .entries()
                .map(|(id, descriptor)| (*id, *descriptor))
                .collect(),
        }
    }

    /// Adds or replaces the descriptor for a block type id.
    ///
    /// Id 0 is air and is never registered.
    pub fn register(&mut self, id: BlockTypeSize, descriptor: BlockDescriptor) {
        if id == 0 {
            return;
        }
        self.descriptors.insert(id, descriptor);
    }

    /// Looks up a descriptor. `None` for air and for unknown ids.
    pub fn get(&self, id: BlockTypeSize) -> Option<&BlockDescriptor> {
        self.descriptors.get(&id)
    }

    /// Display name of a block type id.
    pub fn name(&self, id: BlockTypeSize) -> Option<&'static str> {
        self.get(id).map(|descriptor| descriptor.name)
    }

    /// Whether a known block type lets light through. Unknown ids report `false`.
    pub fn is_transparent(&self, id: BlockTypeSize) -> bool {
        self.get(id).is_some_and(|descriptor| descriptor.transparent)
    }

    /// Number of registered block types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no block types are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::block::block_type::BlockType;

    #[test]
    fn standard_catalog_covers_every_solid_type() {
        let catalog = BlockCatalog::standard();
        assert_eq!(catalog.len(), 12);
        for block_type in BlockType::SOLIDS {
            assert!(catalog.get(block_type.id()).is_some(), "{block_type:?}");
        }
        assert!(catalog.get(BlockType::AIR.id()).is_none());
    }

    #[test]
    fn grass_has_distinct_top_and_bottom() {
        let catalog = BlockCatalog::standard();
        let grass = catalog.get(BlockType::GRASS.id()).unwrap();
        assert_eq!(grass.tile(BlockSide::FRONT), [0.0, 15.0]);
        assert_eq!(grass.tile(BlockSide::TOP), [2.0, 15.0]);
        assert_eq!(grass.tile(BlockSide::BOTTOM), [1.0, 15.0]);
    }

    #[test]
    fn transparency_flags() {
        let catalog = BlockCatalog::standard();
        assert!(catalog.is_transparent(BlockType::WATER.id()));
        assert!(catalog.is_transparent(BlockType::LEAVES.id()));
        assert!(!catalog.is_transparent(BlockType::STONE.id()));
        assert!(!catalog.is_transparent(99));
    }

    #[test]
    fn air_cannot_be_registered() {
        let mut catalog = BlockCatalog::empty();
        catalog.register(0, BlockDescriptor::uniform("Nothing", [0.0, 0.0], true));
        assert!(catalog.is_empty());
        catalog.register(40, BlockDescriptor::uniform("Marble", [9.0, 15.0], false));
        assert_eq!(catalog.name(40), Some("Marble"));
    }
}
