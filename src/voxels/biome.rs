//! # Biomes
//!
//! Terrain classification driving the height curve, the surface blocks and which
//! structures grow on a chunk.

use super::block::{block_type::BlockType, Block};

/// Terrain classification of a column or chunk.
///
/// Declaration order matters: when blended weights tie, the earliest biome wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Gentle grassland with the odd tree.
    Plains = 0,
    /// Raised, flat sand.
    Desert = 1,
    /// Rough, tree-covered hills.
    Forest = 2,
}

/// Shape of a biome's height curve.
///
/// Raw column height is `combined^power * 24 * height_scale + base_height`, where
/// `combined = base + detail * detail_weight + detail2 * 0.2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeParams {
    /// Multiplier on the noise amplitude.
    pub height_scale: f64,
    /// Weight of the first detail layer.
    pub detail_weight: f64,
    /// Exponent sharpening peaks.
    pub power: f64,
    /// Height added to every column.
    pub base_height: f64,
}

/// Which structure grows on a biome and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRule {
    /// Feature noise must exceed this for a column to grow the structure.
    pub threshold: f64,
    /// Name looked up in the structure catalog.
    pub structure: &'static str,
    /// Subtracted from the column's x/z so the template's centre lands on the column.
    pub offset: (i32, i32),
    /// The structure only grows on columns topped with this block.
    pub plantable: BlockType,
}

impl Biome {
    /// Every biome, in tie-break order.
    pub const ALL: [Biome; 3] = [Biome::Plains, Biome::Desert, Biome::Forest];

    /// Classifies a biome noise sample into threshold bands.
    ///
    /// `[-1, -0.3333)` is forest, `[-0.3333, 0.25)` plains, everything else desert.
    pub fn classify(noise: f64) -> Biome {
        if (-1.0..-0.3333).contains(&noise) {
            Biome::Forest
        } else if (-0.3333..0.25).contains(&noise) {
            Biome::Plains
        } else {
            Biome::Desert
        }
    }

    /// Height curve parameters.
    pub fn params(self) -> BiomeParams {
        match self {
            Biome::Desert => BiomeParams {
                height_scale: 0.5,
                detail_weight: 0.1,
                power: 1.0,
                base_height: 36.0,
            },
            Biome::Plains => BiomeParams {
                height_scale: 0.7,
                detail_weight: 0.1,
                power: 1.0,
                base_height: 31.0,
            },
            Biome::Forest => BiomeParams {
                height_scale: 1.0,
                detail_weight: 0.4,
                power: 1.3,
                base_height: 30.0,
            },
        }
    }

    /// Structure placement for chunks tagged with this biome.
    pub fn feature_rule(self) -> FeatureRule {
        match self {
            Biome::Plains => FeatureRule {
                threshold: 0.998,
                structure: "tree",
                offset: (2, 2),
                plantable: BlockType::GRASS,
            },
            Biome::Forest => FeatureRule {
                threshold: 0.93,
                structure: "tree",
                offset: (2, 2),
                plantable: BlockType::GRASS,
            },
            Biome::Desert => FeatureRule {
                threshold: 0.97,
                structure: "cactus",
                offset: (0, 0),
                plantable: BlockType::SAND,
            },
        }
    }

    /// Block at `depth` below the surface of a column, for the near-surface layers.
    ///
    /// Depth 0 is the surface itself, 1..=2 the soil layers and 3..=4 the layers above bare
    /// stone. Deserts stay sandy through all of them.
    pub fn layer_block(self, depth: i32) -> Block {
        let block_type = match (self, depth) {
            (Biome::Desert, 0..=4) => BlockType::SAND,
            (_, 0) => BlockType::GRASS,
            (_, 1..=2) => BlockType::DIRT,
            _ => BlockType::STONE,
        };
        Block::new(block_type)
    }
}
