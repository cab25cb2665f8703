//! # Structures
//!
//! Named multi-layer block templates (trees, cacti) and the arithmetic that spreads a
//! stamped template over the chunks it covers.
//!
//! A template is a stack of layers indexed `layers[y][z][x]`. Its anchor is layer 0, row 0,
//! column 0; a cell holding id 0 leaves whatever is already in the world untouched.

use std::collections::HashMap;

use cgmath::{Point3, Vector3};
use phf::phf_map;

use super::block::{Block, BlockTypeSize};
use super::position::{split_world, ChunkPos, LocalPos};

/// One horizontal slice of a template, indexed `[z][x]`.
pub type StructureLayer = Vec<Vec<BlockTypeSize>>;

type StaticTemplate = &'static [&'static [&'static [BlockTypeSize]]];

const TREE_TRUNK: &[&[BlockTypeSize]] = &[
    &[0, 0, 0, 0, 0],
    &[0, 0, 0, 0, 0],
    &[0, 0, 5, 0, 0],
    &[0, 0, 0, 0, 0],
    &[0, 0, 0, 0, 0],
];

const TREE_CANOPY: &[&[BlockTypeSize]] = &[
    &[0, 11, 11, 11, 0],
    &[11, 11, 11, 11, 11],
    &[11, 11, 5, 11, 11],
    &[11, 11, 11, 11, 11],
    &[0, 11, 11, 11, 0],
];

const TREE_CROWN: &[&[BlockTypeSize]] = &[
    &[0, 0, 0, 0, 0],
    &[0, 11, 11, 11, 0],
    &[0, 11, 5, 11, 0],
    &[0, 11, 11, 11, 0],
    &[0, 0, 0, 0, 0],
];

const TREE_TOP: &[&[BlockTypeSize]] = &[
    &[0, 0, 0, 0, 0],
    &[0, 0, 11, 0, 0],
    &[0, 11, 11, 11, 0],
    &[0, 0, 11, 0, 0],
    &[0, 0, 0, 0, 0],
];

const CACTUS_SEGMENT: &[&[BlockTypeSize]] = &[&[12]];

static STANDARD_STRUCTURES: phf::Map<&'static str, StaticTemplate> = phf_map! {
    "tree" => &[TREE_TRUNK, TREE_TRUNK, TREE_TRUNK, TREE_CANOPY, TREE_CANOPY, TREE_CROWN, TREE_TOP],
    "cactus" => &[CACTUS_SEGMENT, CACTUS_SEGMENT, CACTUS_SEGMENT],
};

/// A single block write produced by stamping, already resolved to its owning chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampWrite {
    /// Chunk owning the written block.
    pub chunk: ChunkPos,
    /// Position inside that chunk.
    pub local: LocalPos,
    /// Block to write.
    pub block: Block,
}

/// A named block template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    name: String,
    layers: Vec<StructureLayer>,
}

impl Structure {
    /// Creates a template from its layers, bottom layer first.
    pub fn new(name: impl Into<String>, layers: Vec<StructureLayer>) -> Self {
        Self {
            name: name.into(),
            layers,
        }
    }

    fn from_static(name: &str, template: StaticTemplate) -> Self {
        let layers = template
            .iter()
            .map(|layer| layer.iter().map(|row| row.to_vec()).collect())
            .collect();
        Self::new(name, layers)
    }

    /// Template name, as used for catalog lookups.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The template's layers, bottom first.
    pub fn layers(&self) -> &[StructureLayer] {
        &self.layers
    }

    /// Every non-empty cell as an offset from the anchor, in layer, row, column order.
    pub fn cells(&self) -> impl Iterator<Item = (Vector3<i32>, Block)> + '_ {
        self.layers.iter().enumerate().flat_map(|(y, layer)| {
            layer.iter().enumerate().flat_map(move |(z, row)| {
                row.iter().enumerate().filter_map(move |(x, &id)| {
                    (id != 0).then(|| (Vector3::new(x as i32, y as i32, z as i32), Block::from_id(id)))
                })
            })
        })
    }

    /// Resolves every non-empty cell of this template, anchored at world position `base`, to
    /// its owning chunk.
    ///
    /// Chunk ownership uses floor division, so cells at negative coordinates land in the chunk
    /// below zero rather than in chunk zero. Cells above or below the world are dropped.
    pub fn stamp(&self, base: Point3<i32>) -> impl Iterator<Item = StampWrite> + '_ {
        self.cells().filter_map(move |(offset, block)| {
            let (chunk, local) = split_world(base + offset)?;
            Some(StampWrite {
                chunk,
                local,
                block,
            })
        })
    }
}

/// Registry of structure templates by name.
#[derive(Debug, Clone, Default)]
pub struct StructureCatalog {
    structures: HashMap<String, Structure>,
}

impl StructureCatalog {
    /// A catalog with no templates. Every feature lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard `tree` and `cactus` templates.
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        for (name, template) in STANDARD_STRUCTURES.entries() {
            catalog.register(Structure::from_static(name, template));
        }
        catalog
    }

    /// Adds a template, replacing any existing one with the same name.
    pub fn register(&mut self, structure: Structure) {
        self.structures.insert(structure.name.clone(), structure);
    }

    /// Looks up a template by name.
    pub fn get(&self, name: &str) -> Option<&Structure> {
        self.structures.get(name)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Whether no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
