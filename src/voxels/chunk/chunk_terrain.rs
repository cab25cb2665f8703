//! # Chunk Terrain
//!
//! Deterministic terrain generation. A chunk is a pure function of its position, the world's
//! [`NoiseContext`] and the structure catalog: the same inputs always give the same grid.
//!
//! ## Pipeline
//! 1. Sample biome and raw height for every column of the chunk plus a
//!    [`BLEND_RADIUS`]-wide apron around it.
//! 2. For each column whose neighbourhood mixes biomes, replace height and biome with an
//!    inverse-distance-squared weighted average over that neighbourhood.
//! 3. Fill the column: bedrock floor, stone, near-surface layers, surface, then water up to
//!    [`SEA_LEVEL`].
//! 4. Grow the chunk biome's features, keeping writes that land in this chunk and handing
//!    the rest back as spill.

use std::sync::Arc;

use cgmath::Vector3;

use super::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::voxels::biome::Biome;
use crate::voxels::block::{block_type::BlockType, Block};
use crate::voxels::noise_context::NoiseContext;
use crate::voxels::position::{ChunkPos, LocalPos};
use crate::voxels::structure::{StampWrite, StructureCatalog};

/// Columns below this height are flooded up to it.
pub const SEA_LEVEL: i32 = 37;

/// Half-width of the square neighbourhood biome blending looks at.
pub const BLEND_RADIUS: i32 = 5;

/// Final biome and surface height of one world column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSample {
    /// Biome after blending. Decides the surface blocks.
    pub biome: Biome,
    /// Y of the surface block.
    pub height: i32,
}

/// A freshly generated chunk and the feature writes that fell outside it.
#[derive(Debug)]
pub struct GeneratedChunk {
    /// The generated chunk, features inside it already applied. Its mesh is empty.
    pub chunk: Chunk,
    /// Feature blocks owned by other chunks, in the order they were stamped.
    pub spill: Vec<StampWrite>,
}

/// Unblended biome and height for a rectangle of columns.
struct BlendGrid {
    min_x: i32,
    min_z: i32,
    depth: i32,
    biomes: Vec<Biome>,
    heights: Vec<f64>,
}

impl BlendGrid {
    /// Samples the rectangle `[min_x, min_x + width) x [min_z, min_z + depth)` grown by the
    /// blend radius on every side.
    fn sample(noise: &NoiseContext, min_x: i32, min_z: i32, width: i32, depth: i32) -> Self {
        let min_x = min_x - BLEND_RADIUS;
        let min_z = min_z - BLEND_RADIUS;
        let width = width + 2 * BLEND_RADIUS;
        let depth = depth + 2 * BLEND_RADIUS;

        let mut biomes = Vec::with_capacity((width * depth) as usize);
        let mut heights = Vec::with_capacity((width * depth) as usize);
        for x in min_x..min_x + width {
            for z in min_z..min_z + depth {
                let biome = noise.distorted_biome(x, z);
                biomes.push(biome);
                heights.push(raw_height(noise, biome, x, z));
            }
        }

        BlendGrid {
            min_x,
            min_z,
            depth,
            biomes,
            heights,
        }
    }

    fn index(&self, world_x: i32, world_z: i32) -> usize {
        ((world_x - self.min_x) * self.depth + (world_z - self.min_z)) as usize
    }

    /// Blended sample for a column at least [`BLEND_RADIUS`] inside the grid.
    fn column(&self, world_x: i32, world_z: i32) -> ColumnSample {
        let center = self.index(world_x, world_z);
        let center_biome = self.biomes[center];

        let neighbourhood = || {
            (-BLEND_RADIUS..=BLEND_RADIUS)
                .flat_map(|dx| (-BLEND_RADIUS..=BLEND_RADIUS).map(move |dz| (dx, dz)))
        };

        let mixed = neighbourhood()
            .any(|(dx, dz)| self.biomes[self.index(world_x + dx, world_z + dz)] != center_biome);
        if !mixed {
            return ColumnSample {
                biome: center_biome,
                height: self.heights[center] as i32,
            };
        }

        let mut biome_weights = [0.0f64; Biome::ALL.len()];
        let mut total_weight = 0.0;
        let mut blended_height = 0.0;
        for (dx, dz) in neighbourhood() {
            let weight = 1.0 / ((dx * dx + dz * dz) as f64 + 1.0);
            let index = self.index(world_x + dx, world_z + dz);
            biome_weights[self.biomes[index] as usize] += weight;
            blended_height += self.heights[index] * weight;
            total_weight += weight;
        }
        blended_height /= total_weight;

        let mut biome = center_biome;
        let mut max_weight = -1.0;
        for candidate in Biome::ALL {
            if biome_weights[candidate as usize] > max_weight {
                max_weight = biome_weights[candidate as usize];
                biome = candidate;
            }
        }

        ColumnSample {
            biome,
            height: blended_height as i32,
        }
    }
}

/// Unblended column height for a biome.
fn raw_height(noise: &NoiseContext, biome: Biome, world_x: i32, world_z: i32) -> f64 {
    let params = biome.params();
    let (x, z) = (world_x as f64, world_z as f64);
    let base = noise.base.sample_unit(x, z);
    let detail = noise.detail.sample_unit(x, z);
    let detail2 = noise.detail2.sample_unit(x, z);

    let combined = base + detail * params.detail_weight + detail2 * 0.2;
    combined.powf(params.power) * 24.0 * params.height_scale + params.base_height
}

/// Generates chunks for one world seed.
#[derive(Debug)]
pub struct TerrainGenerator {
    noise: NoiseContext,
    structures: Arc<StructureCatalog>,
}

impl TerrainGenerator {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `seed` - World seed all noise samplers derive from
    /// * `structures` - Templates biome features are stamped from
    pub fn new(seed: u32, structures: Arc<StructureCatalog>) -> Self {
        TerrainGenerator {
            noise: NoiseContext::new(seed),
            structures,
        }
    }

    /// The noise samplers this generator reads.
    pub fn noise(&self) -> &NoiseContext {
        &self.noise
    }

    /// The structure templates features are stamped from.
    pub fn structures(&self) -> &StructureCatalog {
        &self.structures
    }

    /// Blended biome and surface height of a single world column.
    ///
    /// Gives the same answer [`generate`](Self::generate) uses for that column.
    pub fn sample_column(&self, world_x: i32, world_z: i32) -> ColumnSample {
        BlendGrid::sample(&self.noise, world_x, world_z, 1, 1).column(world_x, world_z)
    }

    /// Terrain surface height of a world column, ignoring features.
    pub fn surface_height(&self, world_x: i32, world_z: i32) -> i32 {
        self.sample_column(world_x, world_z).height
    }

    /// Generates the chunk at `position`.
    ///
    /// # Returns
    /// The chunk with terrain and its own features filled in, plus feature blocks that
    /// belong to other chunks. Nothing outside the returned value is touched.
    pub fn generate(&self, position: ChunkPos) -> GeneratedChunk {
        let mut chunk = Chunk::empty(position);
        let origin = position.world_origin();

        let grid = BlendGrid::sample(&self.noise, origin.x, origin.z, CHUNK_WIDTH, CHUNK_DEPTH);
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_DEPTH {
                let column = grid.column(origin.x + x, origin.z + z);
                Self::fill_column(&mut chunk, x as usize, z as usize, column);
            }
        }

        chunk.set_biome(self.noise.distorted_biome(origin.x, origin.z));
        let spill = self.grow_features(&mut chunk);

        GeneratedChunk { chunk, spill }
    }

    fn fill_column(chunk: &mut Chunk, x: usize, z: usize, column: ColumnSample) {
        for y in 0..CHUNK_HEIGHT {
            let block = if y == 0 {
                Block::new(BlockType::BEDROCK)
            } else if y > column.height {
                if y < SEA_LEVEL {
                    Block::new(BlockType::WATER)
                } else {
                    continue;
                }
            } else {
                column.biome.layer_block(column.height - y)
            };
            chunk.set_block(LocalPos::new(x, y as usize, z), block);
        }
    }

    /// Stamps the chunk biome's structure on every column whose feature noise clears the
    /// threshold and whose top block is plantable.
    ///
    /// Columns are visited x-major, and a column sees blocks stamped by earlier ones, so a
    /// canopy covering a grass column keeps another tree from growing there.
    fn grow_features(&self, chunk: &mut Chunk) -> Vec<StampWrite> {
        let rule = chunk.biome().feature_rule();
        let Some(structure) = self.structures.get(rule.structure) else {
            return Vec::new();
        };

        let origin = chunk.position.world_origin();
        let mut spill = Vec::new();
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_DEPTH {
                if self.noise.feature(origin.x + x, origin.z + z) <= rule.threshold {
                    continue;
                }

                let mut y = CHUNK_HEIGHT - 2;
                while y > 0 && chunk.get(x, y, z).is_some_and(|block| block.is_air()) {
                    y -= 1;
                }
                if chunk.get(x, y, z).and_then(|block| block.kind()) != Some(rule.plantable) {
                    continue;
                }

                let base = origin + Vector3::new(x - rule.offset.0, y + 1, z - rule.offset.1);
                for write in structure.stamp(base) {
                    if write.chunk == chunk.position {
                        chunk.set_block(write.local, write.block);
                    } else {
                        spill.push(write);
                    }
                }
            }
        }
        spill
    }
}
