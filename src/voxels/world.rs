//! # World Module
//!
//! This module provides the `World` struct which owns every loaded chunk in the voxel world.
//! It serves as the central coordinator for chunk generation, streaming, meshing and
//! cross-chunk structure placement.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where only chunks within the streaming radius of
//! the player are kept in memory. Chunks are owned by value in a position-keyed map; nothing
//! else holds on to them, and the map entry going away is the end of the chunk.
//!
//! ## Streaming
//!
//! - A player entering a new chunk evicts everything beyond the streaming radius and replaces
//!   the load queue with the missing positions, nearest first
//! - Every [`World::update`] generates at most one queued chunk, then remeshes it and its
//!   four neighbours
//! - [`World::generate_chunks`] loads a whole square up front before streaming begins
//!
//! ## Structure Placement
//!
//! Structure cells landing in a loaded chunk are written straight into it; cells for chunks
//! that do not exist yet go into the [`DeferredPlacementLedger`] and are replayed when that
//! chunk is generated. Every chunk touched by one placement is remeshed once afterwards.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info};
use web_time::Instant;

use super::block::catalog::BlockCatalog;
use super::chunk::chunk_terrain::{GeneratedChunk, TerrainGenerator};
use super::chunk::{Chunk, ChunkNeighbors};
use super::ledger::DeferredPlacementLedger;
use super::position::ChunkPos;
use super::structure::{StampWrite, StructureCatalog};
use crate::options::WorldOptions;

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use voxel_world::options::WorldOptions;
/// use voxel_world::voxels::{position::ChunkPos, world::World};
///
/// let options = WorldOptions::default();
/// let mut world = World::standard(&options);
/// world.generate_chunks(1);
///
/// assert_eq!(world.chunk_count(), 9);
/// assert!(world.chunk(ChunkPos::new(-1, 1)).is_some());
/// ```
pub struct World {
    chunks: HashMap<ChunkPos, Chunk>,
    generator: TerrainGenerator,
    blocks: Arc<BlockCatalog>,
    ledger: DeferredPlacementLedger,
    last_player_chunk: Option<ChunkPos>,
    load_queue: VecDeque<ChunkPos>,
    streaming_radius: i32,
    reach: f32,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `options` - Seed, streaming radius and reach
    /// * `blocks` - Block descriptors used when meshing
    /// * `structures` - Templates used for biome features and [`World::place_structure`]
    ///
    /// # Returns
    /// A new `World` instance with no chunks loaded.
    pub fn new(
        options: &WorldOptions,
        blocks: Arc<BlockCatalog>,
        structures: Arc<StructureCatalog>,
    ) -> Self {
        World {
            chunks: HashMap::new(),
            generator: TerrainGenerator::new(options.world_seed, structures),
            blocks,
            ledger: DeferredPlacementLedger::new(),
            last_player_chunk: None,
            load_queue: VecDeque::new(),
            streaming_radius: options.streaming_radius(),
            reach: options.reach,
        }
    }

    /// Creates a new, empty world using the standard block and structure catalogs.
    pub fn standard(options: &WorldOptions) -> Self {
        Self::new(
            options,
            Arc::new(BlockCatalog::standard()),
            Arc::new(StructureCatalog::standard()),
        )
    }

    /// Loads every chunk in the square of `radius` around the origin chunk, then meshes
    /// every loaded chunk.
    ///
    /// Chunks that are already loaded are kept as they are.
    pub fn generate_chunks(&mut self, radius: i32) {
        self.generate_chunks_around(ChunkPos::new(0, 0), radius);
    }

    /// Loads every chunk in the square of `radius` around `center`, then meshes every loaded
    /// chunk.
    pub fn generate_chunks_around(&mut self, center: ChunkPos, radius: i32) {
        let stopwatch = Instant::now();
        let mut generated = 0;
        for x in -radius..=radius {
            for z in -radius..=radius {
                let position = center.offset(x, z);
                if !self.chunks.contains_key(&position) {
                    self.construct_chunk(position);
                    generated += 1;
                }
            }
        }

        let mut positions: Vec<ChunkPos> = self.chunks.keys().copied().collect();
        positions.sort();
        let meshed = positions
            .into_iter()
            .filter(|position| self.build_chunk_mesh(*position))
            .count();

        info!(
            "Generated {} chunks around {:?} ({} meshed) in {:?}",
            generated,
            center,
            meshed,
            stopwatch.elapsed()
        );
    }

    /// Advances streaming by one step for the player at `player`.
    ///
    /// When the player has entered a different chunk since the last call, chunks beyond the
    /// streaming radius are evicted and the load queue is replaced by the missing positions
    /// inside it, nearest first. Then at most one queued position is loaded.
    ///
    /// # Returns
    /// The chunk generated by this call, if any.
    pub fn update(&mut self, player: Point3<f32>) -> Option<ChunkPos> {
        let player_chunk = ChunkPos::containing_point(player);
        if self.last_player_chunk != Some(player_chunk) {
            self.last_player_chunk = Some(player_chunk);
            self.reschedule(player_chunk);
        }

        let position = self.load_queue.pop_front()?;
        self.load_chunk(position).then_some(position)
    }

    /// Evicts chunks out of range of `center` and rebuilds the load queue around it.
    fn reschedule(&mut self, center: ChunkPos) {
        let radius = self.streaming_radius;

        let before = self.chunks.len();
        self.chunks
            .retain(|position, _| position.chebyshev_distance(center) <= radius);
        let evicted = before - self.chunks.len();

        let mut missing: Vec<ChunkPos> = (-radius..=radius)
            .flat_map(|x| (-radius..=radius).map(move |z| center.offset(x, z)))
            .filter(|position| !self.chunks.contains_key(position))
            .collect();
        missing.sort_by_key(|position| position.distance_squared(center));

        info!(
            "Player entered chunk {:?}: evicted {}, queued {}",
            center,
            evicted,
            missing.len()
        );
        self.load_queue = missing.into();
    }

    /// Generates the chunk at `position` if it is not loaded, then meshes it and its four
    /// horizontal neighbours.
    ///
    /// # Returns
    /// `true` if a chunk was generated, `false` if one was already loaded there.
    pub fn load_chunk(&mut self, position: ChunkPos) -> bool {
        if self.chunks.contains_key(&position) {
            return false;
        }

        self.construct_chunk(position);
        self.build_chunk_mesh(position);
        for neighbor in position.horizontal_neighbors() {
            self.build_chunk_mesh(neighbor);
        }
        true
    }

    /// Drops the chunk at `position`, along with any edits made to it.
    ///
    /// Neighbours keep their meshes. Ledger entries already replayed into the chunk are not
    /// restored, so loading it again gives the bare generated terrain.
    ///
    /// # Returns
    /// `true` if a chunk was loaded there.
    pub fn unload_chunk(&mut self, position: ChunkPos) -> bool {
        let removed = self.chunks.remove(&position).is_some();
        if removed {
            debug!("Unloaded chunk {:?}", position);
        }
        removed
    }

    /// Generates a chunk, routes its out-of-chunk features, replays its ledger entries and
    /// inserts it. The new chunk is only meshed here if ledger entries were applied.
    fn construct_chunk(&mut self, position: ChunkPos) {
        let stopwatch = Instant::now();
        let GeneratedChunk { mut chunk, spill } = self.generator.generate(position);

        let replayed = self.ledger.take(position);
        for placement in &replayed {
            chunk.set_block(placement.local, placement.block);
        }

        debug!(
            "Generated chunk {:?} ({:?}) in {:?}: {} replayed, {} spilled",
            position,
            chunk.biome(),
            stopwatch.elapsed(),
            replayed.len(),
            spill.len()
        );

        self.chunks.insert(position, chunk);
        self.apply_writes(spill);

        if !replayed.is_empty() {
            self.build_chunk_mesh(position);
        }
    }

    /// Writes resolved structure cells into loaded chunks, defers the rest, then remeshes
    /// every chunk that changed exactly once.
    ///
    /// # Returns
    /// The loaded chunks that received at least one block.
    fn apply_writes(&mut self, writes: impl IntoIterator<Item = StampWrite>) -> BTreeSet<ChunkPos> {
        let mut affected = BTreeSet::new();
        let mut deferred = 0;
        for write in writes {
            match self.chunks.get_mut(&write.chunk) {
                Some(chunk) => {
                    chunk.set_block(write.local, write.block);
                    affected.insert(write.chunk);
                }
                None => {
                    self.ledger.defer(write.chunk, write.local, write.block);
                    deferred += 1;
                }
            }
        }

        if deferred > 0 {
            debug!(
                "Deferred {} placements, {} chunks waiting",
                deferred,
                self.ledger.chunk_count()
            );
        }

        for position in &affected {
            self.build_chunk_mesh(*position);
        }
        affected
    }

    /// Stamps a named structure with its anchor at world position `base`.
    ///
    /// Cells in loaded chunks are written immediately; cells in unloaded chunks are replayed
    /// when those chunks are generated. Cells above or below the world are dropped.
    ///
    /// # Returns
    /// `false` if no structure has that name.
    pub fn place_structure(&mut self, name: &str, base: Point3<i32>) -> bool {
        let Some(structure) = self.generator.structures().get(name) else {
            debug!("No structure named {:?}", name);
            return false;
        };
        let writes: Vec<StampWrite> = structure.stamp(base).collect();
        self.apply_writes(writes);
        true
    }

    /// Rebuilds the mesh of the chunk at `position`.
    ///
    /// # Returns
    /// `true` if the mesh was replaced. `false` if the chunk is not loaded or any of its four
    /// horizontal neighbours is missing, in which case its mesh is left untouched.
    pub fn build_chunk_mesh(&mut self, position: ChunkPos) -> bool {
        let Some(chunk) = self.chunks.get(&position) else {
            return false;
        };
        let Some(mesh) = chunk.build_mesh(&self.chunks, &self.blocks) else {
            return false;
        };
        match self.chunks.get_mut(&position) {
            Some(chunk) => {
                chunk.replace_mesh(mesh);
                true
            }
            None => false,
        }
    }

    /// The loaded chunk at `position`.
    pub fn chunk(&self, position: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    pub(crate) fn chunk_mut(&mut self, position: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// Every loaded chunk, in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether a chunk is loaded at `position`.
    pub fn is_loaded(&self, position: ChunkPos) -> bool {
        self.chunks.contains_key(&position)
    }

    /// Number of positions waiting in the load queue.
    pub fn pending_loads(&self) -> usize {
        self.load_queue.len()
    }

    /// The queued positions, next load first.
    pub fn load_queue(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.load_queue.iter().copied()
    }

    /// Structure writes waiting for their chunks.
    pub fn ledger(&self) -> &DeferredPlacementLedger {
        &self.ledger
    }

    /// The terrain generator this world loads chunks with.
    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Block descriptors used for meshing and look-at names.
    pub fn block_catalog(&self) -> &BlockCatalog {
        &self.blocks
    }

    /// The chunk the player was in at the last [`World::update`].
    pub fn last_player_chunk(&self) -> Option<ChunkPos> {
        self.last_player_chunk
    }

    /// Chebyshev radius, in chunks, kept loaded around the player.
    pub fn streaming_radius(&self) -> i32 {
        self.streaming_radius
    }

    /// Maximum raycast distance for interaction and look-at queries.
    pub fn reach(&self) -> f32 {
        self.reach
    }
}

impl ChunkNeighbors for World {
    fn chunk_at(&self, position: ChunkPos) -> Option<&Chunk> {
        self.chunk(position)
    }
}
