//! # Voxel World Core
//!
//! This module contains the world subsystem: representing, generating, streaming and
//! editing a block world made of 16×256×16 chunk columns.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components, leaves first:
//!
//! * **Block**: Block ids, faces and the [`block::catalog::BlockCatalog`] of atlas descriptors
//! * **Structure**: Named multi-layer templates (trees, cacti) and their stamping arithmetic
//! * **Noise / Biome**: The seeded [`noise_context::NoiseContext`] and biome parameters
//! * **Chunk**: Fixed-size block grids, terrain generation and neighbour-aware meshing
//! * **Ledger**: Structure writes waiting for their target chunk to be generated
//! * **World**: Owns every chunk, streams them around the player and answers raycasts
//!
//! ## Data Flow
//!
//! 1. The world dequeues a chunk position and asks the terrain generator for its blocks
//! 2. Structure cells that fall outside the new chunk are written into loaded neighbours or
//!    deferred into the ledger
//! 3. Ledger entries addressed to the new chunk are replayed
//! 4. The chunk and its four horizontal neighbours rebuild their meshes
//!
//! ## Thread Safety
//!
//! None is needed. The world is driven from a single thread, one bounded step per frame.

pub mod biome;
pub mod block;
pub mod chunk;
pub mod interaction;
pub mod ledger;
pub mod noise_context;
pub mod position;
pub mod raycast;
pub mod structure;
pub mod world;
