#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! Procedural generation, streaming and meshing of a block world for a first-person
//! exploration game.
//!
//! The crate owns everything between a world seed and a set of per-chunk vertex buffers:
//! noise sampling, biome blending, chunk lifecycle around a moving viewpoint,
//! neighbour-aware meshing, cross-chunk structure placement and ray-based block edits.
//! Windowing, the GPU backend and camera movement live outside and talk to the world through
//! plain positions, directions and float buffers.
//!
//! ## Key Modules
//!
//! * `options` - World options read once at startup
//! * `voxels` - Blocks, chunks, terrain generation, the world and block interaction
//! * `rendering` - Vertex layout and quad meshes handed to the renderer
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cgmath::{Point3, Vector3};
//! use voxel_world::{options::WorldOptions, voxels::world::World};
//!
//! let options = WorldOptions::default();
//! let mut world = World::standard(&options);
//! world.generate_chunks(options.initial_radius);
//!
//! // Once per frame
//! world.update(Point3::new(8.0, 60.0, 8.0));
//! let _looked_at = world.looked_at_block(Point3::new(8.0, 60.0, 8.0), Vector3::new(0.0, -1.0, 0.0));
//! ```
//!
//! ## Execution Model
//!
//! Everything runs on the caller's thread. Streaming generates at most one chunk per
//! [`voxels::world::World::update`] call, and every mesh rebuild completes before the call
//! that triggered it returns, so a renderer never observes a chunk whose blocks and mesh
//! disagree.

use cgmath::{Point3, Vector3};
use log::info;
use web_time::Instant;

use options::WorldOptions;
use voxels::position::ChunkPos;
use voxels::world::World;

pub mod options;
pub mod rendering;
pub mod voxels;

/// Default location of the options file read by [`run`].
pub const OPTIONS_PATH: &str = "options.json";

/// Number of simulated frames the headless driver walks the viewpoint for.
const DEMO_FRAMES: usize = 600;

/// Distance the viewpoint moves along +X each simulated frame.
const DEMO_STEP: f32 = 0.5;

/// Runs the headless world driver.
///
/// Initializes logging, loads [`OPTIONS_PATH`], bootstraps the starting area and then walks a
/// viewpoint across the world, calling the streaming update once per simulated frame the way a
/// game loop would.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let options = WorldOptions::load_or_default(OPTIONS_PATH);
    let mut world = World::standard(&options);

    let stopwatch = Instant::now();
    world.generate_chunks(options.initial_radius);
    info!(
        "Bootstrapped {} chunks in {:?}",
        world.chunk_count(),
        stopwatch.elapsed()
    );

    let spawn_height = world
        .chunk(ChunkPos::new(0, 0))
        .and_then(|chunk| chunk.top_solid_y(0, 0))
        .map_or(60.0, |top| top as f32 + 2.5);
    let mut viewpoint = Point3::new(0.5, spawn_height, 0.5);
    let stopwatch = Instant::now();
    for _ in 0..DEMO_FRAMES {
        viewpoint.x += DEMO_STEP;
        world.update(viewpoint);
    }
    info!(
        "Walked to {:?} in {:?}: {} chunks loaded, {} pending, {} deferred placements",
        viewpoint,
        stopwatch.elapsed(),
        world.chunk_count(),
        world.pending_loads(),
        world.ledger().len()
    );

    match world.looked_at_block(viewpoint, Vector3::new(0.0, -1.0, 0.0)) {
        Some(looked_at) => info!(
            "Looking at: {} at {:?} ({:?} face)",
            looked_at.name.unwrap_or("unknown"),
            looked_at.world_position,
            looked_at.face
        ),
        None => info!("Looking at: nothing"),
    }
}
