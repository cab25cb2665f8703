//! # Streaming Tests
//!
//! The per-frame update loads at most one chunk, never reloads a loaded one, and throws away
//! stale work when the player changes chunk.

use std::collections::HashSet;

use cgmath::Point3;
use voxel_world::options::WorldOptions;
use voxel_world::voxels::block::{block_type::BlockType, Block};
use voxel_world::voxels::position::ChunkPos;
use voxel_world::voxels::world::World;

fn world_with_render_distance(render_distance: i32) -> World {
    let options = WorldOptions {
        render_distance,
        ..WorldOptions::default()
    };
    World::standard(&options)
}

/// Test: a standing player gets one chunk per update until the square is full.
#[test]
fn test_update_is_idempotent_for_unchanged_chunk() {
    let mut world = world_with_render_distance(1);
    let player = Point3::new(7.5, 90.0, 7.5);
    let mut seen = HashSet::new();

    for call in 0..40 {
        let before = world.chunk_count();
        let loaded = world.update(player);
        assert!(world.chunk_count() <= before + 1, "call {}", call);
        if let Some(position) = loaded {
            assert!(seen.insert(position), "{:?} loaded twice", position);
            assert_eq!(world.chunk_count(), before + 1);
        }
    }

    // Streaming radius is render distance + 1: a 5x5 square.
    assert_eq!(seen.len(), 25);
    assert_eq!(world.chunk_count(), 25);
    assert_eq!(world.pending_loads(), 0);
    assert_eq!(world.update(player), None);
}

/// Test: edits survive later updates because loaded chunks are never regenerated.
#[test]
fn test_loaded_chunks_are_not_regenerated() {
    let mut world = world_with_render_distance(1);
    let player = Point3::new(1.0, 90.0, 1.0);
    world.update(player);

    let marker = Point3::new(3, 200, 3);
    assert!(world.set_block(marker, Block::new(BlockType::BRICKS)));
    for _ in 0..30 {
        world.update(player);
    }
    assert_eq!(world.get_block(marker), Some(Block::new(BlockType::BRICKS)));
}

/// Test: bootstrap loads the square up front, and streaming only fills in the rest.
#[test]
fn test_bootstrap_then_stream() {
    let mut world = world_with_render_distance(1);
    world.generate_chunks(1);
    assert_eq!(world.chunk_count(), 9);

    world.update(Point3::new(0.0, 90.0, 0.0));
    // 25 in range, 9 already there, one loaded by this update.
    assert_eq!(world.pending_loads(), 15);
    assert!(world.load_queue().all(|position| position.chebyshev_distance(ChunkPos::new(0, 0)) == 2));

    while world.pending_loads() > 0 {
        world.update(Point3::new(0.0, 90.0, 0.0));
    }
    assert_eq!(world.chunk_count(), 25);

    // Chunks with all four neighbours loaded carry geometry; the outer ring does not.
    for chunk in world.chunks() {
        let ring = chunk.position.chebyshev_distance(ChunkPos::new(0, 0));
        if ring <= 1 {
            assert!(!chunk.mesh().is_empty(), "{:?}", chunk.position);
        } else {
            assert!(chunk.mesh().is_empty(), "{:?}", chunk.position);
        }
    }
}

/// Test: moving to a new chunk evicts far chunks and replaces the queue.
#[test]
fn test_chunk_change_replaces_queue() {
    let mut world = world_with_render_distance(2);
    let start = Point3::new(8.0, 90.0, 8.0);
    for _ in 0..5 {
        world.update(start);
    }
    assert!(world.pending_loads() > 0);

    let destination = Point3::new(-10.0 * 16.0 + 8.0, 90.0, 8.0);
    let center = ChunkPos::containing_point(destination);
    world.update(destination);

    assert_eq!(world.last_player_chunk(), Some(center));
    assert!(world
        .chunks()
        .all(|chunk| chunk.position.chebyshev_distance(center) <= world.streaming_radius()));
    assert!(world
        .load_queue()
        .all(|position| position.chebyshev_distance(center) <= world.streaming_radius()));

    let distances: Vec<i32> = world
        .load_queue()
        .map(|position| position.distance_squared(center))
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
}

/// Test: walking across chunks keeps the loaded set bounded.
#[test]
fn test_walk_keeps_loaded_set_bounded() {
    let mut world = world_with_render_distance(1);
    let mut player = Point3::new(0.5, 90.0, 0.5);
    for _ in 0..200 {
        player.x += 0.75;
        player.z -= 0.25;
        world.update(player);
        assert!(world.chunk_count() <= 25);
    }
}

/// Test: walking back and forth between two areas leaves the ledger the same size.
#[test]
fn test_revisiting_an_area_keeps_ledger_flat() {
    let mut world = world_with_render_distance(1);
    let home = Point3::new(8.0, 90.0, 8.0);
    let away = Point3::new(10.0 * 16.0 + 8.0, 90.0, 8.0);

    let mut sizes = Vec::new();
    for player in [home, away, home, away, home] {
        world.update(player);
        while world.pending_loads() > 0 {
            world.update(player);
        }
        sizes.push(world.ledger().len());
    }

    // The first visit to each area fills the ledger; returning adds nothing.
    assert_eq!(sizes[1], sizes[2], "{:?}", sizes);
    assert_eq!(sizes[2], sizes[3], "{:?}", sizes);
    assert_eq!(sizes[3], sizes[4], "{:?}", sizes);
}
