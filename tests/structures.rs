//! # Structure Placement Tests
//!
//! Structures that straddle chunk borders are written once, whether their target chunks are
//! loaded now or later.

use cgmath::Point3;
use voxel_world::options::WorldOptions;
use voxel_world::voxels::position::ChunkPos;
use voxel_world::voxels::structure::StampWrite;
use voxel_world::voxels::world::World;

fn tree_writes(world: &World, base: Point3<i32>) -> Vec<StampWrite> {
    world
        .generator()
        .structures()
        .get("tree")
        .expect("tree is a standard structure")
        .stamp(base)
        .collect()
}

/// Test: a tree half in a loaded chunk and half in an unloaded one is deferred, then replayed
/// exactly once.
#[test]
fn test_straddling_tree_is_deferred_then_replayed_once() {
    let mut world = World::standard(&WorldOptions::default());
    world.generate_chunks(0);
    let loaded = ChunkPos::new(0, 0);
    let unloaded = ChunkPos::new(1, 0);

    // The tree spans world x 13..=17: three columns in chunk (0, 0), two in chunk (1, 0).
    let base = Point3::new(13, 140, 5);
    let writes = tree_writes(&world, base);

    assert!(world.place_structure("tree", base));

    let (direct, deferred): (Vec<StampWrite>, Vec<StampWrite>) =
        writes.into_iter().partition(|write| write.chunk == loaded);
    assert!(!direct.is_empty());
    assert!(!deferred.is_empty());
    assert!(deferred.iter().all(|write| write.chunk == unloaded));
    for write in &direct {
        let chunk = world.chunk(loaded).unwrap();
        assert_eq!(chunk.block(write.local), write.block);
    }

    for write in &deferred {
        assert_eq!(world.ledger().pending_at(unloaded, write.local), Some(write.block));
    }

    assert!(world.load_chunk(unloaded));
    assert_eq!(world.ledger().pending_count(unloaded), 0);
    for write in &deferred {
        assert_eq!(world.chunk(unloaded).unwrap().block(write.local), write.block);
    }

    // Reloading regenerates bare terrain; nothing is replayed a second time.
    assert!(world.unload_chunk(unloaded));
    assert!(world.load_chunk(unloaded));
    assert_eq!(world.ledger().pending_count(unloaded), 0);
    let fresh = world.generator().generate(unloaded).chunk;
    assert_eq!(world.chunk(unloaded).unwrap().as_bytes(), fresh.as_bytes());
}

/// Test: every cell of a structure lands where its offset says, including around the origin
/// where chunk coordinates turn negative.
#[test]
fn test_structure_cells_land_at_offsets() {
    let mut world = World::standard(&WorldOptions::default());
    world.generate_chunks(2);
    let mut rng = fastrand::Rng::with_seed(99);

    let mut bases = vec![Point3::new(-2, 150, -2), Point3::new(-17, 150, 14)];
    for _ in 0..10 {
        bases.push(Point3::new(rng.i32(-30..26), rng.i32(60..200), rng.i32(-30..26)));
    }

    for base in bases {
        assert!(world.place_structure("cactus", base));
        assert!(world.place_structure("tree", base));
        let tree = world.generator().structures().get("tree").unwrap();
        for (offset, block) in tree.cells() {
            assert_eq!(world.get_block(base + offset), Some(block), "{:?} + {:?}", base, offset);
        }
    }
}

/// Test: one placement remeshes each chunk it touches exactly once.
#[test]
fn test_placement_remeshes_each_chunk_once() {
    let mut world = World::standard(&WorldOptions::default());
    world.generate_chunks(2);
    let revision = |world: &World, position: ChunkPos| world.chunk(position).unwrap().mesh_revision();
    let touched = [ChunkPos::new(0, 0), ChunkPos::new(1, 0)];
    let untouched = ChunkPos::new(0, 1);
    let before: Vec<u32> = touched.iter().map(|position| revision(&world, *position)).collect();
    let untouched_before = revision(&world, untouched);

    assert!(world.place_structure("tree", Point3::new(13, 150, 5)));

    for (position, old) in touched.iter().zip(before) {
        assert_eq!(revision(&world, *position), old + 1, "{:?}", position);
    }
    assert_eq!(revision(&world, untouched), untouched_before);
}

/// Test: an unknown structure name changes nothing.
#[test]
fn test_unknown_structure_is_ignored() {
    let mut world = World::standard(&WorldOptions::default());
    world.generate_chunks(1);
    let pending = world.ledger().len();
    assert!(!world.place_structure("obelisk", Point3::new(0, 100, 0)));
    assert_eq!(world.ledger().len(), pending);
}
