//! # Raycast
//!
//! Voxel marching (DDA) through loaded chunks. The ray steps one cell boundary at a time,
//! always crossing the nearest boundary next, so every voxel it passes through is visited in
//! order and none is skipped.

use cgmath::{Point3, Vector3};

use super::block::{block_side::BlockSide, Block};
use super::position::{split_world, ChunkPos, LocalPos};
use super::world::World;

/// Default maximum distance, in world units, a ray travels.
pub const DEFAULT_REACH: f32 = 6.0;

/// A block inside a loaded chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTarget {
    /// The chunk holding the block.
    pub chunk: ChunkPos,
    /// Position inside that chunk.
    pub local: LocalPos,
}

impl BlockTarget {
    /// World position of the block.
    pub fn world_position(&self) -> Point3<i32> {
        self.chunk.to_world(self.local.to_point())
    }
}

/// The empty cell a ray passed through just before its hit, where a new block would go.
///
/// Its height is not checked, so it may lie just above or below the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTarget {
    /// The loaded chunk whose column contains the cell.
    pub chunk: ChunkPos,
    /// World position of the cell.
    pub world_position: Point3<i32>,
}

/// What a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaycastHit {
    /// The first non-air block along the ray.
    pub block: BlockTarget,
    /// The cell before the hit. `None` when the ray started inside the hit block or the
    /// previous cell's chunk is not loaded.
    pub placement: Option<PlacementTarget>,
    /// Step from the previous cell to the hit cell; the negated normal of the face the ray
    /// entered through. Zero when the ray started inside the hit block.
    pub face_normal: Vector3<i32>,
}

impl RaycastHit {
    /// The face of the hit block the ray entered through, `None` when the ray started inside
    /// the block.
    pub fn face(&self) -> Option<BlockSide> {
        BlockSide::from_normal(-self.face_normal)
    }
}

/// Per-axis march state.
fn axis_setup(origin: f32, voxel: i32, direction: f32) -> (i32, f32, f32) {
    if direction == 0.0 {
        return (0, f32::INFINITY, f32::INFINITY);
    }
    let step = if direction > 0.0 { 1 } else { -1 };
    let delta = (1.0 / direction).abs();
    let next_border = if step > 0 { voxel as f32 + 1.0 } else { voxel as f32 };
    (step, delta, (origin - next_border).abs() * delta)
}

impl World {
    /// Marches a ray through the loaded chunks.
    ///
    /// # Arguments
    /// * `origin` - Start of the ray in world space
    /// * `direction` - Direction of travel; expected to be normalized
    /// * `max_distance` - Distance after which marching gives up
    ///
    /// # Returns
    /// The first non-air block within `max_distance`, or `None`. Cells in unloaded chunks or
    /// outside the world's height are passed through.
    pub fn raycast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RaycastHit> {
        let mut voxel = Point3::new(
            origin.x.floor() as i32,
            origin.y.floor() as i32,
            origin.z.floor() as i32,
        );

        let mut step = Vector3::new(0, 0, 0);
        let mut delta = Vector3::new(0.0f32, 0.0, 0.0);
        let mut side = Vector3::new(0.0f32, 0.0, 0.0);
        for axis in 0..3 {
            let (axis_step, axis_delta, axis_side) =
                axis_setup(origin[axis], voxel[axis], direction[axis]);
            step[axis] = axis_step;
            delta[axis] = axis_delta;
            side[axis] = axis_side;
        }

        let mut traveled = 0.0;
        let mut previous = voxel;
        let mut previous_chunk: Option<ChunkPos> = None;

        while traveled < max_distance {
            let chunk_pos = ChunkPos::containing(voxel);
            let chunk = self.chunk(chunk_pos);

            if let (Some(chunk), Some((_, local))) = (chunk, split_world(voxel)) {
                if !chunk.block(local).is_air() {
                    return Some(RaycastHit {
                        block: BlockTarget {
                            chunk: chunk_pos,
                            local,
                        },
                        placement: previous_chunk.map(|chunk| PlacementTarget {
                            chunk,
                            world_position: previous,
                        }),
                        face_normal: voxel - previous,
                    });
                }
            }

            previous = voxel;
            previous_chunk = chunk.map(|_| chunk_pos);

            let axis = if side.x < side.y {
                if side.x < side.z {
                    0
                } else {
                    2
                }
            } else if side.y < side.z {
                1
            } else {
                2
            };

            side[axis] += delta[axis];
            voxel[axis] += step[axis];
            traveled = side[axis] - delta[axis];
        }

        None
    }

    /// The block at a raycast hit.
    pub fn hit_block(&self, hit: &RaycastHit) -> Option<Block> {
        self.chunk(hit.block.chunk).map(|chunk| chunk.block(hit.block.local))
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;
    use crate::options::WorldOptions;
    use crate::voxels::block::block_type::BlockType;

    fn loaded_world() -> World {
        let mut world = World::standard(&WorldOptions::default());
        world.generate_chunks(1);
        world
    }

    #[test]
    fn zero_direction_terminates() {
        let world = loaded_world();
        assert!(world.raycast(Point3::new(0.5, 200.0, 0.5), Vector3::new(0.0, 0.0, 0.0), 6.0).is_none());
    }

    #[test]
    fn straight_down_reports_top_face() {
        let mut world = loaded_world();
        let target = Point3::new(-5, 150, 9);
        assert!(world.set_block(target, Block::new(BlockType::BRICKS)));

        let hit = world
            .raycast(Point3::new(-4.5, 153.5, 9.5), Vector3::new(0.0, -1.0, 0.0), DEFAULT_REACH)
            .unwrap();
        assert_eq!(hit.block.world_position(), target);
        assert_eq!(hit.block.chunk, ChunkPos::new(-1, 0));
        assert_eq!(hit.face_normal, Vector3::new(0, -1, 0));
        assert_eq!(hit.face(), Some(BlockSide::TOP));
        assert_eq!(
            hit.placement,
            Some(PlacementTarget {
                chunk: ChunkPos::new(-1, 0),
                world_position: Point3::new(-5, 151, 9),
            })
        );
        assert_eq!(world.hit_block(&hit), Some(Block::new(BlockType::BRICKS)));
    }

    #[test]
    fn out_of_reach_misses() {
        let mut world = loaded_world();
        world.set_block(Point3::new(3, 150, 3), Block::new(BlockType::STONE));
        let origin = Point3::new(3.5, 157.5, 3.5);
        assert!(world.raycast(origin, Vector3::new(0.0, -1.0, 0.0), DEFAULT_REACH).is_none());
        assert!(world.raycast(origin, Vector3::new(0.0, -1.0, 0.0), 8.0).is_some());
    }

    #[test]
    fn horizontal_ray_crosses_chunk_border() {
        let mut world = loaded_world();
        let target = Point3::new(17, 200, 1);
        world.set_block(target, Block::new(BlockType::GRAVEL));
        let origin = Point3::new(14.5, 200.5, 1.5);
        let direction = (Point3::new(17.5, 200.5, 1.5) - origin).normalize();

        let hit = world.raycast(origin, direction, DEFAULT_REACH).unwrap();
        assert_eq!(hit.block.world_position(), target);
        assert_eq!(hit.block.chunk, ChunkPos::new(1, 0));
        assert_eq!(hit.face_normal, Vector3::new(1, 0, 0));
        assert_eq!(hit.face(), Some(BlockSide::LEFT));
    }

    #[test]
    fn starting_inside_a_block_has_no_placement() {
        let world = loaded_world();
        let hit = world
            .raycast(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 1.0, 0.0), DEFAULT_REACH)
            .unwrap();
        assert_eq!(hit.block.world_position(), Point3::new(0, 0, 0));
        assert_eq!(hit.placement, None);
        assert_eq!(hit.face_normal, Vector3::new(0, 0, 0));
        assert_eq!(hit.face(), None);
    }
}
