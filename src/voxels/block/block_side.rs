//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, their neighbour offsets and the
//! unit-cube corners a quad for each face is built from.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is assigned the integer written into the `face id` vertex attribute, so the
/// order here is part of the renderer boundary.
///
/// The order is: [FRONT, BACK, LEFT, RIGHT, TOP, BOTTOM]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The top face (facing positive Y)
    TOP = 4,

    /// The bottom face (facing negative Y)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// This is useful for iterating over all possible faces of a block.
    /// The order is: [FRONT, BACK, LEFT, RIGHT, TOP, BOTTOM]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// Offset from a block to the neighbour this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
        }
    }

    /// The face whose outward normal is `normal`, if it is a unit axis vector.
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all()
            .into_iter()
            .find(|side| side.offset() == normal)
    }

    /// Corners of this face on the unit cube, counter-clockwise when viewed from outside.
    ///
    /// Paired with the `0 1 2, 2 3 0` index pattern this gives front-facing triangles under
    /// back-face culling.
    pub fn corners(self) -> [Vector3<f32>; 4] {
        match self {
            BlockSide::FRONT => [
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(1.0, 0.0, 1.0),
                Vector3::new(1.0, 1.0, 1.0),
                Vector3::new(0.0, 1.0, 1.0),
            ],
            BlockSide::BACK => [
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
            ],
            BlockSide::LEFT => [
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(0.0, 1.0, 1.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            BlockSide::RIGHT => [
                Vector3::new(1.0, 0.0, 1.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(1.0, 1.0, 1.0),
            ],
            BlockSide::TOP => [
                Vector3::new(0.0, 1.0, 1.0),
                Vector3::new(1.0, 1.0, 1.0),
                Vector3::new(1.0, 1.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
            BlockSide::BOTTOM => [
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 1.0),
                Vector3::new(0.0, 0.0, 1.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    #[test]
    fn corners_wind_counter_clockwise_from_outside() {
        for side in BlockSide::all() {
            let [a, b, c, _] = side.corners();
            let normal = (b - a).cross(c - a).normalize();
            let offset = side.offset();
            let expected = Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32);
            assert!((normal - expected).magnitude() < 1e-6, "{side:?}");
        }
    }

    #[test]
    fn normals_map_back_to_sides() {
        for side in BlockSide::all() {
            assert_eq!(BlockSide::from_normal(side.offset()), Some(side));
        }
        assert_eq!(BlockSide::from_normal(Vector3::new(0, 0, 0)), None);
    }
}
