//! # Positions
//!
//! Coordinate types shared by the voxel modules. World space is measured in blocks, chunk
//! space indexes 16×16 columns. Converting between them always uses floor division so a
//! negative coordinate lands in the chunk below it rather than in chunk zero.

use cgmath::{Point3, Vector3};

use super::chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// Splits `value` into a floor quotient and a non-negative remainder.
///
/// The quotient is truncated first and then decremented when the value is negative and does
/// not divide evenly, so `floor_div(-1, 16) == (-1, 15)` and `floor_div(-16, 16) == (-1, 0)`.
pub fn floor_div(value: i32, size: i32) -> (i32, i32) {
    let mut quotient = value / size;
    if value < 0 && value % size != 0 {
        quotient -= 1;
    }
    (quotient, value - quotient * size)
}

/// Chunk column position (each chunk is 16x16 blocks horizontally).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    /// Column index along the world X axis.
    pub x: i32,
    /// Column index along the world Z axis.
    pub z: i32,
}

impl ChunkPos {
    /// Creates a chunk position from its column indices.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk owning a block position.
    pub fn containing(world: Point3<i32>) -> Self {
        Self::new(
            floor_div(world.x, CHUNK_WIDTH).0,
            floor_div(world.z, CHUNK_DEPTH).0,
        )
    }

    /// The chunk a floating-point world position (such as the camera) is standing in.
    pub fn containing_point(world: Point3<f32>) -> Self {
        Self::new(
            (world.x / CHUNK_WIDTH as f32).floor() as i32,
            (world.z / CHUNK_DEPTH as f32).floor() as i32,
        )
    }

    /// This position shifted by a number of chunks along each axis.
    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// The four horizontal neighbours in -X, +X, -Z, +Z order.
    pub const fn horizontal_neighbors(self) -> [ChunkPos; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// Chessboard distance, the metric the streaming radius is measured in.
    pub fn chebyshev_distance(self, other: ChunkPos) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Squared Euclidean distance, used to order pending loads.
    pub fn distance_squared(self, other: ChunkPos) -> i32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    /// World position of the chunk's (0, 0, 0) block.
    pub fn world_origin(self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_WIDTH, 0, self.z * CHUNK_DEPTH)
    }

    /// Converts a position local to this chunk into world space.
    pub fn to_world(self, local: Point3<i32>) -> Point3<i32> {
        self.world_origin() + Vector3::new(local.x, local.y, local.z)
    }
}

/// Block position inside a chunk, always within the chunk's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// 0..CHUNK_WIDTH
    pub x: usize,
    /// 0..CHUNK_HEIGHT
    pub y: usize,
    /// 0..CHUNK_DEPTH
    pub z: usize,
}

impl LocalPos {
    /// Creates a local position. Callers guarantee the coordinates are in bounds.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Creates a local position from signed coordinates, or `None` if any is out of bounds.
    pub fn checked(x: i32, y: i32, z: i32) -> Option<Self> {
        let in_bounds = (0..CHUNK_WIDTH).contains(&x)
            && (0..CHUNK_HEIGHT).contains(&y)
            && (0..CHUNK_DEPTH).contains(&z);
        in_bounds.then(|| Self::new(x as usize, y as usize, z as usize))
    }

    /// Signed form, convenient for offset arithmetic.
    pub fn to_point(self) -> Point3<i32> {
        Point3::new(self.x as i32, self.y as i32, self.z as i32)
    }

    /// Neighbouring chunks that share a face with this block, given the chunk it lives in.
    ///
    /// A block on the x==0 column borders the -X chunk, x==WIDTH-1 borders +X, and likewise
    /// for Z. Corner columns border two chunks; interior columns border none.
    pub fn bordering_chunks(self, owner: ChunkPos) -> Vec<ChunkPos> {
        let mut bordering = Vec::new();
        if self.x == 0 {
            bordering.push(owner.offset(-1, 0));
        }
        if self.x == CHUNK_WIDTH as usize - 1 {
            bordering.push(owner.offset(1, 0));
        }
        if self.z == 0 {
            bordering.push(owner.offset(0, -1));
        }
        if self.z == CHUNK_DEPTH as usize - 1 {
            bordering.push(owner.offset(0, 1));
        }
        bordering
    }
}

/// Splits a world block position into its owning chunk and the local position inside it.
///
/// # Returns
/// `None` when the vertical coordinate falls outside `[0, CHUNK_HEIGHT)`.
pub fn split_world(world: Point3<i32>) -> Option<(ChunkPos, LocalPos)> {
    let (chunk_x, local_x) = floor_div(world.x, CHUNK_WIDTH);
    let (chunk_z, local_z) = floor_div(world.z, CHUNK_DEPTH);
    let local = LocalPos::checked(local_x, world.y, local_z)?;
    Some((ChunkPos::new(chunk_x, chunk_z), local))
}
