//! Voxel adjacency.

use crate::math::Point;
use crate::volume::key_in_bounds;

const SIX_OFFSETS: [[i32; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

const TWENTY_SIX_OFFSETS: [[i32; 3]; 26] = [
    [-1, -1, -1],
    [-1, -1, 0],
    [-1, -1, 1],
    [-1, 0, -1],
    [-1, 0, 0],
    [-1, 0, 1],
    [-1, 1, -1],
    [-1, 1, 0],
    [-1, 1, 1],
    [0, -1, -1],
    [0, -1, 0],
    [0, -1, 1],
    [0, 0, -1],
    [0, 0, 1],
    [0, 1, -1],
    [0, 1, 0],
    [0, 1, 1],
    [1, -1, -1],
    [1, -1, 0],
    [1, -1, 1],
    [1, 0, -1],
    [1, 0, 0],
    [1, 0, 1],
    [1, 1, -1],
    [1, 1, 0],
    [1, 1, 1],
];

/// Which voxels are considered adjacent to each other.
///
/// Neighbors are always enumerated in the same order, so every traversal built on top of
/// them is deterministic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Connectivity {
    /// Voxels sharing a face.
    ///
    /// Offsets are enumerated as `-x, +x, -y, +y, -z, +z`.
    Six,
    /// Voxels sharing a face, an edge, or a corner.
    ///
    /// Offsets are enumerated in lexicographic order of `(dx, dy, dz)`, with `dz` varying
    /// fastest.
    #[default]
    TwentySix,
}

impl Connectivity {
    /// The key offsets from a voxel to each of its neighbors.
    pub fn offsets(self) -> &'static [[i32; 3]] {
        match self {
            Connectivity::Six => &SIX_OFFSETS,
            Connectivity::TwentySix => &TWENTY_SIX_OFFSETS,
        }
    }

    /// The keys of every neighbor of `key`, including those outside of the grid.
    pub fn all_neighbors(self, key: Point<i32>) -> impl Iterator<Item = Point<i32>> {
        self.offsets()
            .iter()
            .map(move |d| Point::new(key.x + d[0], key.y + d[1], key.z + d[2]))
    }

    /// The keys of the neighbors of `key` lying inside of a grid of the given `sizes`.
    pub fn neighbors(self, key: Point<i32>, sizes: [u32; 3]) -> impl Iterator<Item = Point<i32>> {
        self.all_neighbors(key)
            .filter(move |neighbor| key_in_bounds(neighbor, sizes))
    }
}
