use crate::math::{HomogeneousMatrix, Point, Real, Vector};
use crate::volume::VoxelState;

/// Is `key` a valid voxel index in a grid of the given `sizes`?
#[inline]
pub fn key_in_bounds(key: &Point<i32>, sizes: [u32; 3]) -> bool {
    (0..3).all(|i| key[i] >= 0 && (key[i] as u32) < sizes[i])
}

/// Iterates through every key of a grid of the given `sizes` in scan order: `x` varies
/// slowest and `z` fastest.
pub fn scan_keys(sizes: [u32; 3]) -> impl Iterator<Item = Point<i32>> {
    let [sx, sy, sz] = sizes.map(|s| s as i32);
    (0..sx).flat_map(move |x| {
        (0..sy).flat_map(move |y| (0..sz).map(move |z| Point::new(x, y, z)))
    })
}

/// A three-dimensional grid of integer voxel values, placed in world space.
///
/// Voxels are addressed by their integer grid coordinates. Continuous voxel coordinates
/// `(i, j, k)` denote the center of the voxel with key `(i, j, k)`.
pub trait Volume {
    /// The number of voxels along each axis.
    fn sizes(&self) -> [u32; 3];

    /// The value of the voxel at `key`.
    ///
    /// Panics if `key` is out of bounds.
    fn value(&self, key: Point<i32>) -> u32;

    /// Sets the value of the voxel at `key`.
    ///
    /// Panics if `key` is out of bounds.
    fn set_value(&mut self, key: Point<i32>, value: u32);

    /// The largest value a voxel of this volume can hold.
    fn max_value(&self) -> u32;

    /// Maps a world-space point to continuous voxel coordinates.
    fn world_to_voxel(&self, pt: &Point<Real>) -> Point<Real>;

    /// Maps continuous voxel coordinates to world space.
    fn voxel_to_world(&self, pt: &Point<Real>) -> Point<Real>;

    /// Is `key` inside of the grid?
    #[inline]
    fn contains_key(&self, key: &Point<i32>) -> bool {
        key_in_bounds(key, self.sizes())
    }

    /// The total number of voxels of this volume.
    #[inline]
    fn num_voxels(&self) -> usize {
        self.sizes().iter().map(|s| *s as usize).product()
    }

    /// The value of the voxel at `key`, seen as a label plus scratch flags.
    #[inline]
    fn state(&self, key: Point<i32>) -> VoxelState {
        VoxelState::new(self.value(key))
    }

    /// Sets the value of the voxel at `key` from its state.
    #[inline]
    fn set_state(&mut self, key: Point<i32>, state: VoxelState) {
        self.set_value(key, state.value())
    }
}

/// An affine map from continuous voxel coordinates to world space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VolumeTransform {
    voxel_to_world: HomogeneousMatrix,
    world_to_voxel: HomogeneousMatrix,
}

impl Default for VolumeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl VolumeTransform {
    /// The transform mapping each voxel key to the world point with the same coordinates.
    pub fn identity() -> Self {
        Self {
            voxel_to_world: HomogeneousMatrix::identity(),
            world_to_voxel: HomogeneousMatrix::identity(),
        }
    }

    /// An axis-aligned transform: the voxel `(0, 0, 0)` is centered at `starts` and voxels
    /// are `steps` apart along each axis.
    ///
    /// Returns `None` if any step is zero. Negative steps flip the corresponding axis.
    pub fn from_steps_and_starts(steps: Vector<Real>, starts: Point<Real>) -> Option<Self> {
        if steps.iter().any(|s| *s == 0.0) {
            return None;
        }

        let voxel_to_world = HomogeneousMatrix::new_translation(&starts.coords)
            * HomogeneousMatrix::new_nonuniform_scaling(&steps);
        let world_to_voxel = HomogeneousMatrix::new_nonuniform_scaling(&steps.map(|s| 1.0 / s))
            * HomogeneousMatrix::new_translation(&-starts.coords);

        Some(Self {
            voxel_to_world,
            world_to_voxel,
        })
    }

    /// Creates a transform from a homogeneous voxel-to-world matrix.
    ///
    /// Returns `None` if the matrix is not an invertible affine map.
    pub fn from_matrix(voxel_to_world: HomogeneousMatrix) -> Option<Self> {
        let last_row = voxel_to_world.fixed_view::<1, 4>(3, 0);
        if !relative_eq!(last_row.transpose(), na::Vector4::new(0.0, 0.0, 0.0, 1.0)) {
            return None;
        }

        let world_to_voxel = voxel_to_world.try_inverse()?;
        Some(Self {
            voxel_to_world,
            world_to_voxel,
        })
    }

    /// The homogeneous voxel-to-world matrix.
    pub fn voxel_to_world_matrix(&self) -> &HomogeneousMatrix {
        &self.voxel_to_world
    }

    /// Maps continuous voxel coordinates to world space.
    #[inline]
    pub fn voxel_to_world(&self, pt: &Point<Real>) -> Point<Real> {
        self.voxel_to_world.transform_point(pt)
    }

    /// Maps a world-space point to continuous voxel coordinates.
    #[inline]
    pub fn world_to_voxel(&self, pt: &Point<Real>) -> Point<Real> {
        self.world_to_voxel.transform_point(pt)
    }
}
