use crate::math::{Point, Real};
use crate::volume::{Volume, VolumeTransform};
use alloc::vec::Vec;

/// A dense, in-memory labeled volume.
///
/// Values are stored with the `x` index varying fastest, then `y`, then `z`.
///
/// ```
/// use seal3d::volume::{LabelVolume, Volume, VolumeTransform};
/// use nalgebra::Point3;
///
/// let mut volume = LabelVolume::new([4, 3, 2], VolumeTransform::identity());
/// volume.set_value(Point3::new(3, 2, 1), 7);
/// assert_eq!(volume.value(Point3::new(3, 2, 1)), 7);
/// assert_eq!(volume.data()[23], 7);
/// assert_eq!(volume.count(|v| v != 0), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LabelVolume {
    sizes: [u32; 3],
    data: Vec<u32>,
    transform: VolumeTransform,
    max_value: u32,
}

impl LabelVolume {
    /// The default largest voxel value, that of 8-bit label volumes.
    pub const DEFAULT_MAX_VALUE: u32 = 255;

    /// Creates a volume of the given `sizes` with every voxel set to zero.
    pub fn new(sizes: [u32; 3], transform: VolumeTransform) -> Self {
        let len = sizes.iter().map(|s| *s as usize).product();
        Self {
            sizes,
            data: vec![0; len],
            transform,
            max_value: Self::DEFAULT_MAX_VALUE,
        }
    }

    /// Creates a volume with each voxel value computed by `f` from the voxel key.
    pub fn from_fn(
        sizes: [u32; 3],
        transform: VolumeTransform,
        mut f: impl FnMut(Point<i32>) -> u32,
    ) -> Self {
        let mut result = Self::new(sizes, transform);
        for (value, key) in result.data.iter_mut().zip(Self::keys(sizes)) {
            *value = f(key);
        }
        result
    }

    /// Sets the largest value a voxel can hold.
    #[must_use]
    pub fn with_max_value(mut self, max_value: u32) -> Self {
        self.max_value = max_value;
        self
    }

    /// The raw voxel values.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// The raw voxel values, mutably.
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// The voxel-to-world transform of this volume.
    pub fn transform(&self) -> &VolumeTransform {
        &self.transform
    }

    /// Iterates through every voxel key, in storage order.
    pub fn iter_keys(&self) -> impl Iterator<Item = Point<i32>> {
        Self::keys(self.sizes)
    }

    /// The number of voxels with a value satisfying `predicate`.
    pub fn count(&self, predicate: impl Fn(u32) -> bool) -> usize {
        self.data.iter().filter(|v| predicate(**v)).count()
    }

    /// The index of the voxel `key` in [`Self::data`].
    ///
    /// Panics if `key` is out of bounds.
    #[inline]
    pub fn linear_index(&self, key: Point<i32>) -> usize {
        assert!(
            self.contains_key(&key),
            "voxel key {key} is out of the volume bounds {:?}",
            self.sizes
        );
        let [sx, sy, _] = self.sizes.map(|s| s as usize);
        key.x as usize + key.y as usize * sx + key.z as usize * sx * sy
    }

    fn keys(sizes: [u32; 3]) -> impl Iterator<Item = Point<i32>> {
        let [sx, sy, sz] = sizes.map(|s| s as i32);
        (0..sz).flat_map(move |z| {
            (0..sy).flat_map(move |y| (0..sx).map(move |x| Point::new(x, y, z)))
        })
    }
}

impl Volume for LabelVolume {
    #[inline]
    fn sizes(&self) -> [u32; 3] {
        self.sizes
    }

    #[inline]
    fn value(&self, key: Point<i32>) -> u32 {
        self.data[self.linear_index(key)]
    }

    #[inline]
    fn set_value(&mut self, key: Point<i32>, value: u32) {
        let i = self.linear_index(key);
        self.data[i] = value;
    }

    #[inline]
    fn max_value(&self) -> u32 {
        self.max_value
    }

    #[inline]
    fn world_to_voxel(&self, pt: &Point<Real>) -> Point<Real> {
        self.transform.world_to_voxel(pt)
    }

    #[inline]
    fn voxel_to_world(&self, pt: &Point<Real>) -> Point<Real> {
        self.transform.voxel_to_world(pt)
    }
}
