//! Classification of voxel centers against a closed reference surface.

use crate::closing::ClosingError;
use crate::math::{Point, Real, DEFAULT_EPSILON, Z};
use crate::surface::TriMesh;
use crate::volume::{Volume, VoxelFlags, VoxelState, LABEL_MASK};
use alloc::vec::Vec;
use parry::bounding_volume::{Aabb, BoundingVolume};
use parry::query::{Ray, RayCast};
use parry::shape::Shape;

/// A closed surface the interior of a volume can be rasterized from.
pub trait ReferenceSurface {
    /// A box bounding every point of the surface, in world space.
    fn bounding_aabb(&self) -> Aabb;

    /// The distance along `ray` to the first crossing of the surface, from either side.
    ///
    /// The direction of `ray` is normalized.
    fn first_crossing(&self, ray: &Ray) -> Option<Real>;
}

impl ReferenceSurface for TriMesh {
    fn bounding_aabb(&self) -> Aabb {
        self.compute_local_aabb()
    }

    fn first_crossing(&self, ray: &Ray) -> Option<Real> {
        self.cast_local_ray(ray, Real::MAX, false)
    }
}

/// The smallest [`Volume::max_value`] able to hold every label along with every scratch flag.
pub const MIN_MAX_VALUE: u32 = VoxelFlags::all().bits() | LABEL_MASK;

/// Parameters of [`rasterize_interior`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RasterizeOptions {
    /// How far, in voxels, the columns extend beyond the surface bounding box.
    pub margin: Real,
    /// Tolerance of the consistency check between neighbor columns, in world units.
    pub tolerance: Real,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            margin: 100.0,
            tolerance: 1.0e-2,
        }
    }
}

/// Summary of a rasterization.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RasterizationStats {
    /// The number of voxels marked as inside.
    pub n_set: usize,
    /// The total number of voxels of the volume.
    pub n_total: usize,
    /// The number of voxel columns crossing the surface.
    pub n_columns_hit: usize,
}

/// Entry and exit distances of every voxel column, `None` where the column misses the surface.
struct ColumnTables {
    sizes: [u32; 2],
    enter: Vec<Option<Real>>,
    exit: Vec<Option<Real>>,
}

impl ColumnTables {
    fn new(sx: u32, sy: u32) -> Self {
        let len = sx as usize * sy as usize;
        Self {
            sizes: [sx, sy],
            enter: vec![None; len],
            exit: vec![None; len],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.sizes[0] as usize
    }

    fn set(&mut self, x: u32, y: u32, enter: Real, exit: Real) {
        let i = self.index(x, y);
        self.enter[i] = Some(enter);
        self.exit[i] = Some(exit);
    }

    /// Checks that the distances of each column are consistent with those of its opposite
    /// neighbors along the four in-plane directions.
    ///
    /// The surface is entered no later, and exited no earlier, than the average of the two
    /// neighbors, up to `tolerance`. Columns on the border of the grid are not checked.
    fn validate(&self, tolerance: Real) -> Result<(), ClosingError> {
        const DIRECTIONS: [[i64; 2]; 4] = [[1, 0], [1, 1], [0, 1], [-1, 1]];
        let [sx, sy] = self.sizes;

        for x in 1..sx.saturating_sub(1) {
            for y in 1..sy.saturating_sub(1) {
                let center = self.index(x, y);

                for [dx, dy] in DIRECTIONS {
                    let before = self.index((x as i64 - dx) as u32, (y as i64 - dy) as u32);
                    let after = self.index((x as i64 + dx) as u32, (y as i64 + dy) as u32);

                    let enter_error = match (self.enter[before], self.enter[after]) {
                        (Some(a), Some(b)) => self.enter[center]
                            .map_or(true, |center| center - tolerance > (a + b) / 2.0),
                        _ => false,
                    };
                    let exit_error = match (self.exit[before], self.exit[after]) {
                        (Some(a), Some(b)) => self.exit[center]
                            .map_or(true, |center| center + tolerance < (a + b) / 2.0),
                        _ => false,
                    };

                    if enter_error || exit_error {
                        return Err(ClosingError::InconsistentColumn { x, y });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Sets the [`VoxelFlags::INSIDE`] flag on every voxel whose center lies inside `surface`.
///
/// Each column of voxels along `z` is cast against the surface from both of its ends, and the
/// voxels between the first crossing and the last crossing are marked. The surface must be
/// closed and every column must cross it at most twice: after the rasterization, columns are
/// checked against their neighbors and [`ClosingError::InconsistentColumn`] is returned if
/// that assumption is violated.
///
/// Flags are merged into voxel values with a bitwise or, clamped to [`Volume::max_value`].
/// Volumes whose largest value is below [`MIN_MAX_VALUE`] are rejected with
/// [`ClosingError::MaxValueTooSmall`] before any voxel is modified.
pub fn rasterize_interior<V, S>(
    volume: &mut V,
    surface: &S,
    options: &RasterizeOptions,
) -> Result<RasterizationStats, ClosingError>
where
    V: Volume + ?Sized,
    S: ReferenceSurface + ?Sized,
{
    check_volume(volume)?;
    let sizes = volume.sizes();

    // Bounds of the surface in voxel space, extended so that every column starts and ends
    // strictly outside of it.
    let mut limits = Aabb::new_invalid();
    for pt in surface.bounding_aabb().vertices() {
        limits.take_point(volume.world_to_voxel(&pt));
    }
    let limits = limits.loosened(options.margin.max(0.0));

    let mut tables = ColumnTables::new(sizes[0], sizes[1]);
    let mut stats = RasterizationStats {
        n_total: volume.num_voxels(),
        ..Default::default()
    };
    let max_value = volume.max_value();

    for x in 0..sizes[0] {
        for y in 0..sizes[1] {
            let column = |z: Real| volume.voxel_to_world(&Point::new(x as Real, y as Real, z));
            let start = column(limits.mins[Z]);
            let end = column(limits.maxs[Z]);
            let length = na::distance(&start, &end);

            let (Some(backward), Some(forward)) = (ray_through(end, start), ray_through(start, end))
            else {
                continue;
            };

            let Some(from_end) = surface.first_crossing(&backward) else {
                continue;
            };
            let Some(enter) = surface.first_crossing(&forward) else {
                log::warn!("ray distance error: column ({x}, {y}) only hits the surface backward");
                continue;
            };
            let exit = length - from_end;

            tables.set(x, y, enter, exit);
            stats.n_columns_hit += 1;

            let crossings = [enter, exit];
            let mut inside = false;
            let mut int_index = 0;
            let mut next_z = i64::MIN;

            for z in 0..sizes[2] as i64 {
                // Each crossing toggles the state from the first voxel center past it.
                while next_z <= z {
                    if let Some(toi) = crossings.get(int_index) {
                        let boundary = volume.world_to_voxel(&forward.point_at(*toi));
                        next_z = boundary[Z].ceil() as i64;
                        inside = int_index % 2 == 1;
                        int_index += 1;
                    } else {
                        next_z = sizes[2] as i64;
                        inside = false;
                    }
                }

                if inside {
                    let key = Point::new(x as i32, y as i32, z as i32);
                    let value = volume.state(key).with_flags(VoxelFlags::INSIDE).value();
                    volume.set_state(key, VoxelState::new(value.min(max_value)));
                    stats.n_set += 1;
                }
            }
        }
    }

    log::info!("Set {} out of {}", stats.n_set, stats.n_total);

    tables.validate(options.tolerance)?;
    Ok(stats)
}

/// Checks that `volume` has voxels, and that its values can hold every label and flag.
pub(crate) fn check_volume<V: Volume + ?Sized>(volume: &V) -> Result<(), ClosingError> {
    if volume.sizes().contains(&0) {
        return Err(ClosingError::EmptyVolume);
    }

    let max_value = volume.max_value();
    if max_value < MIN_MAX_VALUE {
        return Err(ClosingError::MaxValueTooSmall {
            max_value,
            required: MIN_MAX_VALUE,
        });
    }

    Ok(())
}

/// The ray starting at `start` and heading toward `end`, with a unit direction.
fn ray_through(start: Point<Real>, end: Point<Real>) -> Option<Ray> {
    let dir = (end - start).try_normalize(DEFAULT_EPSILON)?;
    Some(Ray::new(start, dir))
}
