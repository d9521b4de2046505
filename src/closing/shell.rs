//! Extraction of the connected components of the inner boundary of the rasterized interior.

use crate::math::Point;
use crate::topology::Connectivity;
use crate::volume::{key_in_bounds, scan_keys, Volume, VoxelFlags};
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// A connected set of shell voxels, identified by its first voxel in scan order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoundaryComponent {
    /// The voxel the component was discovered from.
    pub seed: Point<i32>,
    /// The number of voxels of the component.
    pub voxel_count: usize,
}

/// Is the voxel `key` an unclaimed shell voxel?
///
/// That is the case if it is unlabeled, inside, not already marked as shell, and at least one
/// of its neighbors is not inside. Neighbors outside of the grid count as not inside.
pub fn is_on_shell<V>(volume: &V, key: Point<i32>, connectivity: Connectivity) -> bool
where
    V: Volume + ?Sized,
{
    let state = volume.state(key);
    if !state.is_unlabeled() || !state.is_inside() || state.is_shell() {
        return false;
    }

    let sizes = volume.sizes();
    connectivity
        .all_neighbors(key)
        .any(|neighbor| !key_in_bounds(&neighbor, sizes) || !volume.state(neighbor).is_inside())
}

/// Partitions the shell voxels of `volume` into connected components.
///
/// Every voxel of every component gets the [`VoxelFlags::SHELL`] flag. Components are returned
/// in the order they are discovered by a scan of the grid with `x` varying slowest and `z`
/// fastest.
pub fn extract_shells<V>(volume: &mut V, connectivity: Connectivity) -> Vec<BoundaryComponent>
where
    V: Volume + ?Sized,
{
    let mut components = Vec::new();

    for key in scan_keys(volume.sizes()) {
        if is_on_shell(volume, key, connectivity) {
            let voxel_count = expand_shell(volume, key, connectivity);
            log::info!(
                "{:3}: {} {} {} -- {} voxels",
                components.len() + 1,
                key.x,
                key.y,
                key.z,
                voxel_count
            );
            components.push(BoundaryComponent {
                seed: key,
                voxel_count,
            });
        }
    }

    components
}

/// Marks the shell component containing `seed` breadth-first, returning its size.
///
/// Voxels are marked as they are enqueued so that none is counted twice.
fn expand_shell<V>(volume: &mut V, seed: Point<i32>, connectivity: Connectivity) -> usize
where
    V: Volume + ?Sized,
{
    let sizes = volume.sizes();
    let mut queue = VecDeque::new();
    mark_shell(volume, seed);
    queue.push_back(seed);
    let mut voxel_count = 1;

    while let Some(curr) = queue.pop_front() {
        for neighbor in connectivity.neighbors(curr, sizes) {
            if is_on_shell(volume, neighbor, connectivity) {
                mark_shell(volume, neighbor);
                queue.push_back(neighbor);
                voxel_count += 1;
            }
        }
    }

    voxel_count
}

#[inline]
fn mark_shell<V: Volume + ?Sized>(volume: &mut V, key: Point<i32>) {
    let state = volume.state(key).with_flags(VoxelFlags::SHELL);
    volume.set_state(key, state);
}
