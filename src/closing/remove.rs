use crate::math::Point;
use crate::topology::Connectivity;
use crate::volume::{Volume, VoxelFlags};
use alloc::collections::VecDeque;

/// Clears the [`VoxelFlags::SHELL`] flag of every voxel connected to `seed` through voxels
/// still carrying it.
///
/// The flag of `seed` itself is cleared unconditionally. Returns the number of cleared voxels,
/// which matches the size recorded by [`extract_shells`](super::extract_shells) for an
/// untouched component.
///
/// # Panics
///
/// Panics if `seed` is outside of the volume.
pub fn remove_shell<V>(volume: &mut V, seed: Point<i32>, connectivity: Connectivity) -> usize
where
    V: Volume + ?Sized,
{
    assert!(
        volume.contains_key(&seed),
        "shell seed {seed} is out of the volume bounds {:?}",
        volume.sizes()
    );
    let sizes = volume.sizes();
    let mut queue = VecDeque::new();
    clear_shell(volume, seed);
    queue.push_back(seed);
    let mut removed = 1;

    while let Some(curr) = queue.pop_front() {
        for neighbor in connectivity.neighbors(curr, sizes) {
            if volume.state(neighbor).is_shell() {
                clear_shell(volume, neighbor);
                queue.push_back(neighbor);
                removed += 1;
            }
        }
    }

    log::debug!("cleared the shell marker of {removed} voxels from {seed}");
    removed
}

#[inline]
fn clear_shell<V: Volume + ?Sized>(volume: &mut V, key: Point<i32>) {
    let state = volume.state(key).without_flags(VoxelFlags::SHELL);
    volume.set_state(key, state);
}
