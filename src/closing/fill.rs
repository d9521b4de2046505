use crate::closing::ClosingError;
use crate::math::Point;
use crate::topology::Connectivity;
use crate::volume::{Volume, LABEL_MASK};
use alloc::collections::VecDeque;

/// The result of [`fill_inside`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FillOutcome {
    /// The number of voxels that received the label.
    pub filled: usize,
    /// The first voxel reached that still carried the shell flag, if any.
    pub leak: Option<Point<i32>>,
}

/// Labels the unlabeled interior reachable from `seed`, watching for leaks.
///
/// `label` is merged into `seed` unconditionally, then the fill grows breadth-first through
/// every unlabeled voxel with the [`INSIDE`](crate::volume::VoxelFlags::INSIDE) flag. The first
/// such voxel found with the [`SHELL`](crate::volume::VoxelFlags::SHELL) flag still set
/// belongs to a component that was not removed: it is reported as a leak, and the fill keeps
/// growing through it.
///
/// # Panics
///
/// Panics if `seed` is outside of the volume.
pub fn fill_inside<V>(
    volume: &mut V,
    seed: Point<i32>,
    label: u32,
    connectivity: Connectivity,
) -> Result<FillOutcome, ClosingError>
where
    V: Volume + ?Sized,
{
    // A zero label would never mark voxels as visited.
    if label == 0 || label > LABEL_MASK {
        return Err(ClosingError::InvalidLabel(label));
    }
    assert!(
        volume.contains_key(&seed),
        "fill seed {seed} is out of the volume bounds {:?}",
        volume.sizes()
    );

    let sizes = volume.sizes();
    let mut queue = VecDeque::new();
    let mut outcome = FillOutcome {
        filled: 1,
        leak: None,
    };

    let state = volume.state(seed).with_label(label);
    volume.set_state(seed, state);
    queue.push_back(seed);

    while let Some(curr) = queue.pop_front() {
        for neighbor in connectivity.neighbors(curr, sizes) {
            let state = volume.state(neighbor);

            if state.is_unlabeled() && state.is_inside() {
                if state.is_shell() && outcome.leak.is_none() {
                    outcome.leak = Some(neighbor);
                }

                volume.set_state(neighbor, state.with_label(label));
                queue.push_back(neighbor);
                outcome.filled += 1;
            }
        }
    }

    log::debug!("labeled {} voxels from {seed}", outcome.filled);
    Ok(outcome)
}
