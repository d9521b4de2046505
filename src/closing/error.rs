use crate::math::Point;

/// Fatal errors of the closing pipeline.
///
/// Leaks are not errors: they are reported in the [`CloseReport`](super::CloseReport).
/// When one of these errors is returned, the volume may have been partially modified but it
/// is never finalized.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClosingError {
    /// The output label must be in `1..=LABEL_MASK`.
    #[error("The label {0} is not in 1..=63.")]
    InvalidLabel(u32),
    /// The volume has no voxel.
    #[error("The volume has no voxel.")]
    EmptyVolume,
    /// The largest value the volume can store cannot hold the scratch flags along with a label.
    #[error("The volume values are capped at {max_value} but labels and flags need {required}.")]
    MaxValueTooSmall {
        /// The [`Volume::max_value`](crate::volume::Volume::max_value) of the volume.
        max_value: u32,
        /// The smallest accepted maximum value.
        required: u32,
    },
    /// The ray-cast entry or exit distance of a column is inconsistent with its neighbors.
    ///
    /// This happens when the reference surface is not closed, is self-intersecting, or is not
    /// convex along the voxel columns.
    #[error("Inconsistent ray intersection distances at column ({x}, {y}).")]
    InconsistentColumn {
        /// The `x` index of the faulty column.
        x: u32,
        /// The `y` index of the faulty column.
        y: u32,
    },
    /// Removing the shell marker of a component did not clear as many voxels as it contained
    /// when extracted.
    #[error(
        "Component {component} seeded at {seed} had {expected} voxels but {removed} were removed."
    )]
    ComponentSizeMismatch {
        /// The index of the component, in discovery order.
        component: usize,
        /// The seed voxel of the component.
        seed: Point<i32>,
        /// The voxel count recorded at extraction time.
        expected: usize,
        /// The number of voxels whose shell marker was cleared.
        removed: usize,
    },
}
