//! Labeled voxel grids and the packed per-voxel state used while closing them.

pub use self::label_volume::LabelVolume;
pub use self::volume::{key_in_bounds, scan_keys, Volume, VolumeTransform};
pub use self::voxel_state::{VoxelFlags, VoxelState, LABEL_MASK};

mod label_volume;
mod volume;
mod voxel_state;
