/// Bits of a voxel value holding its label.
///
/// Labels range in `1..=LABEL_MASK`; `0` means unlabeled.
pub const LABEL_MASK: u32 = 0x3f;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// Scratch bits stored above the label bits of a voxel value.
pub struct VoxelFlags(u32);

bitflags::bitflags! {
    impl VoxelFlags: u32 {
        /// The voxel belongs to a boundary component that was not closed (yet).
        const SHELL = 0x40;
        /// The voxel center lies inside the reference surface.
        const INSIDE = 0x80;
    }
}

/// The value of a voxel, seen as a label plus scratch flags.
///
/// ```
/// use seal3d::volume::{VoxelFlags, VoxelState};
///
/// let state = VoxelState::new(0).with_flags(VoxelFlags::INSIDE | VoxelFlags::SHELL);
/// assert!(state.is_inside() && state.is_shell() && state.is_unlabeled());
///
/// let filled = state.without_flags(VoxelFlags::SHELL).with_label(3);
/// assert_eq!(filled.label(), 3);
/// assert_eq!(filled.finalized(), VoxelState::new(3));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelState(pub u32);

impl VoxelState {
    /// Wraps a raw voxel value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw voxel value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The label bits of this voxel.
    #[inline]
    pub const fn label(self) -> u32 {
        self.0 & LABEL_MASK
    }

    /// The scratch flags set on this voxel.
    #[inline]
    pub const fn flags(self) -> VoxelFlags {
        VoxelFlags::from_bits_truncate(self.0)
    }

    /// Does the voxel center lie inside the reference surface?
    #[inline]
    pub const fn is_inside(self) -> bool {
        self.0 & VoxelFlags::INSIDE.bits() != 0
    }

    /// Does the voxel belong to a boundary component that is still marked?
    #[inline]
    pub const fn is_shell(self) -> bool {
        self.0 & VoxelFlags::SHELL.bits() != 0
    }

    /// Is the label of this voxel zero?
    #[inline]
    pub const fn is_unlabeled(self) -> bool {
        self.label() == 0
    }

    /// This voxel with `flags` set.
    #[inline]
    #[must_use]
    pub const fn with_flags(self, flags: VoxelFlags) -> Self {
        Self(self.0 | flags.bits())
    }

    /// This voxel with `flags` cleared.
    #[inline]
    #[must_use]
    pub const fn without_flags(self, flags: VoxelFlags) -> Self {
        Self(self.0 & !flags.bits())
    }

    /// Merges `label` into the label bits of this voxel.
    ///
    /// This is a bitwise or: writing a label onto an already labeled voxel combines both.
    #[inline]
    #[must_use]
    pub const fn with_label(self, label: u32) -> Self {
        Self(self.0 | (label & LABEL_MASK))
    }

    /// This voxel with every scratch flag stripped.
    #[inline]
    #[must_use]
    pub const fn finalized(self) -> Self {
        Self(self.0 & LABEL_MASK)
    }
}
