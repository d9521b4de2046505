//! Linear algebra type aliases.

use na::{Matrix4, Point3, Vector3};

/// The scalar type used throughout this crate, shared with [`parry`](crate::parry).
pub use parry::math::Real;

/// The point type.
///
/// World-space and voxel-space positions are `Point<Real>`. Integer voxel
/// keys are `Point<i32>`.
pub type Point<N = Real> = Point3<N>;

/// The vector type.
pub type Vector<N = Real> = Vector3<N>;

/// The homogeneous matrix type used for affine voxel-to-world maps.
pub type HomogeneousMatrix = Matrix4<Real>;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// Axis indices, for readability when indexing points and sizes.
pub const X: usize = 0;
/// See [`X`].
pub const Y: usize = 1;
/// See [`X`].
pub const Z: usize = 2;
