//! Reference surfaces: closed triangle meshes the interior of a volume is rasterized from.
//!
//! Meshes and ray-casting come from [`parry`](crate::parry). This module adds the synthetic
//! surfaces used to exercise the closing pipeline, and the Wavefront loader.

pub use parry::shape::{TriMesh, TriMeshBuilderError};
#[cfg(feature = "wavefront")]
pub use self::wavefront::{load_obj_buf, load_obj_file, SurfaceLoadError};

use crate::math::{Point, Real};
use parry::shape::{Ball, Cuboid};

#[cfg(feature = "wavefront")]
mod wavefront;

/// The boundary of the box `[mins, maxs]`, as 12 outward-oriented triangles.
pub fn cuboid(mins: Point<Real>, maxs: Point<Real>) -> Result<TriMesh, TriMeshBuilderError> {
    let center = na::center(&mins, &maxs);
    let half_extents = (maxs - mins).abs() / 2.0;
    let (mut vertices, indices) = Cuboid::new(half_extents).to_trimesh();
    vertices.iter_mut().for_each(|pt| *pt += center.coords);
    TriMesh::new(vertices, indices)
}

/// The boundary of a sphere, split into `ntheta_subdiv` meridians and `nphi_subdiv` parallels.
///
/// Poles are along the `y` axis.
pub fn uv_sphere(
    center: Point<Real>,
    radius: Real,
    ntheta_subdiv: u32,
    nphi_subdiv: u32,
) -> Result<TriMesh, TriMeshBuilderError> {
    let (mut vertices, indices) =
        Ball::new(radius).to_trimesh(ntheta_subdiv.max(3), nphi_subdiv.max(2));
    vertices.iter_mut().for_each(|pt| *pt += center.coords);
    TriMesh::new(vertices, indices)
}
