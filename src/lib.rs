/*!
seal3d
========

**seal3d** detects, and optionally closes, topological leaks of a binary
segmentation mask by reconciling it against a closed triangulated surface
believed to bound the same structure.

The pipeline runs in four stages over a labeled [`volume::Volume`]:

1. [`closing::rasterize_interior`] casts vertical rays against the reference
   [`surface::TriMesh`] and marks every voxel whose center lies inside it.
2. [`closing::extract_shells`] partitions the inward-facing boundary of that
   interior into connected components.
3. Every component large enough to be closed has its shell marker cleared by
   [`closing::remove_shell`]. Then [`closing::fill_inside`] labels the interior
   reachable from each of them, reporting the first voxel reached that still
   belongs to an unprocessed shell (a leak).
4. [`closing::finalize`] strips every scratch bit, leaving a pure label volume.

[`closing::close_surface`] chains all of them.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

extern crate alloc;
#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;
pub extern crate parry3d_f64 as parry;

pub mod closing;
pub mod math;
pub mod surface;
pub mod topology;
pub mod volume;
