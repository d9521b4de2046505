//! Loading of Wavefront (`.obj`) surfaces.
//!
//! This module is enabled by the `wavefront` feature flag.

use crate::math::{Point, Real};
use crate::surface::{TriMesh, TriMeshBuilderError};
use alloc::vec::Vec;
use obj::{Obj, ObjData, ObjError};
use std::io::Read;
use std::path::Path;

/// Error raised while loading a reference surface.
#[derive(thiserror::Error, Debug)]
pub enum SurfaceLoadError {
    /// The file must contain exactly one object with polygons.
    #[error("Expected exactly one object with polygons, found {0}.")]
    WrongObjectCount(usize),
    /// A face of the surface has less than three corners.
    #[error("The surface contains a face with less than three corners.")]
    NonPolygonal,
    /// A face refers to a vertex the file does not define.
    #[error("Face {face} refers to the undefined vertex {index}.")]
    IndexOutOfBounds {
        /// The index of the offending face.
        face: usize,
        /// The zero-based vertex index it refers to.
        index: usize,
    },
    /// The file could not be read or parsed.
    #[error("Failed to read the surface: {0}")]
    Obj(#[from] ObjError),
    /// The parsed buffers do not form a valid triangle mesh.
    #[error(transparent)]
    Mesh(#[from] TriMeshBuilderError),
}

/// Loads a reference surface from a Wavefront (`.obj`) file.
///
/// Faces with more than three corners are triangulated as fans around their first corner.
pub fn load_obj_file(path: impl AsRef<Path>) -> Result<TriMesh, SurfaceLoadError> {
    let Obj { data, .. } = Obj::load(path.as_ref())?;
    surface_from_obj_data(data)
}

/// Loads a reference surface from the content of a Wavefront (`.obj`) file.
pub fn load_obj_buf(input: impl Read) -> Result<TriMesh, SurfaceLoadError> {
    surface_from_obj_data(ObjData::load_buf(input)?)
}

fn surface_from_obj_data(data: ObjData) -> Result<TriMesh, SurfaceLoadError> {
    let mut objects = data
        .objects
        .iter()
        .filter(|object| object.groups.iter().any(|group| !group.polys.is_empty()));

    let object = match (objects.next(), objects.count()) {
        (Some(object), 0) => object,
        (None, _) => return Err(SurfaceLoadError::WrongObjectCount(0)),
        (Some(_), others) => return Err(SurfaceLoadError::WrongObjectCount(others + 1)),
    };

    let vertices: Vec<_> = data
        .position
        .iter()
        .map(|v| Point::new(v[0] as Real, v[1] as Real, v[2] as Real))
        .collect();

    let mut indices = Vec::new();
    for (face, poly) in object.groups.iter().flat_map(|group| group.polys.iter()).enumerate() {
        let corners = &poly.0;
        if corners.len() < 3 {
            return Err(SurfaceLoadError::NonPolygonal);
        }
        if let Some(corner) = corners.iter().find(|corner| corner.0 >= vertices.len()) {
            return Err(SurfaceLoadError::IndexOutOfBounds {
                face,
                index: corner.0,
            });
        }

        indices.extend((1..corners.len() - 1).map(|k| {
            [
                corners[0].0 as u32,
                corners[k].0 as u32,
                corners[k + 1].0 as u32,
            ]
        }));
    }

    let mesh = TriMesh::new(vertices, indices)?;
    let degenerate = mesh
        .triangles()
        .filter(|tri| tri.is_affinely_dependent())
        .count();
    if degenerate > 0 {
        log::debug!("the loaded surface has {degenerate} degenerate triangles");
    }

    Ok(mesh)
}
