use na::Point3;
use seal3d::closing::{
    close_interior, close_surface, rasterize_interior, CloseOptions, ClosingError,
    RasterizeOptions, ReferenceSurface,
};
use seal3d::math::Real;
use seal3d::parry::bounding_volume::Aabb;
use seal3d::parry::query::Ray;
use seal3d::surface::{cuboid, TriMesh};
use seal3d::volume::{LabelVolume, Volume, VolumeTransform, VoxelFlags};

const INSIDE: u32 = VoxelFlags::INSIDE.bits();
const SHELL: u32 = VoxelFlags::SHELL.bits();

/// Two boxes glued side by side, the second one only half as tall: columns along `z` enter
/// the surface at two different depths.
fn stepped_surface() -> TriMesh {
    let low = cuboid(Point3::new(1.5, 1.5, 1.5), Point3::new(4.5, 8.5, 8.5)).unwrap();
    let high = cuboid(Point3::new(4.5, 1.5, 4.5), Point3::new(8.5, 8.5, 8.5)).unwrap();

    let mut vertices = low.vertices().to_vec();
    let mut indices = low.indices().to_vec();
    let offset = vertices.len() as u32;
    vertices.extend_from_slice(high.vertices());
    indices.extend(high.indices().iter().map(|tri| tri.map(|i| i + offset)));

    TriMesh::new(vertices, indices).unwrap()
}

/// A surface whose forward crossings go missing on some columns.
struct ForwardBlind {
    mesh: TriMesh,
    /// The blind column, or every column if `None`.
    column: Option<(Real, Real)>,
}

impl ReferenceSurface for ForwardBlind {
    fn bounding_aabb(&self) -> Aabb {
        self.mesh.bounding_aabb()
    }

    fn first_crossing(&self, ray: &Ray) -> Option<Real> {
        let on_column = self
            .column
            .map_or(true, |(x, y)| ray.origin.x == x && ray.origin.y == y);

        if ray.dir.z > 0.0 && on_column {
            None
        } else {
            self.mesh.first_crossing(ray)
        }
    }
}

fn centered_box() -> TriMesh {
    cuboid(Point3::new(2.5, 2.5, 2.5), Point3::new(7.5, 7.5, 7.5)).unwrap()
}

#[test]
fn stepped_surface_is_inconsistent() {
    let mesh = stepped_surface();
    let mut volume = LabelVolume::new([11, 11, 11], VolumeTransform::identity());

    assert_eq!(
        rasterize_interior(&mut volume, &mesh, &RasterizeOptions::default()),
        Err(ClosingError::InconsistentColumn { x: 5, y: 2 })
    );
}

#[test]
fn inconsistent_surface_is_never_finalized() {
    let mesh = stepped_surface();
    let mut volume = LabelVolume::new([11, 11, 11], VolumeTransform::identity());
    let options = CloseOptions::default().with_threshold(1);

    assert_eq!(
        close_surface(&mut volume, &mesh, &options),
        Err(ClosingError::InconsistentColumn { x: 5, y: 2 })
    );
    // 3x7x7 voxels under the low box, 4x7x4 under the high one.
    assert_eq!(volume.count(|v| v == INSIDE), 147 + 112);
}

#[test]
fn column_hit_only_backward_is_inconsistent() {
    let surface = ForwardBlind {
        mesh: centered_box(),
        column: Some((5.0, 5.0)),
    };
    let mut volume = LabelVolume::new([11, 11, 11], VolumeTransform::identity());

    assert_eq!(
        rasterize_interior(&mut volume, &surface, &RasterizeOptions::default()),
        Err(ClosingError::InconsistentColumn { x: 5, y: 5 })
    );
    assert_eq!(volume.count(|v| v == INSIDE), 125 - 5);
    assert_eq!(volume.value(Point3::new(5, 5, 5)), 0);
}

#[test]
fn surface_hit_only_backward_sets_nothing() {
    let surface = ForwardBlind {
        mesh: centered_box(),
        column: None,
    };
    let mut volume = LabelVolume::new([11, 11, 11], VolumeTransform::identity());
    let stats = rasterize_interior(&mut volume, &surface, &RasterizeOptions::default()).unwrap();

    assert_eq!(stats.n_set, 0);
    assert_eq!(stats.n_columns_hit, 0);
    assert!(volume.data().iter().all(|v| *v == 0));
}

#[test]
fn stale_shell_marker_is_a_size_mismatch() {
    let mut volume = LabelVolume::from_fn([7, 7, 7], VolumeTransform::identity(), |key| {
        if (0..3).all(|i| key[i] >= 1 && key[i] <= 5) {
            INSIDE
        } else {
            0
        }
    });
    // Already marked, so extraction skips it but removal clears it.
    volume.set_value(Point3::new(3, 3, 1), INSIDE | SHELL);

    let options = CloseOptions::default().with_threshold(1);
    assert_eq!(
        close_interior(&mut volume, &options),
        Err(ClosingError::ComponentSizeMismatch {
            component: 0,
            seed: Point3::new(1, 1, 1),
            expected: 97,
            removed: 98,
        })
    );

    assert_eq!(volume.count(|v| v & INSIDE != 0), 125);
    assert_eq!(volume.count(|v| v & 0x3f != 0), 0);
}

#[test]
fn narrow_volume_is_rejected_before_rasterization() {
    let mut volume =
        LabelVolume::new([11, 11, 11], VolumeTransform::identity()).with_max_value(127);

    assert_eq!(
        close_surface(&mut volume, &centered_box(), &CloseOptions::default()),
        Err(ClosingError::MaxValueTooSmall {
            max_value: 127,
            required: 0xff
        })
    );
    assert!(volume.data().iter().all(|v| *v == 0));
}
