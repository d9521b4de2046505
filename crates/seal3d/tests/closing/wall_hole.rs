use na::Point3;
use seal3d::closing::{close_surface, CloseOptions};
use seal3d::surface::{cuboid, TriMesh};
use seal3d::volume::{LabelVolume, Volume, VolumeTransform};

const WALL: u32 = 2;

/// A labeled wall splitting the interior of the surface in two, with an optional hole.
fn walled_volume(with_hole: bool) -> LabelVolume {
    LabelVolume::from_fn([12, 12, 12], VolumeTransform::identity(), |key| {
        let on_wall = key.x == 5 && (2..=10).contains(&key.y) && (2..=10).contains(&key.z);
        let in_hole = with_hole && key == Point3::new(5, 6, 6);

        if on_wall && !in_hole {
            WALL
        } else {
            0
        }
    })
}

fn surface() -> TriMesh {
    cuboid(Point3::new(1.5, 1.5, 1.5), Point3::new(10.5, 10.5, 10.5)).unwrap()
}

#[test]
fn wall_splits_the_shell() {
    let mut volume = walled_volume(false);
    let report = close_surface(&mut volume, &surface(), &CloseOptions::default()).unwrap();

    assert_eq!(report.rasterization.n_set, 729);
    assert_eq!(report.components.len(), 2);
    assert_eq!(report.components[0].seed, Point3::new(2, 2, 2));
    assert_eq!(report.components[0].voxel_count, 145);
    assert_eq!(report.components[1].seed, Point3::new(6, 2, 2));
    assert_eq!(report.components[1].voxel_count, 209);
}

#[test]
fn sealed_wall_does_not_leak() {
    let mut volume = walled_volume(false);
    let options = CloseOptions::default().with_threshold(150);
    let report = close_surface(&mut volume, &surface(), &options).unwrap();

    assert_eq!(report.closed, vec![1]);
    assert!(!report.has_leaks());
    assert_eq!(volume.count(|v| v == 1), 405);
    assert_eq!(volume.count(|v| v == WALL), 81);
    assert_eq!(volume.value(Point3::new(3, 5, 5)), 0);
}

#[test]
fn hole_in_the_wall_is_reported() {
    let mut volume = walled_volume(true);
    let options = CloseOptions::default().with_threshold(150);
    let report = close_surface(&mut volume, &surface(), &options).unwrap();

    assert_eq!(report.closed, vec![1]);
    assert_eq!(report.leaks.len(), 1);
    assert_eq!(report.leaks[0].component, 1);
    assert_eq!(report.leaks[0].seed, Point3::new(6, 2, 2));
    assert!(report.leaks[0].voxel.x < 5);

    assert_eq!(volume.count(|v| v == 1), 649);
    assert_eq!(volume.count(|v| v == WALL), 80);
}
