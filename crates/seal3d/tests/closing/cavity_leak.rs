use na::Point3;
use seal3d::closing::{close_interior, CloseOptions};
use seal3d::volume::{LabelVolume, Volume, VolumeTransform, VoxelFlags};

/// A 7x7x7 interior cube with a single voxel cavity at its center.
fn hollow_cube() -> LabelVolume {
    LabelVolume::from_fn([13, 13, 13], VolumeTransform::identity(), |key| {
        let in_cube = (0..3).all(|i| key[i] >= 3 && key[i] <= 9);
        if in_cube && key != Point3::new(6, 6, 6) {
            VoxelFlags::INSIDE.bits()
        } else {
            0
        }
    })
}

#[test]
fn cavity_wall_is_a_separate_component() {
    let mut volume = hollow_cube();
    let report = close_interior(&mut volume, &CloseOptions::default()).unwrap();

    assert_eq!(report.rasterization.n_set, 342);
    assert_eq!(report.components.len(), 2);
    assert_eq!(report.components[0].seed, Point3::new(3, 3, 3));
    assert_eq!(report.components[0].voxel_count, 218);
    assert_eq!(report.components[1].seed, Point3::new(5, 5, 5));
    assert_eq!(report.components[1].voxel_count, 26);
}

#[test]
fn filling_the_skin_leaks_into_the_cavity_wall() {
    let mut volume = hollow_cube();
    let options = CloseOptions::default().with_threshold(100);
    let report = close_interior(&mut volume, &options).unwrap();

    assert_eq!(report.closed, vec![0]);
    assert_eq!(report.leaks.len(), 1);

    let leak = report.leaks[0];
    assert_eq!(leak.component, 0);
    assert_eq!(leak.seed, Point3::new(3, 3, 3));
    assert!((0..3).all(|i| leak.voxel[i] >= 5 && leak.voxel[i] <= 7));
    assert_ne!(leak.voxel, Point3::new(6, 6, 6));

    // The fill keeps growing through the leak.
    assert_eq!(volume.count(|v| v == 1), 342);
    assert_eq!(volume.value(Point3::new(6, 6, 6)), 0);
}

#[test]
fn closing_both_components_reports_no_leak() {
    let mut volume = hollow_cube();
    let options = CloseOptions::default().with_threshold(10);
    let report = close_interior(&mut volume, &options).unwrap();

    assert_eq!(report.closed, vec![0, 1]);
    assert!(!report.has_leaks());
    assert_eq!(volume.count(|v| v == 1), 342);
}
