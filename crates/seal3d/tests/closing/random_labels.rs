use na::{Point3, Vector3};
use oorandom::Rand32;
use seal3d::closing::{close_surface, CloseOptions};
use seal3d::math::Real;
use seal3d::surface::cuboid;
use seal3d::volume::{LabelVolume, Volume, VolumeTransform, LABEL_MASK};

#[test]
fn closing_every_component_never_leaks() {
    let mut rng = Rand32::new(0x5ea1_3d);

    for _ in 0..20 {
        // Faces never fall on voxel centers.
        let shift = Vector3::repeat(0.1 + 0.25 * rng.rand_range(0..4) as Real);
        let mins = Point3::new(1.5, 1.5, 1.5) + shift;
        let maxs = mins + Vector3::repeat(4.0 + rng.rand_range(0..6) as Real);
        let mesh = cuboid(mins, maxs).unwrap();

        let mut volume = LabelVolume::from_fn([14, 14, 14], VolumeTransform::identity(), |_| {
            if rng.rand_range(0..10) == 0 {
                rng.rand_range(1..LABEL_MASK + 1)
            } else {
                0
            }
        });
        let labeled: Vec<_> = volume
            .iter_keys()
            .map(|key| (key, volume.value(key)))
            .filter(|(_, value)| *value != 0)
            .collect();

        let options = CloseOptions::default().with_label(LABEL_MASK).with_threshold(1);
        let report = close_surface(&mut volume, &mesh, &options).unwrap();

        assert!(!report.has_leaks(), "{:?}", report.leaks);
        assert_eq!(report.closed.len(), report.components.len());
        assert!(volume.data().iter().all(|v| *v <= LABEL_MASK));
        for (key, value) in labeled {
            assert_eq!(volume.value(key), value, "{key}");
        }
    }
}
