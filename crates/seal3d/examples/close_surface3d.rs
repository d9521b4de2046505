use nalgebra::Point3;
use seal3d::closing::{close_surface, CloseOptions, CloseReport};
use seal3d::surface::cuboid;
use seal3d::volume::{LabelVolume, VolumeTransform};

const WALL_LABEL: u32 = 2;
const FILL_LABEL: u32 = 1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /*
     * The reference surface bounds the whole structure.
     */
    let surface = cuboid(Point3::new(2.5, 2.5, 2.5), Point3::new(20.5, 20.5, 20.5))?;

    /*
     * Close the structure with the wall intact, then with a hole punched through it.
     */
    for with_hole in [false, true] {
        let mut volume = segmentation(with_hole);
        let options = CloseOptions::default()
            .with_label(FILL_LABEL)
            .with_threshold(800);

        match close_surface(&mut volume, &surface, &options) {
            Ok(report) => print_report(with_hole, &report, &volume),
            Err(e) => println!("Closing failed: {e}"),
        }
    }

    Ok(())
}

/// A 24x24x24 volume split in two by a labeled wall at `x = 8`.
fn segmentation(with_hole: bool) -> LabelVolume {
    LabelVolume::from_fn([24, 24, 24], VolumeTransform::identity(), |key| {
        let on_wall = key.x == 8 && (3..=20).contains(&key.y) && (3..=20).contains(&key.z);
        let in_hole = with_hole && key == Point3::new(8, 12, 12);

        if on_wall && !in_hole {
            WALL_LABEL
        } else {
            0
        }
    })
}

fn print_report(with_hole: bool, report: &CloseReport, volume: &LabelVolume) {
    println!(
        "Wall {}: {} of {} voxels inside the surface.",
        if with_hole { "with a hole" } else { "sealed" },
        report.rasterization.n_set,
        report.rasterization.n_total
    );

    for (i, component) in report.components.iter().enumerate() {
        let status = if report.closed.contains(&i) {
            "closed"
        } else {
            "kept"
        };
        println!(
            "  component {} at {}: {} voxels, {status}",
            i + 1,
            component.seed,
            component.voxel_count
        );
    }

    for leak in &report.leaks {
        println!(
            "  leak: component {} seeded at {} reaches {}",
            leak.component + 1,
            leak.seed,
            leak.voxel
        );
    }

    println!(
        "  {} voxels labeled {FILL_LABEL}, {} voxels still labeled {WALL_LABEL}.",
        volume.count(|v| v == FILL_LABEL),
        volume.count(|v| v == WALL_LABEL)
    );
}
