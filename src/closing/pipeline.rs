use crate::closing::rasterize::check_volume;
use crate::closing::{
    extract_shells, fill_inside, rasterize_interior, remove_shell, BoundaryComponent,
    ClosingError, RasterizationStats, RasterizeOptions, ReferenceSurface,
};
use crate::math::Point;
use crate::topology::Connectivity;
use crate::volume::{scan_keys, Volume, LABEL_MASK};
use alloc::vec::Vec;

/// Which boundary components get closed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ClosingMode {
    /// Boundary components are only reported.
    #[default]
    DetectOnly,
    /// Every boundary component with at least `min_voxels` voxels is closed.
    Close {
        /// The smallest size of a component to close.
        min_voxels: usize,
    },
}

impl ClosingMode {
    /// Interprets a closing threshold: non-positive values disable closing.
    ///
    /// Thresholds beyond `usize::MAX` saturate.
    pub fn from_threshold(threshold: i64) -> Self {
        if threshold <= 0 {
            ClosingMode::DetectOnly
        } else {
            ClosingMode::Close {
                min_voxels: usize::try_from(threshold).unwrap_or(usize::MAX),
            }
        }
    }

    /// Should a component of `voxel_count` voxels be closed?
    pub fn closes(self, voxel_count: usize) -> bool {
        match self {
            ClosingMode::DetectOnly => false,
            ClosingMode::Close { min_voxels } => voxel_count >= min_voxels,
        }
    }
}

/// Configuration of [`close_surface`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CloseOptions {
    /// The label given to the closed interior, in `1..=LABEL_MASK`.
    pub label: u32,
    /// Which boundary components get closed.
    pub mode: ClosingMode,
    /// The voxel adjacency used by every flood fill.
    pub connectivity: Connectivity,
    /// Parameters of the interior rasterization.
    pub rasterize: RasterizeOptions,
}

impl Default for CloseOptions {
    fn default() -> Self {
        Self {
            label: 1,
            mode: ClosingMode::DetectOnly,
            connectivity: Connectivity::TwentySix,
            rasterize: RasterizeOptions::default(),
        }
    }
}

impl CloseOptions {
    /// Sets the label given to the closed interior.
    #[must_use]
    pub fn with_label(mut self, label: u32) -> Self {
        self.label = label;
        self
    }

    /// Sets which boundary components get closed.
    #[must_use]
    pub fn with_mode(mut self, mode: ClosingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Closes every component with at least `threshold` voxels, or none if `threshold <= 0`.
    #[must_use]
    pub fn with_threshold(self, threshold: i64) -> Self {
        self.with_mode(ClosingMode::from_threshold(threshold))
    }

    /// Sets the voxel adjacency used by every flood fill.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Sets the parameters of the interior rasterization.
    #[must_use]
    pub fn with_rasterize_options(mut self, rasterize: RasterizeOptions) -> Self {
        self.rasterize = rasterize;
        self
    }

    fn validate(&self) -> Result<(), ClosingError> {
        if self.label == 0 || self.label > LABEL_MASK {
            Err(ClosingError::InvalidLabel(self.label))
        } else {
            Ok(())
        }
    }
}

/// A closed component whose fill reached the shell of another component.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Leak {
    /// The index of the closed component, in discovery order.
    pub component: usize,
    /// The seed of the closed component.
    pub seed: Point<i32>,
    /// The first voxel reached that belonged to another component.
    pub voxel: Point<i32>,
}

/// The outcome of [`close_surface`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CloseReport {
    /// Summary of the interior rasterization.
    pub rasterization: RasterizationStats,
    /// Every boundary component, in discovery order.
    pub components: Vec<BoundaryComponent>,
    /// Indices into `components` of the components that were closed.
    pub closed: Vec<usize>,
    /// Detected leaks, in fill order.
    pub leaks: Vec<Leak>,
    /// The number of voxels whose value changed during finalization.
    pub finalized: usize,
}

impl CloseReport {
    /// Was any possible topological hole found?
    pub fn has_leaks(&self) -> bool {
        !self.leaks.is_empty()
    }
}

/// Labels the interior of `surface` in `volume`, reporting topological leaks.
///
/// This rasterizes the interior of `surface` then runs [`close_interior`]. Nothing is written
/// to `volume` if the options are invalid, or if it is empty or cannot store the scratch flags.
pub fn close_surface<V, S>(
    volume: &mut V,
    surface: &S,
    options: &CloseOptions,
) -> Result<CloseReport, ClosingError>
where
    V: Volume + ?Sized,
    S: ReferenceSurface + ?Sized,
{
    options.validate()?;
    let rasterization = rasterize_interior(volume, surface, &options.rasterize)?;
    close_components(volume, options, rasterization)
}

/// Runs the closing pipeline on a volume whose interior flags are already set.
///
/// Boundary components are extracted, the selected ones are closed, and the volume is
/// finalized. All the selected components have their shell marker removed before any of them
/// is filled: a leak can only be detected into a component that was not selected.
pub fn close_interior<V>(volume: &mut V, options: &CloseOptions) -> Result<CloseReport, ClosingError>
where
    V: Volume + ?Sized,
{
    options.validate()?;
    check_volume(volume)?;

    let n_set = scan_keys(volume.sizes())
        .filter(|key| volume.state(*key).is_inside())
        .count();
    let rasterization = RasterizationStats {
        n_set,
        n_total: volume.num_voxels(),
        n_columns_hit: 0,
    };
    close_components(volume, options, rasterization)
}

fn close_components<V>(
    volume: &mut V,
    options: &CloseOptions,
    rasterization: RasterizationStats,
) -> Result<CloseReport, ClosingError>
where
    V: Volume + ?Sized,
{
    let components = extract_shells(volume, options.connectivity);
    let closed: Vec<_> = (0..components.len())
        .filter(|i| options.mode.closes(components[*i].voxel_count))
        .collect();

    for &i in &closed {
        let component = &components[i];
        let removed = remove_shell(volume, component.seed, options.connectivity);

        if removed != component.voxel_count {
            return Err(ClosingError::ComponentSizeMismatch {
                component: i,
                seed: component.seed,
                expected: component.voxel_count,
                removed,
            });
        }
    }

    let mut leaks = Vec::new();
    for &i in &closed {
        let seed = components[i].seed;
        let outcome = fill_inside(volume, seed, options.label, options.connectivity)?;

        if let Some(voxel) = outcome.leak {
            log::warn!(
                "possible topological hole: component {} seeded at {} {} {} leaks through to {} {} {}",
                i + 1,
                seed.x,
                seed.y,
                seed.z,
                voxel.x,
                voxel.y,
                voxel.z
            );
            leaks.push(Leak {
                component: i,
                seed,
                voxel,
            });
        }
    }

    let finalized = finalize(volume);

    Ok(CloseReport {
        rasterization,
        components,
        closed,
        leaks,
        finalized,
    })
}

/// Strips every scratch flag from `volume`, leaving only labels.
///
/// Returns the number of voxels whose value changed.
pub fn finalize<V: Volume + ?Sized>(volume: &mut V) -> usize {
    let mut changed = 0;

    for key in scan_keys(volume.sizes()) {
        let state = volume.state(key);
        let finalized = state.finalized();

        if finalized != state {
            volume.set_state(key, finalized);
            changed += 1;
        }
    }

    changed
}
