//! Detection and closing of topological leaks of a labeled volume against a reference surface.

pub use self::error::ClosingError;
pub use self::fill::{fill_inside, FillOutcome};
pub use self::pipeline::{
    close_interior, close_surface, finalize, CloseOptions, CloseReport, ClosingMode, Leak,
};
pub use self::rasterize::{
    rasterize_interior, RasterizationStats, RasterizeOptions, ReferenceSurface, MIN_MAX_VALUE,
};
pub use self::remove::remove_shell;
pub use self::shell::{extract_shells, is_on_shell, BoundaryComponent};

mod error;
mod fill;
mod pipeline;
mod rasterize;
mod remove;
mod shell;
