//! Visualization of flow results
//!
//! This module renders snapshots with the `plotters` library, to PNG or SVG
//! depending on the output file extension.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **streamlines**: Obstacle map with traced streamlines
//! - **profile**: Horizontal velocity across one column
//!
//! # When to Use Which Module
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Flow pattern around obstacles | `streamlines` | `plot_streamlines` |
//! | Wake deficit / inlet profile | `profile` | `plot_velocity_profile` |

pub mod config;
pub mod profile;
pub mod streamlines;

pub use config::{PlotConfig, NO_TITLE};
pub use profile::plot_velocity_profile;
pub use streamlines::plot_streamlines;

/// File extension, `"png"` when there is none
fn extension(output_path: &str) -> &str {
    std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png")
}
