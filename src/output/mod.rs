//! Output module for flow results
//!
//! This module writes snapshots and streamlines out of the process:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! Nothing here runs during `step` or `trace`; callers decide when to pay
//! for I/O.
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   ├── streamlines.rs
//! │   └── profile.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lattice_flow::output::{export_field_csv, plot_streamlines};
//! use lattice_flow::solver::FluidSolver;
//! use lattice_flow::streamline::{StreamlineTracer, TracerConfig};
//!
//! let mut solver = FluidSolver::new(120, 40, 0.02)?;
//! solver.advance(0.1, 400);
//! let snapshot = solver.snapshot();
//!
//! export_field_csv(&snapshot, "field.csv", None)?;
//!
//! let tracer = StreamlineTracer::new(&snapshot, TracerConfig::default())?;
//! plot_streamlines(&snapshot, &tracer.trace_all(), "lines.png", None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod export;
pub mod visualization;

pub use visualization::{plot_streamlines, plot_velocity_profile, PlotConfig};

pub use export::{export_field_csv, export_streamlines_csv, CsvConfig};
