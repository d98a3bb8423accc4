//! Export module for flow data.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use lattice_flow::output::export::{CsvExporter, Exporter};
//! use lattice_flow::solver::FluidSolver;
//! use lattice_flow::streamline::{StreamlineTracer, TracerConfig};
//!
//! let mut solver = FluidSolver::new(80, 30, 0.02).unwrap();
//! solver.advance(0.1, 200);
//!
//! let exporter = CsvExporter::default();
//! exporter.export_field(&solver.snapshot(), "field.csv")?;
//!
//! let tracer = StreamlineTracer::new(&solver, TracerConfig::default()).unwrap();
//! exporter.export_streamlines(&tracer.trace_all(), "lines.csv")?;
//! # Ok::<(), lattice_flow::output::export::CsvError>(())
//! ```

pub mod csv;

pub use csv::{
    export_field_csv, export_streamlines_csv, CsvConfig, CsvError, CsvExporter, CsvMetadata,
};

use nalgebra::Point2;

use crate::solver::FlowSnapshot;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type. This avoids
/// systematic boxing (`Box<dyn Error>`) and lets the caller react to the
/// precise failure.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the density and velocity fields of a snapshot, one record per cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or a field holds NaN / Inf.
    fn export_field(&self, snapshot: &FlowSnapshot, path: &str) -> Result<(), Self::Error>;

    /// Exports traced streamlines, one record per point.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or there are no points.
    fn export_streamlines(
        &self,
        lines: &[Vec<Point2<f64>>],
        path: &str,
    ) -> Result<(), Self::Error>;
}
