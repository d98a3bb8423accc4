//! CSV export of flow fields and streamlines
//!
//! CSV files open in any spreadsheet, in pandas or in ParaView's table
//! reader, which makes them the simplest way to post-process a run.
//!
//! # Features
//!
//! - **Field export**: one row per cell (`x, y, solid, density, ux, uy, speed`)
//! - **Streamline export**: one row per point (`line, index, x, y`)
//! - **Metadata support**: optional `#` header with run parameters
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: rejects empty data and NaN / Inf values
//!
//! # Quick Examples
//!
//! ## Field export
//!
//! ```rust,no_run
//! use lattice_flow::output::export::export_field_csv;
//! use lattice_flow::solver::FluidSolver;
//!
//! let mut solver = FluidSolver::new(40, 20, 0.02)?;
//! solver.advance(0.1, 100);
//!
//! export_field_csv(&solver.snapshot(), "field.csv", None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! **Output** (`field.csv`):
//! ```csv
//! x,y,solid,density,ux,uy,speed
//! 0,0,0,1.000212,0.099871,0.000012,0.099871
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,no_run
//! use lattice_flow::output::export::{export_field_csv, CsvConfig, CsvMetadata};
//! # use lattice_flow::solver::FluidSolver;
//! # let solver = FluidSolver::new(40, 20, 0.02)?;
//!
//! let snapshot = solver.snapshot();
//! let mut metadata = CsvMetadata::from_snapshot(&snapshot);
//! metadata.inlet_speed = Some(0.1);
//!
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_field_csv(&snapshot, "field.csv", Some(&config))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! **Output** (`field.csv`):
//! ```csv
//! # Lattice Flow Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Grid: 40 x 20
//! # Viscosity: 0.02
//! # Relaxation: 1.7857142857142858
//! # Steps: 100
//! # Inlet Speed: 0.1
//! #
//! x,y,solid,density,ux,uy,speed
//! ...
//! ```

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use nalgebra::Point2;

use super::Exporter;
use crate::lattice::d2q9::relaxation_from_viscosity;
use crate::solver::FlowSnapshot;

// =============================================================================
// Errors
// =============================================================================

/// Failure of a CSV export
#[derive(Debug)]
pub enum CsvError {
    /// Underlying file or stream error
    Io(io::Error),

    /// Nothing to write
    EmptyData(&'static str),

    /// A value could not be written as a number
    NonFinite { column: &'static str, row: usize },
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::Io(err) => write!(f, "I/O error: {}", err),
            CsvError::EmptyData(what) => write!(f, "Empty data: {} must not be empty", what),
            CsvError::NonFinite { column, row } => {
                write!(f, "Invalid data: NaN or Inf in column '{}' at row {}", column, row)
            }
        }
    }
}

impl Error for CsvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CsvError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CsvError {
    fn from(err: io::Error) -> Self {
        CsvError::Io(err)
    }
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with run info
/// - `metadata`: Run metadata to include
///
/// # Example
///
/// ```rust
/// use lattice_flow::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are `Some` are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Grid size (width, height)
    pub grid: Option<(usize, usize)>,

    /// Kinematic viscosity
    pub viscosity: Option<f64>,

    /// Relaxation coefficient ω
    pub relaxation: Option<f64>,

    /// Steps completed
    pub steps: Option<u64>,

    /// Inlet speed
    pub inlet_speed: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Grid, viscosity, relaxation and step count of a snapshot
    pub fn from_snapshot(snapshot: &FlowSnapshot) -> Self {
        Self {
            grid: Some((snapshot.width(), snapshot.height())),
            viscosity: Some(snapshot.viscosity),
            relaxation: Some(relaxation_from_viscosity(snapshot.viscosity)),
            steps: Some(snapshot.steps),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(out, "# Lattice Flow Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some((width, height)) = metadata.grid {
        writeln!(out, "# Grid: {} x {}", width, height)?;
    }
    if let Some(viscosity) = metadata.viscosity {
        writeln!(out, "# Viscosity: {}", viscosity)?;
    }
    if let Some(omega) = metadata.relaxation {
        writeln!(out, "# Relaxation: {}", omega)?;
    }
    if let Some(steps) = metadata.steps {
        writeln!(out, "# Steps: {}", steps)?;
    }
    if let Some(speed) = metadata.inlet_speed {
        writeln!(out, "# Inlet Speed: {}", speed)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

fn write_preamble<W: Write>(out: &mut W, config: &CsvConfig) -> io::Result<()> {
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(out, metadata)?;
        }
    }
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn check_finite(column: &'static str, row: usize, value: f64) -> Result<(), CsvError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CsvError::NonFinite { column, row })
    }
}

// =============================================================================
// Writers
// =============================================================================

/// Write one row per cell, row-major from the bottom row
pub fn write_field<W: Write>(
    out: &mut W,
    snapshot: &FlowSnapshot,
    config: &CsvConfig,
) -> Result<(), CsvError> {
    if snapshot.density.is_empty() {
        return Err(CsvError::EmptyData("flow field"));
    }

    write_preamble(out, config)?;

    let d = config.delimiter;
    writeln!(out, "x{d}y{d}solid{d}density{d}ux{d}uy{d}speed")?;

    for (row, ((y, x), &rho)) in snapshot.density.indexed_iter().enumerate() {
        let ux = snapshot.velocity_x[[y, x]];
        let uy = snapshot.velocity_y[[y, x]];
        check_finite("density", row, rho)?;
        check_finite("ux", row, ux)?;
        check_finite("uy", row, uy)?;

        let solid = u8::from(snapshot.mask.is_solid(x, y));
        writeln!(
            out,
            "{x}{d}{y}{d}{solid}{d}{}{d}{}{d}{}{d}{}",
            format_number(rho, config),
            format_number(ux, config),
            format_number(uy, config),
            format_number(ux.hypot(uy), config),
        )?;
    }

    Ok(())
}

/// Write one row per streamline point
pub fn write_streamlines<W: Write>(
    out: &mut W,
    lines: &[Vec<Point2<f64>>],
    config: &CsvConfig,
) -> Result<(), CsvError> {
    if lines.iter().all(|line| line.is_empty()) {
        return Err(CsvError::EmptyData("streamlines"));
    }

    write_preamble(out, config)?;

    let d = config.delimiter;
    writeln!(out, "line{d}index{d}x{d}y")?;

    let mut row = 0;
    for (line_index, line) in lines.iter().enumerate() {
        for (point_index, point) in line.iter().enumerate() {
            check_finite("x", row, point.x)?;
            check_finite("y", row, point.y)?;
            writeln!(
                out,
                "{line_index}{d}{point_index}{d}{}{d}{}",
                format_number(point.x, config),
                format_number(point.y, config),
            )?;
            row += 1;
        }
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export the density and velocity fields of a snapshot to CSV
///
/// # Arguments
///
/// * `snapshot` - Fields to write
/// * `output_path` - Output file path
/// * `configuration` - Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - Empty grid
/// - NaN or Inf values
/// - File creation errors
pub fn export_field_csv(
    snapshot: &FlowSnapshot,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut file = BufWriter::new(File::create(output_path)?);
    write_field(&mut file, snapshot, configuration)?;
    file.flush()?;

    Ok(())
}

/// Export traced streamlines to CSV
///
/// Lines are numbered in the order given; points keep their order within a
/// line.
///
/// # Errors
///
/// - No points at all
/// - NaN or Inf coordinates
/// - File creation errors
pub fn export_streamlines_csv(
    lines: &[Vec<Point2<f64>>],
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut file = BufWriter::new(File::create(output_path)?);
    write_streamlines(&mut file, lines, configuration)?;
    file.flush()?;

    Ok(())
}

// =============================================================================
// Exporter
// =============================================================================

/// [`Exporter`] writing CSV files with a fixed configuration
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_field(&self, snapshot: &FlowSnapshot, path: &str) -> Result<(), CsvError> {
        let mut file = BufWriter::new(File::create(path)?);
        write_field(&mut file, snapshot, &self.config)?;
        file.flush()?;
        Ok(())
    }

    fn export_streamlines(&self, lines: &[Vec<Point2<f64>>], path: &str) -> Result<(), CsvError> {
        let mut file = BufWriter::new(File::create(path)?);
        write_streamlines(&mut file, lines, &self.config)?;
        file.flush()?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
