//! Streamline map plotting
//!
//! Draws the obstacle cells and a set of traced streamlines in lattice
//! coordinates (cells), y pointing up.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lattice_flow::output::visualization::plot_streamlines;
//! use lattice_flow::solver::FluidSolver;
//! use lattice_flow::streamline::{StreamlineTracer, TracerConfig};
//!
//! let mut solver = FluidSolver::new(120, 40, 0.02).unwrap();
//! solver.advance(0.1, 500);
//!
//! let snapshot = solver.snapshot();
//! let tracer = StreamlineTracer::new(&snapshot, TracerConfig::default()).unwrap();
//! plot_streamlines(&snapshot, &tracer.trace_all(), "wake.svg", None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::error::Error;

use nalgebra::Point2;
use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::solver::FlowSnapshot;

/// Plot obstacles and streamlines of a snapshot
///
/// # Arguments
///
/// * `snapshot` - Fields whose obstacle mask is drawn (and whose size sets the axes)
/// * `lines` - Polylines, typically from `StreamlineTracer::trace_all`
/// * `output_path` - Path to save the plot (`.svg` for SVG, PNG otherwise)
/// * `config` - Optional plot configuration
pub fn plot_streamlines(
    snapshot: &FlowSnapshot,
    lines: &[Vec<Point2<f64>>],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if snapshot.density.is_empty() {
        return Err("Empty flow field".into());
    }

    let default_config = PlotConfig::streamlines(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    match super::extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_streamlines_impl(backend, snapshot, lines, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_streamlines_impl(backend, snapshot, lines, config)
        }
    }
}

fn plot_streamlines_impl<DB: DrawingBackend>(
    backend: DB,
    snapshot: &FlowSnapshot,
    lines: &[Vec<Point2<f64>>],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let width = snapshot.width() as f64;
    let height = snapshot.height() as f64;

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..width, 0.0..height)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .draw()?;
    }

    let obstacle_style = config.obstacle_color.filled();
    chart.draw_series(
        snapshot
            .mask
            .cells()
            .indexed_iter()
            .filter(|(_, solid)| **solid)
            .map(|((y, x), _)| {
                let (x, y) = (x as f64, y as f64);
                Rectangle::new([(x, y), (x + 1.0, y + 1.0)], obstacle_style)
            }),
    )?;

    for (index, line) in lines.iter().enumerate() {
        let style = ShapeStyle::from(&config.line_color_for(index)).stroke_width(config.line_width);
        chart.draw_series(LineSeries::new(line.iter().map(|p| (p.x, p.y)), style))?;
    }

    root.present()?;

    log::debug!("Plotted {} streamlines", lines.len());
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
