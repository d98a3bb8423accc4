//! Velocity profile plotting
//!
//! Plots the horizontal velocity across one column of the grid, height on
//! the vertical axis, which is the usual way to read a wake deficit or a
//! boundary layer.
//!
//! # Usage
//!
//! ```rust,no_run
//! use lattice_flow::output::visualization::plot_velocity_profile;
//! # use lattice_flow::solver::FluidSolver;
//! # let solver = FluidSolver::new(120, 40, 0.02).unwrap();
//!
//! plot_velocity_profile(&solver.snapshot(), 90, "profile.png", None)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::error::Error;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::solver::FlowSnapshot;

/// Plot ux(y) along column `column` of a snapshot
///
/// # Errors
///
/// - `column` outside the grid
/// - NaN or Inf in the profile
/// - Backend errors (invalid path, unsupported format)
pub fn plot_velocity_profile(
    snapshot: &FlowSnapshot,
    column: usize,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let profile = snapshot.column_profile(column).ok_or_else(|| {
        format!(
            "Column {} outside grid of width {}",
            column,
            snapshot.width()
        )
    })?;

    if profile.iter().any(|u| !u.is_finite()) {
        return Err(format!("Invalid data: NaN or Inf in column {}", column).into());
    }

    let default_config = PlotConfig::velocity_profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    // Symmetric range around zero, never degenerate
    let max_speed = profile
        .iter()
        .fold(0.0_f64, |acc, u| acc.max(u.abs()))
        .max(1e-6)
        * 1.1;

    match super::extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profile_impl(backend, &profile, column, config, max_speed)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profile_impl(backend, &profile, column, config, max_speed)
        }
    }
}

fn plot_profile_impl<DB: DrawingBackend>(
    backend: DB,
    profile: &[f64],
    column: usize,
    config: &PlotConfig,
    max_speed: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(50)
        .build_cartesian_2d(-max_speed..max_speed, 0.0..profile.len() as f64)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|u| format!("{:.3}", u))
            .draw()?;
    }

    // Cell centers sit half a cell above each row index
    chart
        .draw_series(LineSeries::new(
            profile.iter().enumerate().map(|(y, u)| (*u, y as f64 + 0.5)),
            ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
        ))?
        .label(format!("ux at x = {}", column))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.line_color));

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
