//! Helper functions for integration tests

use lattice_flow::obstacle::ObstacleMask;
use lattice_flow::solver::FluidSolver;

/// Mask with one solid disc
pub fn cylinder_mask(width: usize, height: usize, cx: f64, cy: f64, radius: f64) -> ObstacleMask {
    let mut mask = ObstacleMask::empty(width, height);
    mask.fill_circle(cx, cy, radius);
    mask
}

/// Mask with a one-cell-thick closed rectangle whose corners are
/// `(x0, y0)` and `(x1, y1)` inclusive
pub fn sealed_box(width: usize, height: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> ObstacleMask {
    let mut mask = ObstacleMask::empty(width, height);
    for x in x0..=x1 {
        mask.set(x, y0, true);
        mask.set(x, y1, true);
    }
    for y in y0..=y1 {
        mask.set(x0, y, true);
        mask.set(x1, y, true);
    }
    mask
}

/// Solver with `mask` installed
pub fn solver_with_mask(viscosity: f64, mask: ObstacleMask) -> FluidSolver {
    let mut solver = FluidSolver::new(mask.width(), mask.height(), viscosity).unwrap();
    assert!(solver.set_obstacles(mask), "mask should match the grid");
    solver
}

/// Largest |u| over every cell; NaN if any cell is NaN
pub fn max_speed(solver: &FluidSolver) -> f64 {
    solver
        .velocity_x()
        .iter()
        .zip(solver.velocity_y().iter())
        .map(|(ux, uy)| ux.hypot(*uy))
        .fold(0.0, |acc: f64, s| if s.is_nan() || acc.is_nan() { f64::NAN } else { acc.max(s) })
}
