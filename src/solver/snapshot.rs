//! Owned copies of the solver's fields
//!
//! A [`FlowSnapshot`] detaches the macroscopic fields from the solver so they
//! can be traced, exported or plotted (possibly on another thread) while the
//! solver keeps stepping.

use ndarray::Array2;

use crate::obstacle::ObstacleMask;
use crate::solver::fluid::FluidSolver;

/// Density and velocity fields captured after a completed step
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    /// Density `[[y, x]]`
    pub density: Array2<f64>,

    /// Velocity x component `[[y, x]]`
    pub velocity_x: Array2<f64>,

    /// Velocity y component `[[y, x]]`
    pub velocity_y: Array2<f64>,

    /// Obstacle mask in effect when captured
    pub mask: ObstacleMask,

    /// Steps completed when captured
    pub steps: u64,

    /// Viscosity in effect when captured
    pub viscosity: f64,
}

impl FlowSnapshot {
    pub(crate) fn capture(solver: &FluidSolver) -> Self {
        Self {
            density: solver.density().clone(),
            velocity_x: solver.velocity_x().clone(),
            velocity_y: solver.velocity_y().clone(),
            mask: solver.obstacle_mask().clone(),
            steps: solver.steps_taken(),
            viscosity: solver.viscosity(),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.density.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.density.nrows()
    }

    /// Speed magnitude field
    pub fn speed(&self) -> Array2<f64> {
        let mut speed = self.velocity_x.clone();
        speed.zip_mut_with(&self.velocity_y, |ux, &uy| *ux = ux.hypot(uy));
        speed
    }

    /// Horizontal velocity profile along column `x`, bottom to top
    ///
    /// Returns `None` when `x` is outside the grid.
    pub fn column_profile(&self, x: usize) -> Option<Vec<f64>> {
        (x < self.width()).then(|| self.velocity_x.column(x).to_vec())
    }
}
