//! Flow diagnostics
//!
//! The solver never reports instability: speeds are clamped and the step
//! always completes. These helpers let a caller inspect the fields
//! afterwards, either as aggregate statistics or as a hard finiteness check.

use ndarray::{Array2, Zip};

use crate::obstacle::ObstacleMask;
use crate::solver::fluid::FluidSolver;
use crate::solver::snapshot::FlowSnapshot;

/// Aggregate quantities over the fluid cells of a grid
///
/// Solid cells are counted but excluded from the density and speed
/// aggregates. Non-finite cells are counted and excluded as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStatistics {
    pub fluid_cells: usize,
    pub solid_cells: usize,

    /// Σ ρ over finite fluid cells
    pub total_mass: f64,
    pub mean_density: f64,
    pub min_density: f64,
    pub max_density: f64,

    /// Largest |u| over finite fluid cells
    pub max_speed: f64,

    /// Fluid cells whose density or velocity is NaN or infinite
    pub non_finite_cells: usize,
}

impl FlowStatistics {
    /// Statistics of the solver's current fields
    pub fn compute(solver: &FluidSolver) -> Self {
        Self::from_fields(
            solver.density(),
            solver.velocity_x(),
            solver.velocity_y(),
            solver.obstacle_mask(),
        )
    }

    /// Statistics of a captured snapshot
    pub fn of_snapshot(snapshot: &FlowSnapshot) -> Self {
        Self::from_fields(
            &snapshot.density,
            &snapshot.velocity_x,
            &snapshot.velocity_y,
            &snapshot.mask,
        )
    }

    fn from_fields(
        density: &Array2<f64>,
        velocity_x: &Array2<f64>,
        velocity_y: &Array2<f64>,
        mask: &ObstacleMask,
    ) -> Self {
        let mut stats = Self {
            fluid_cells: 0,
            solid_cells: 0,
            total_mass: 0.0,
            mean_density: 0.0,
            min_density: f64::INFINITY,
            max_density: f64::NEG_INFINITY,
            max_speed: 0.0,
            non_finite_cells: 0,
        };

        Zip::from(density)
            .and(velocity_x)
            .and(velocity_y)
            .and(mask.cells())
            .for_each(|&rho, &ux, &uy, &solid| {
                if solid {
                    stats.solid_cells += 1;
                    return;
                }
                stats.fluid_cells += 1;

                if !(rho.is_finite() && ux.is_finite() && uy.is_finite()) {
                    stats.non_finite_cells += 1;
                    return;
                }

                stats.total_mass += rho;
                stats.min_density = stats.min_density.min(rho);
                stats.max_density = stats.max_density.max(rho);
                stats.max_speed = stats.max_speed.max(ux.hypot(uy));
            });

        let finite = stats.fluid_cells - stats.non_finite_cells;
        if finite > 0 {
            stats.mean_density = stats.total_mass / finite as f64;
        } else {
            stats.min_density = 0.0;
            stats.max_density = 0.0;
        }

        stats
    }

    /// True when no fluid cell holds NaN or infinity
    pub fn is_finite(&self) -> bool {
        self.non_finite_cells == 0
    }
}

/// Check the solver's fields for numerical issues
///
/// The clamp in the collision pass bounds the speed but not the density, so
/// a diverging run can still end up with NaN or infinite values.
///
/// # Returns
///
/// `Ok(())` if every field is finite, `Err(msg)` naming the first bad cell
/// (row-major order) and the step count otherwise.
///
/// # Example
///
/// ```rust
/// use lattice_flow::solver::{check_finite, FluidSolver};
///
/// let mut solver = FluidSolver::new(20, 10, 0.05).unwrap();
/// solver.advance(0.1, 10);
/// assert!(check_finite(&solver).is_ok());
/// ```
pub fn check_finite(solver: &FluidSolver) -> Result<(), String> {
    let fields = [
        ("density", solver.density()),
        ("velocity_x", solver.velocity_x()),
        ("velocity_y", solver.velocity_y()),
    ];

    for (name, field) in fields {
        if let Some(((y, x), value)) = field.indexed_iter().find(|(_, v)| !v.is_finite()) {
            let kind = if value.is_nan() { "NaN" } else { "Infinity" };
            return Err(format!(
                "{} detected in {} at cell ({}, {}) after step {}. \
                 Try a larger viscosity or a lower inlet speed.",
                kind,
                name,
                x,
                y,
                solver.steps_taken()
            ));
        }
    }

    Ok(())
}
