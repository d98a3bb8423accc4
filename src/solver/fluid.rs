//! Lattice Boltzmann fluid solver
//!
//! # Mathematical Background
//!
//! The D2Q9 BGK scheme advances nine particle populations `f_i` per cell:
//!
//! ```text
//! f_i(x + e_i, t + 1) = f_i(x, t) - ω (f_i(x, t) - feq_i(ρ, u))
//! ```
//!
//! split into a streaming pass (move populations to neighbors, resolving
//! walls and open edges) and a collision pass (relax toward equilibrium).
//! The kinematic viscosity enters only through `ω = 1 / (3ν + 0.5)`.
//!
//! # Characteristics
//!
//! - **Stability**: conditional; needs `ω` in `(0, 2)` and low Mach number.
//!   Speeds are clamped to [`VELOCITY_CEILING`] after each step.
//! - **Memory**: two population buffers (`9 × cells` each) plus three fields
//! - **Determinism**: identical inputs give bit-identical fields, with or
//!   without the `parallel` feature
//!
//! # Example
//!
//! ```rust
//! use lattice_flow::solver::FluidSolver;
//! use lattice_flow::obstacle::ObstacleMask;
//!
//! let mut solver = FluidSolver::new(60, 30, 0.04).unwrap();
//!
//! let mut mask = ObstacleMask::empty(60, 30);
//! mask.fill_circle(15.0, 15.0, 4.0);
//! assert!(solver.set_obstacles(mask));
//!
//! solver.advance(0.1, 20);
//!
//! assert_eq!(solver.steps_taken(), 20);
//! assert_eq!(solver.velocity_x()[[15, 15]], 0.0);
//! ```

use nalgebra::Vector2;
use ndarray::Array2;

use crate::lattice::d2q9::{equilibrium_set, relaxation_from_viscosity};
use crate::lattice::LatticeState;
use crate::obstacle::ObstacleMask;
use crate::solver::collision::{collide, VELOCITY_CEILING};
use crate::solver::config::SimulationConfig;
use crate::solver::diagnostics::FlowStatistics;
use crate::solver::snapshot::FlowSnapshot;
use crate::solver::streaming::stream;

// =================================================================================================
// Fluid Solver
// =================================================================================================

/// D2Q9 wind-tunnel solver
///
/// Owns the lattice state and the obstacle mask. The density and velocity
/// fields it exposes are a snapshot of the last completed step; the borrow
/// checker keeps readers and `step` from overlapping.
#[derive(Debug, Clone)]
pub struct FluidSolver {
    lattice: LatticeState,
    mask: ObstacleMask,
    viscosity: f64,
    omega: f64,
    steps: u64,
    rejected_masks: u64,
}

impl FluidSolver {
    /// Allocate a solver at rest equilibrium
    ///
    /// # Errors
    ///
    /// Fails when `width` or `height` is zero.
    ///
    /// The viscosity is taken as-is; see [`FluidSolver::set_viscosity`].
    pub fn new(width: usize, height: usize, viscosity: f64) -> Result<Self, String> {
        check_dimensions(width, height)?;

        let mut solver = Self {
            lattice: LatticeState::at_rest(width, height),
            mask: ObstacleMask::empty(width, height),
            viscosity,
            omega: relaxation_from_viscosity(viscosity),
            steps: 0,
            rejected_masks: 0,
        };
        solver.set_viscosity(viscosity);

        log::debug!(
            "Configured {}x{} lattice, viscosity {}, omega {:.4}",
            width,
            height,
            viscosity,
            solver.omega
        );

        Ok(solver)
    }

    /// Build a solver from a validated configuration
    pub fn from_config(config: &SimulationConfig) -> Result<Self, String> {
        config.validate()?;
        Self::new(config.width, config.height, config.viscosity)
    }

    /// Reallocate every array for a new grid, back at rest equilibrium
    ///
    /// The obstacle mask is cleared (it no longer matches the grid) and the
    /// step counter restarts. On error the solver is left unchanged.
    pub fn configure(&mut self, width: usize, height: usize, viscosity: f64) -> Result<(), String> {
        *self = Self::new(width, height, viscosity)?;
        Ok(())
    }

    /// Change the viscosity and recompute ω = 1 / (3ν + 0.5)
    ///
    /// # Precondition
    ///
    /// `viscosity` must be strictly positive. The value is not clamped:
    /// outside that range ω leaves `(0, 2)` and the scheme is unstable (the
    /// velocity clamp then hides the blow-up). A warning is logged.
    pub fn set_viscosity(&mut self, viscosity: f64) {
        self.viscosity = viscosity;
        self.omega = relaxation_from_viscosity(viscosity);

        if !(self.omega > 0.0 && self.omega < 2.0) {
            log::warn!(
                "Viscosity {} gives omega {} outside (0, 2): the simulation will be unstable",
                viscosity,
                self.omega
            );
        }
    }

    /// Replace the obstacle mask from a flat row-major slice of flags
    ///
    /// Returns `false` and leaves the current mask in place when
    /// `cells.len() != width * height`. This tolerates a stale mask arriving
    /// after a resize; rejections are counted in
    /// [`FluidSolver::rejected_mask_updates`] and logged.
    pub fn set_obstacle_mask(&mut self, cells: &[bool]) -> bool {
        match ObstacleMask::from_cells(self.width(), self.height(), cells.to_vec()) {
            Ok(mask) => self.install_mask(mask),
            Err(reason) => self.reject_mask(&reason),
        }
    }

    /// Replace the obstacle mask
    ///
    /// Same policy as [`FluidSolver::set_obstacle_mask`]: a mask whose width
    /// or height differs from the grid is ignored and `false` is returned.
    pub fn set_obstacles(&mut self, mask: ObstacleMask) -> bool {
        if mask.width() != self.width() || mask.height() != self.height() {
            let reason = format!(
                "mask is {}x{}, grid is {}x{}",
                mask.width(),
                mask.height(),
                self.width(),
                self.height()
            );
            return self.reject_mask(&reason);
        }

        self.install_mask(mask)
    }

    fn install_mask(&mut self, mask: ObstacleMask) -> bool {
        for ((y, x), _) in mask.cells().indexed_iter().filter(|(_, solid)| **solid) {
            self.lattice.rest_cell(x, y);
        }

        log::debug!("Installed obstacle mask with {} solid cells", mask.solid_count());
        self.mask = mask;
        true
    }

    fn reject_mask(&mut self, reason: &str) -> bool {
        self.rejected_masks += 1;
        log::warn!(
            "Ignoring obstacle mask update ({}); {} rejected so far",
            reason,
            self.rejected_masks
        );
        false
    }

    /// Advance the simulation by one time unit
    ///
    /// Pass 1 streams every fluid cell into the next buffer (with bounce-back,
    /// inlet, outlet and free-stream edges), pass 2 computes ρ and u, clamps
    /// the speed to [`VELOCITY_CEILING`] and relaxes toward equilibrium, then
    /// the buffers swap. Never fails; instability is clamped, not reported.
    pub fn step(&mut self, inlet_speed: f64) {
        let inlet = equilibrium_set(1.0, inlet_speed, 0.0);
        let lattice = &mut self.lattice;

        stream(&lattice.populations, &mut lattice.next, &self.mask, &inlet);
        collide(
            &mut lattice.next,
            &mut lattice.density,
            &mut lattice.velocity_x,
            &mut lattice.velocity_y,
            &self.mask,
            self.omega,
        );
        lattice.swap_buffers();

        self.steps += 1;
    }

    /// Run `steps` consecutive steps at the same inlet speed
    pub fn advance(&mut self, inlet_speed: f64, steps: usize) {
        for _ in 0..steps {
            self.step(inlet_speed);
        }
    }

    /// Return to rest equilibrium, keeping the grid, viscosity and mask
    pub fn reset(&mut self) {
        self.lattice.reset();
        self.steps = 0;
    }

    // ========================================== Queries ==========================================

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.lattice.width()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.lattice.height()
    }

    /// Current viscosity
    pub fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Current relaxation coefficient ω
    pub fn relaxation(&self) -> f64 {
        self.omega
    }

    /// Density field `[[y, x]]`
    pub fn density(&self) -> &Array2<f64> {
        self.lattice.density()
    }

    /// Velocity x field `[[y, x]]`
    pub fn velocity_x(&self) -> &Array2<f64> {
        self.lattice.velocity_x()
    }

    /// Velocity y field `[[y, x]]`
    pub fn velocity_y(&self) -> &Array2<f64> {
        self.lattice.velocity_y()
    }

    /// Velocity of one cell
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the grid.
    pub fn velocity(&self, x: usize, y: usize) -> Vector2<f64> {
        Vector2::new(self.velocity_x()[[y, x]], self.velocity_y()[[y, x]])
    }

    /// Speed magnitude field
    pub fn speed(&self) -> Array2<f64> {
        let mut speed = self.velocity_x().clone();
        speed.zip_mut_with(self.velocity_y(), |ux, &uy| *ux = ux.hypot(uy));
        speed
    }

    /// Underlying lattice state
    pub fn lattice(&self) -> &LatticeState {
        &self.lattice
    }

    #[cfg(test)]
    pub(crate) fn lattice_mut(&mut self) -> &mut LatticeState {
        &mut self.lattice
    }

    /// Current obstacle mask
    pub fn obstacle_mask(&self) -> &ObstacleMask {
        &self.mask
    }

    /// Steps completed since configuration or reset
    pub fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Obstacle masks ignored because of a shape mismatch
    pub fn rejected_mask_updates(&self) -> u64 {
        self.rejected_masks
    }

    /// Owned copy of the fields, safe to hand to another thread
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot::capture(self)
    }

    /// Aggregate diagnostics of the current fields
    pub fn statistics(&self) -> FlowStatistics {
        FlowStatistics::compute(self)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), String> {
    if width == 0 || height == 0 {
        return Err(format!(
            "Grid dimensions must be positive, got {}x{}",
            width, height
        ));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_grid() {
        assert!(FluidSolver::new(0, 10, 0.02).is_err());
        assert!(FluidSolver::new(10, 0, 0.02).is_err());
    }

    #[test]
    fn test_new_is_at_rest() {
        let solver = FluidSolver::new(8, 5, 0.02).unwrap();

        assert_eq!(solver.width(), 8);
        assert_eq!(solver.height(), 5);
        assert_eq!(solver.density().dim(), (5, 8));
        assert!(solver.density().iter().all(|&rho| rho == 1.0));
        assert!(solver.velocity_x().iter().all(|&u| u == 0.0));
        assert_eq!(solver.steps_taken(), 0);
    }

    #[test]
    fn test_set_viscosity_recomputes_relaxation() {
        let mut solver = FluidSolver::new(4, 4, 0.02).unwrap();
        assert!((solver.relaxation() - 1.0 / 0.56).abs() < 1e-12);

        solver.set_viscosity(0.5);
        assert_eq!(solver.viscosity(), 0.5);
        assert!((solver.relaxation() - 0.5).abs() < 1e-12);

        // Not clamped: out-of-range values are the caller's responsibility
        solver.set_viscosity(-0.1);
        assert!(solver.relaxation() > 2.0);
    }

    #[test]
    fn test_configure_reallocates() {
        let mut solver = FluidSolver::new(4, 4, 0.02).unwrap();
        solver.advance(0.1, 3);

        solver.configure(6, 3, 0.05).unwrap();

        assert_eq!(solver.density().dim(), (3, 6));
        assert_eq!(solver.lattice().populations.len(), 6 * 3 * 9);
        assert_eq!(solver.obstacle_mask().len(), 18);
        assert_eq!(solver.steps_taken(), 0);
        assert_eq!(solver.viscosity(), 0.05);
    }

    #[test]
    fn test_configure_error_keeps_solver() {
        let mut solver = FluidSolver::new(4, 4, 0.02).unwrap();
        assert!(solver.configure(0, 3, 0.05).is_err());
        assert_eq!(solver.width(), 4);
    }

    #[test]
    fn test_mask_length_mismatch_is_ignored() {
        let mut solver = FluidSolver::new(4, 3, 0.02).unwrap();
        let mut cells = vec![false; 12];
        cells[5] = true;
        assert!(solver.set_obstacle_mask(&cells));

        assert!(!solver.set_obstacle_mask(&[true; 11]));
        assert!(!solver.set_obstacles(ObstacleMask::empty(3, 4)));

        assert_eq!(solver.rejected_mask_updates(), 2);
        assert_eq!(solver.obstacle_mask().solid_count(), 1);
        assert!(solver.obstacle_mask().is_solid(1, 1));
    }

    #[test]
    fn test_mask_injection_rests_solid_cells() {
        let mut solver = FluidSolver::new(12, 6, 0.05).unwrap();
        solver.advance(0.1, 10);
        assert!(solver.velocity_x()[[3, 6]] != 0.0);

        let mut mask = ObstacleMask::empty(12, 6);
        mask.fill_rect(5, 2, 3, 2);
        assert!(solver.set_obstacles(mask));

        assert_eq!(solver.velocity_x()[[3, 6]], 0.0);
        assert_eq!(solver.density()[[3, 6]], 1.0);
    }

    #[test]
    fn test_step_counts_and_reset() {
        let mut solver = FluidSolver::new(6, 6, 0.05).unwrap();
        solver.advance(0.05, 4);
        assert_eq!(solver.steps_taken(), 4);

        solver.reset();
        assert_eq!(solver.steps_taken(), 0);
        assert!(solver.velocity_x().iter().all(|&u| u == 0.0));
    }

    #[test]
    fn test_speed_field() {
        let mut solver = FluidSolver::new(10, 4, 0.05).unwrap();
        solver.advance(0.1, 5);

        let speed = solver.speed();
        let v = solver.velocity(2, 1);
        assert!((speed[[1, 2]] - v.norm()).abs() < 1e-15);
        assert!(speed.iter().all(|&s| s <= VELOCITY_CEILING + 1e-12));
    }
}
