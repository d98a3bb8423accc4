//! Lattice state: population buffers and macroscopic fields
//!
//! # Layout
//!
//! All arrays are row-major `ndarray` arrays indexed `[[y, x]]` (populations
//! `[[y, x, i]]`), so the flat cell index of `(x, y)` is `y * width + x`:
//!
//! - `populations` / `next`: `(height, width, Q)`
//! - `density`, `velocity_x`, `velocity_y`: `(height, width)`
//!
//! Streaming is not in-place: pass 1 reads `populations` and writes `next`,
//! then the two buffers trade places with [`LatticeState::swap_buffers`].

use ndarray::{s, Array2, Array3};

use super::d2q9::{Q, WEIGHTS};

/// Populations and derived macroscopic fields of one rectangular grid
#[derive(Debug, Clone)]
pub struct LatticeState {
    width: usize,
    height: usize,

    /// Current populations (read by streaming)
    pub(crate) populations: Array3<f64>,

    /// Next populations (written by streaming, relaxed by collision)
    pub(crate) next: Array3<f64>,

    /// Density ρ per cell
    pub(crate) density: Array2<f64>,

    /// Velocity x component per cell
    pub(crate) velocity_x: Array2<f64>,

    /// Velocity y component per cell
    pub(crate) velocity_y: Array2<f64>,
}

impl LatticeState {
    /// Allocate a grid at rest equilibrium (ρ = 1, u = 0 everywhere)
    ///
    /// Dimensions are not validated here; the solver rejects empty grids
    /// before allocating.
    pub fn at_rest(width: usize, height: usize) -> Self {
        let populations = Array3::from_shape_fn((height, width, Q), |(_, _, i)| WEIGHTS[i]);

        Self {
            width,
            height,
            next: populations.clone(),
            populations,
            density: Array2::from_elem((height, width), 1.0),
            velocity_x: Array2::zeros((height, width)),
            velocity_y: Array2::zeros((height, width)),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Density field
    pub fn density(&self) -> &Array2<f64> {
        &self.density
    }

    /// Velocity x field
    pub fn velocity_x(&self) -> &Array2<f64> {
        &self.velocity_x
    }

    /// Velocity y field
    pub fn velocity_y(&self) -> &Array2<f64> {
        &self.velocity_y
    }

    /// Current populations of one cell
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the grid.
    pub fn populations_at(&self, x: usize, y: usize) -> [f64; Q] {
        std::array::from_fn(|i| self.populations[[y, x, i]])
    }

    /// Put one cell back to rest equilibrium in both buffers
    pub(crate) fn rest_cell(&mut self, x: usize, y: usize) {
        for buffer in [&mut self.populations, &mut self.next] {
            buffer
                .slice_mut(s![y, x, ..])
                .iter_mut()
                .zip(WEIGHTS.iter())
                .for_each(|(f, w)| *f = *w);
        }
        self.density[[y, x]] = 1.0;
        self.velocity_x[[y, x]] = 0.0;
        self.velocity_y[[y, x]] = 0.0;
    }

    /// Put the whole grid back to rest equilibrium
    pub(crate) fn reset(&mut self) {
        *self = Self::at_rest(self.width, self.height);
    }

    /// Exchange the current and next buffers
    ///
    /// Only the array handles move; no population is copied.
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.populations, &mut self.next);
    }
}

// =================================================================================================
// Tests
// =================================================================================================
