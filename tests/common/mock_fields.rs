//! Analytic velocity fields for tracer tests

use lattice_flow::streamline::VelocityField;
use ndarray::Array2;

/// Constant velocity everywhere, optionally with solid cells
pub struct UniformField {
    pub ux: Array2<f64>,
    pub uy: Array2<f64>,
    pub solid: Array2<bool>,
}

impl UniformField {
    pub fn new(width: usize, height: usize, ux: f64, uy: f64) -> Self {
        Self {
            ux: Array2::from_elem((height, width), ux),
            uy: Array2::from_elem((height, width), uy),
            solid: Array2::from_elem((height, width), false),
        }
    }

    pub fn with_solid_block(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        for y in y0..y1 {
            for x in x0..x1 {
                self.solid[[y, x]] = true;
            }
        }
        self
    }
}

impl VelocityField for UniformField {
    fn width(&self) -> usize {
        self.ux.ncols()
    }

    fn height(&self) -> usize {
        self.ux.nrows()
    }

    fn velocity_x(&self) -> &Array2<f64> {
        &self.ux
    }

    fn velocity_y(&self) -> &Array2<f64> {
        &self.uy
    }

    fn is_solid(&self, x: usize, y: usize) -> bool {
        self.solid.get((y, x)).copied().unwrap_or(false)
    }
}

/// Rigid counter-clockwise rotation around the grid center
///
/// u = omega * (-(y - cy), x - cx). The field is linear, so bilinear
/// sampling reproduces it exactly away from the top row.
pub struct VortexField {
    pub center: (f64, f64),
    ux: Array2<f64>,
    uy: Array2<f64>,
}

impl VortexField {
    pub fn new(size: usize, omega: f64) -> Self {
        let c = (size / 2) as f64;
        Self {
            center: (c, c),
            ux: Array2::from_shape_fn((size, size), |(y, _)| -omega * (y as f64 - c)),
            uy: Array2::from_shape_fn((size, size), |(_, x)| omega * (x as f64 - c)),
        }
    }
}

impl VelocityField for VortexField {
    fn width(&self) -> usize {
        self.ux.ncols()
    }

    fn height(&self) -> usize {
        self.ux.nrows()
    }

    fn velocity_x(&self) -> &Array2<f64> {
        &self.ux
    }

    fn velocity_y(&self) -> &Array2<f64> {
        &self.uy
    }

    fn is_solid(&self, _x: usize, _y: usize) -> bool {
        false
    }
}
