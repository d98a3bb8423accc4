//! Pass 2: moments, velocity clamp and BGK collision
//!
//! # Algorithm
//!
//! For every fluid cell of the next buffer:
//!
//! 1. ρ = Σ f_i, momentum = Σ f_i e_i
//! 2. u = momentum / ρ (division skipped when ρ ≤ 0)
//! 3. if |u| > [`VELOCITY_CEILING`], rescale u to exactly the ceiling
//! 4. store ρ, ux, uy into the macroscopic fields
//! 5. f_i ← (1 - ω) f_i + ω feq_i(ρ, u)
//!
//! Solid cells store ρ = 1 and u = 0 and are not relaxed.
//!
//! The clamp is the only stabilisation: a blow-up shows up as a flow field
//! saturated at the ceiling, never as an error.

use ndarray::{Array2, Array3, ArrayViewMut1, Axis, Zip};

use crate::lattice::d2q9::{equilibrium, DIRECTIONS, Q};
use crate::obstacle::ObstacleMask;

/// Maximum speed (lattice units) a cell may report after a step
pub const VELOCITY_CEILING: f64 = 0.35;

/// Relax the next buffer in place and refresh the macroscopic fields
pub(crate) fn collide(
    next: &mut Array3<f64>,
    density: &mut Array2<f64>,
    velocity_x: &mut Array2<f64>,
    velocity_y: &mut Array2<f64>,
    mask: &ObstacleMask,
    omega: f64,
) {
    let kernel = |mut f: ArrayViewMut1<'_, f64>,
                  rho_out: &mut f64,
                  ux_out: &mut f64,
                  uy_out: &mut f64,
                  &solid: &bool| {
        if solid {
            *rho_out = 1.0;
            *ux_out = 0.0;
            *uy_out = 0.0;
            return;
        }

        let mut rho = 0.0;
        let mut mx = 0.0;
        let mut my = 0.0;
        for i in 0..Q {
            let fi = f[i];
            rho += fi;
            mx += fi * DIRECTIONS[i][0] as f64;
            my += fi * DIRECTIONS[i][1] as f64;
        }

        let (mut ux, mut uy) = if rho > 0.0 { (mx / rho, my / rho) } else { (mx, my) };

        let speed = (ux * ux + uy * uy).sqrt();
        if speed > VELOCITY_CEILING {
            let scale = VELOCITY_CEILING / speed;
            ux *= scale;
            uy *= scale;
        }

        *rho_out = rho;
        *ux_out = ux;
        *uy_out = uy;

        for i in 0..Q {
            f[i] = (1.0 - omega) * f[i] + omega * equilibrium(i, rho, ux, uy);
        }
    };

    let cells = Zip::from(next.lanes_mut(Axis(2)))
        .and(density)
        .and(velocity_x)
        .and(velocity_y)
        .and(mask.cells());

    if mask.len() > crate::solver::parallel_threshold() {
        #[cfg(feature = "parallel")]
        cells.par_for_each(kernel);
        #[cfg(not(feature = "parallel"))]
        cells.for_each(kernel);
    } else {
        cells.for_each(kernel);
    }
}

// =================================================================================================
// Tests
// =================================================================================================
