//! D2Q9 velocity set
//!
//! Nine discrete velocities on a square lattice: the rest direction, the four
//! axis directions and the four diagonals.
//!
//! ```text
//!   6   2   5
//!     \ | /
//!   3 - 0 - 1
//!     / | \
//!   7   4   8
//! ```
//!
//! The tables are plain `const` arrays indexed `0..Q`, so the hot loops of
//! the solver resolve every lookup at compile time.

/// Number of discrete directions
pub const Q: usize = 9;

/// Lattice velocity `e_i` of each direction, as `[ex, ey]`
pub const DIRECTIONS: [[i32; 2]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

/// Lattice weight `w_i` of each direction
pub const WEIGHTS: [f64; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// Index of the direction pointing the opposite way (used by bounce-back)
pub const OPPOSITE: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// Equilibrium population of direction `i` for density `rho` and velocity `(ux, uy)`
///
/// Second-order expansion of the Maxwell-Boltzmann distribution:
///
/// ```text
/// feq_i = w_i * rho * (1 + 3 (e_i.u) + 4.5 (e_i.u)² - 1.5 |u|²)
/// ```
///
/// # Example
///
/// ```rust
/// use lattice_flow::lattice::d2q9::{equilibrium, WEIGHTS};
///
/// // At rest, the equilibrium is the lattice weight itself
/// assert_eq!(equilibrium(0, 1.0, 0.0, 0.0), WEIGHTS[0]);
/// ```
#[inline]
pub fn equilibrium(i: usize, rho: f64, ux: f64, uy: f64) -> f64 {
    let [ex, ey] = DIRECTIONS[i];
    let eu = ex as f64 * ux + ey as f64 * uy;
    let u2 = ux * ux + uy * uy;
    WEIGHTS[i] * rho * (1.0 + 3.0 * eu + 4.5 * eu * eu - 1.5 * u2)
}

/// All nine equilibrium populations for one macroscopic state
#[inline]
pub fn equilibrium_set(rho: f64, ux: f64, uy: f64) -> [f64; Q] {
    std::array::from_fn(|i| equilibrium(i, rho, ux, uy))
}

/// BGK relaxation coefficient for a kinematic viscosity in lattice units
///
/// `omega = 1 / (3 nu + 0.5)`. The scheme is only stable for `omega` in
/// `(0, 2)`, i.e. for a strictly positive viscosity; this function does not
/// check it.
#[inline]
pub fn relaxation_from_viscosity(viscosity: f64) -> f64 {
    1.0 / (3.0 * viscosity + 0.5)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_opposite_reverses_direction() {
        for i in 0..Q {
            let [ex, ey] = DIRECTIONS[i];
            let [ox, oy] = DIRECTIONS[OPPOSITE[i]];
            assert_eq!((ex, ey), (-ox, -oy), "direction {}", i);
            assert_eq!(OPPOSITE[OPPOSITE[i]], i);
            assert_eq!(WEIGHTS[i], WEIGHTS[OPPOSITE[i]]);
        }
    }

    #[test]
    fn test_equilibrium_recovers_moments() {
        let (rho, ux, uy) = (1.2, 0.08, -0.03);
        let feq = equilibrium_set(rho, ux, uy);

        let density: f64 = feq.iter().sum();
        let mx: f64 = (0..Q).map(|i| feq[i] * DIRECTIONS[i][0] as f64).sum();
        let my: f64 = (0..Q).map(|i| feq[i] * DIRECTIONS[i][1] as f64).sum();

        assert!((density - rho).abs() < 1e-12);
        assert!((mx - rho * ux).abs() < 1e-12);
        assert!((my - rho * uy).abs() < 1e-12);
    }

    #[test]
    fn test_relaxation_from_viscosity() {
        // nu = 0.04 -> omega = 1 / 0.62
        let omega = relaxation_from_viscosity(0.04);
        assert!((omega - 1.0 / 0.62).abs() < 1e-12);

        // nu -> 0 approaches the stability limit of 2
        assert!((relaxation_from_viscosity(0.0) - 2.0).abs() < 1e-15);
    }
}
