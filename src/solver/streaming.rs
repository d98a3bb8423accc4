//! Pass 1: streaming and boundary resolution
//!
//! Reads the current populations and the obstacle mask, writes the next
//! populations of every fluid cell. Solid cells are skipped; their
//! macroscopic values are forced during collision.
//!
//! Each cell's lane of the next buffer is written from shared reads only, so
//! the pass parallelizes over cells without synchronisation.

use ndarray::{Array3, ArrayViewMut1, Axis, Zip};

use crate::lattice::d2q9::{OPPOSITE, Q};
use crate::obstacle::ObstacleMask;
use crate::solver::boundary::{incoming, Incoming};

/// Stream `current` into `next`
///
/// `inlet` holds the nine equilibrium populations of the free stream
/// (density 1, velocity `(inlet_speed, 0)`), computed once per step.
pub(crate) fn stream(
    current: &Array3<f64>,
    next: &mut Array3<f64>,
    mask: &ObstacleMask,
    inlet: &[f64; Q],
) {
    let last_column = mask.width() - 1;

    let kernel = |(y, x): (usize, usize), mut lane: ArrayViewMut1<'_, f64>| {
        if mask.is_solid(x, y) {
            return;
        }

        for i in 0..Q {
            lane[i] = match incoming(x, y, i, mask) {
                Incoming::Neighbor { x: nx, y: ny } => current[[ny, nx, i]],
                Incoming::BounceBack => current[[y, x, OPPOSITE[i]]],
                Incoming::Inlet | Incoming::FreeStream => inlet[i],
                Incoming::Outlet => current[[y, last_column, i]],
            };
        }
    };

    let cells = Zip::indexed(next.lanes_mut(Axis(2)));

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::d2q9::{equilibrium_set, WEIGHTS};
    use crate::lattice::LatticeState;

    /// Lattice whose current populations encode (cell, direction) so that
    /// every pulled value identifies its source.
    fn tagged(width: usize, height: usize) -> LatticeState {
        let mut state = LatticeState::at_rest(width, height);
        state.populations = Array3::from_shape_fn((height, width, Q), |(y, x, i)| {
            ((y * width + x) * Q + i) as f64
        });
        state
    }

    fn tag(width: usize, x: usize, y: usize, i: usize) -> f64 {
        ((y * width + x) * Q + i) as f64
    }

    #[test]
    fn test_interior_advection() {
        let mut state = tagged(5, 5);
        let mask = ObstacleMask::empty(5, 5);
        let inlet = equilibrium_set(1.0, 0.1, 0.0);

        stream(&state.populations, &mut state.next, &mask, &inlet);

        // +x population at (2, 2) came from (1, 2)
        assert_eq!(state.next[[2, 2, 1]], tag(5, 1, 2, 1));
        // (-1, -1) population at (2, 2) came from (3, 3)
        assert_eq!(state.next[[2, 2, 7]], tag(5, 3, 3, 7));
        // rest population stays in place
        assert_eq!(state.next[[2, 2, 0]], tag(5, 2, 2, 0));
    }

    #[test]
    fn test_open_boundaries() {
        let mut state = tagged(4, 3);
        let mask = ObstacleMask::empty(4, 3);
        let inlet = equilibrium_set(1.0, 0.1, 0.0);

        stream(&state.populations, &mut state.next, &mask, &inlet);

        // Inlet on the left edge
        assert_eq!(state.next[[1, 0, 1]], inlet[1]);
        // Free stream on top and bottom edges
        assert_eq!(state.next[[0, 2, 2]], inlet[2]);
        assert_eq!(state.next[[2, 2, 4]], inlet[4]);
        // Outlet copies the rightmost column, same row and direction
        assert_eq!(state.next[[1, 3, 3]], tag(4, 3, 1, 3));
    }

    #[test]
    fn test_bounce_back_from_solid() {
        let mut state = tagged(3, 3);
        let mut mask = ObstacleMask::empty(3, 3);
        mask.set(1, 1, true);
        let inlet = equilibrium_set(1.0, 0.0, 0.0);

        stream(&state.populations, &mut state.next, &mask, &inlet);

        // (2, 1) would pull +x from the solid (1, 1): it gets its own -x instead
        assert_eq!(state.next[[1, 2, 1]], tag(3, 2, 1, 3));
        // (0, 0) would pull (-1, -1) from (1, 1): it gets its own (+1, +1)
        assert_eq!(state.next[[0, 0, 7]], tag(3, 0, 0, 5));
    }

    #[test]
    fn test_solid_cells_are_not_written() {
        let mut state = LatticeState::at_rest(3, 3);
        let mut mask = ObstacleMask::empty(3, 3);
        mask.set(1, 1, true);
        state.next.fill(-7.0);

        stream(&state.populations, &mut state.next, &mask, &WEIGHTS);

        assert!((0..Q).all(|i| state.next[[1, 1, i]] == -7.0));
        assert!((0..Q).all(|i| state.next[[0, 0, i]] != -7.0));
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        let mut mask = ObstacleMask::empty(40, 30);
        mask.fill_circle(12.0, 15.0, 4.0);
        let inlet = equilibrium_set(1.0, 0.12, 0.0);

        let mut sequential = tagged(40, 30);
        {
            let _guard = crate::solver::ThresholdGuard::save(usize::MAX);
            stream(&sequential.populations, &mut sequential.next, &mask, &inlet);
        }

        let mut parallel = tagged(40, 30);
        {
            let _guard = crate::solver::ThresholdGuard::save(1);
            stream(&parallel.populations, &mut parallel.next, &mask, &inlet);
        }

        assert_eq!(sequential.next, parallel.next);
    }
}
