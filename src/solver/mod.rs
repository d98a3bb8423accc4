//! Lattice Boltzmann solver
//!
//! This module advances the D2Q9 populations of a rectangular wind tunnel
//! around arbitrary obstacles, and exposes the resulting density and velocity
//! fields.
//!
//! # Core Concepts
//!
//! ## One step, two passes
//!
//! ```text
//! ┌──────────────────┐   ┌─────────────────────┐   ┌──────────────┐
//! │ Pass 1: stream   │ → │ Pass 2: collide     │ → │ swap buffers │
//! │ current → next   │   │ next → next, ρ, u   │   │              │
//! │ (walls, inlet,   │   │ (moments, clamp,    │   │              │
//! │  outlet)         │   │  BGK relaxation)    │   │              │
//! └──────────────────┘   └─────────────────────┘   └──────────────┘
//! ```
//!
//! Pass 1 finishes for every cell before pass 2 starts. Within a pass each
//! cell only writes its own slot, so the pass can run on the rayon pool.
//!
//! ## Domain edges
//!
//! - left: inlet at the free-stream equilibrium
//! - right: zero-gradient outlet
//! - top / bottom: free stream (same as the inlet)
//! - obstacle cells: full-way bounce-back (no-slip)
//!
//! See [`boundary`] for the exact resolution order.
//!
//! # Module Organization
//!
//! - **`fluid`**: [`FluidSolver`], the owner of the lattice and the mask
//! - **`boundary`**: source classification for the streaming pass
//! - **`config`**: [`SimulationConfig`]
//! - **`driver`**: [`Simulation`], frame batching on top of the solver
//! - **`snapshot`**: [`FlowSnapshot`], owned copies of the fields
//! - **`diagnostics`**: [`FlowStatistics`] and [`check_finite`]
//!
//! # Quick Start Example
//!
//! ```rust
//! use lattice_flow::solver::{FluidSolver, check_finite};
//! use lattice_flow::obstacle::ObstacleMask;
//!
//! let mut solver = FluidSolver::new(100, 40, 0.02)?;
//!
//! let mut mask = ObstacleMask::empty(100, 40);
//! mask.fill_circle(25.0, 20.0, 5.0);
//! solver.set_obstacles(mask);
//!
//! solver.advance(0.1, 100);
//! check_finite(&solver)?;
//!
//! let stats = solver.statistics();
//! println!("max speed {:.3}, mass {:.1}", stats.max_speed, stats.total_mass);
//! # Ok::<(), String>(())
//! ```
//!
//! # Error Handling
//!
//! Configuration methods return `Result<T, String>`. Stepping never fails:
//! unstable parameters are clamped by the velocity ceiling rather than
//! reported, and [`check_finite`] is available to callers who want a hard
//! check.

// =================================================================================================
// Module Declarations
// =================================================================================================
pub mod boundary;
mod collision;
mod config;
mod diagnostics;
mod driver;
mod fluid;
mod snapshot;
mod streaming;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks, tests) without a lock on every pass. Relaxed ordering
// is sufficient: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of cells above which a pass runs on the rayon pool.
///
/// Each cell does a few dozen flops per pass, so small grids are faster
/// sequentially than after paying rayon's dispatch cost.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Both passes of [`FluidSolver::step`] iterate sequentially on grids with at
/// most this many cells, and switch to rayon above it when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use lattice_flow::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use lattice_flow::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Holds a process-wide lock for its lifetime, so tests that change the
/// threshold run one at a time.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use collision::VELOCITY_CEILING;
pub use config::{DEFAULT_STEPS_PER_FRAME, RECOMMENDED_MAX_INLET_SPEED, SimulationConfig};
pub use diagnostics::{FlowStatistics, check_finite};
pub use driver::Simulation;
pub use fluid::FluidSolver;
pub use snapshot::FlowSnapshot;

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 4096);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = {
            let guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
            guard.previous
        };
        // Guard dropped: the next guard must see the restored value
        let guard = ThresholdGuard::save(7);
        assert_eq!(guard.previous, before);
    }

    #[test]
    fn test_threshold_is_visible_across_threads() {
        use std::thread;

        let _guard = ThresholdGuard::save(1234);

        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(parallel_threshold))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1234);
        }
    }

    #[test]
    fn test_parallel_step_is_bit_identical() {
        let run = |threshold: usize| {
            let _guard = ThresholdGuard::save(threshold);
            let mut solver = FluidSolver::new(64, 24, 0.03).unwrap();
            let mut mask = crate::obstacle::ObstacleMask::empty(64, 24);
            mask.fill_circle(16.0, 12.0, 4.0);
            solver.set_obstacles(mask);
            solver.advance(0.12, 30);
            solver.snapshot()
        };

        assert_eq!(run(usize::MAX), run(1));
    }
}
