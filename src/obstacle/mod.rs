//! Obstacle masks
//!
//! An [`ObstacleMask`] marks which lattice cells are solid. Masks are built
//! outside the solver (typically by thresholding the grayscale intensity of
//! an image, or from primitive shapes) and injected with
//! [`FluidSolver::set_obstacles`](crate::solver::FluidSolver::set_obstacles)
//! or [`FluidSolver::set_obstacle_mask`](crate::solver::FluidSolver::set_obstacle_mask).
//!
//! # Example
//!
//! ```rust
//! use lattice_flow::obstacle::ObstacleMask;
//!
//! // 4x2 grayscale image: black pixels become walls
//! let pixels = [255, 0, 0, 255,
//!               255, 255, 0, 255];
//! let mask = ObstacleMask::from_grayscale(4, 2, &pixels, 128).unwrap();
//!
//! assert_eq!(mask.solid_count(), 3);
//! ```

pub mod mask;

pub use mask::ObstacleMask;
