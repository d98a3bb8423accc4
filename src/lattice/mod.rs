//! Lattice state
//!
//! This module holds the data model of the simulation, independent of the
//! numerical passes that advance it:
//!
//! - **`d2q9`**: the D2Q9 velocity set (directions, weights, opposite pairs)
//!   and the equilibrium distribution
//! - **`state`**: [`LatticeState`], the two population buffers and the derived
//!   density / velocity fields
//!
//! The solver ([`crate::solver`]) owns a `LatticeState` and is the only code
//! that mutates it.
//!
//! # Example
//!
//! ```rust
//! use lattice_flow::lattice::{LatticeState, d2q9};
//!
//! let state = LatticeState::at_rest(16, 8);
//!
//! assert_eq!(state.cells(), 128);
//! assert_eq!(state.populations_at(0, 0), d2q9::WEIGHTS);
//! ```

pub mod d2q9;
pub mod state;

pub use d2q9::{equilibrium, equilibrium_set, relaxation_from_viscosity, Q};
pub use state::LatticeState;
