//! lattice-flow: 2D Wind Tunnel Simulation
//!
//! A D2Q9 lattice Boltzmann solver for flow around arbitrary obstacles, with
//! a streamline tracer for visualizing the resulting velocity field.
//!
//! # Architecture
//!
//! lattice-flow is built on two core principles:
//!
//! 1. **Separation of State and Numerics**
//!    - The lattice holds populations and macroscopic fields (what evolves)
//!    - The solver streams and collides them (how it evolves)
//!
//! 2. **Read-only consumers**
//!    - The tracer and the output functions only borrow fields
//!    - Snapshots hand owned copies to other threads
//!
//! # Quick Start
//!
//! ```rust
//! use lattice_flow::prelude::*;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Configure the wind tunnel
//! let config = SimulationConfig::wind_tunnel(120, 40)
//!     .viscosity(0.02)
//!     .inlet_speed(0.1);
//! let mut simulation = Simulation::from_config(config)?;
//!
//! // 2. Drop a cylinder in the flow
//! let mut mask = ObstacleMask::empty(120, 40);
//! mask.fill_circle(30.0, 20.0, 6.0);
//! simulation.set_obstacles(mask);
//!
//! // 3. Run a few frames
//! for _ in 0..20 {
//!     simulation.advance_frame();
//! }
//!
//! // 4. Trace streamlines
//! let tracer = simulation.tracer(TracerConfig::default())?;
//! let lines = tracer.trace_all();
//! println!("{} streamlines after {} steps", lines.len(), simulation.solver().steps_taken());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`lattice`]: D2Q9 velocity set and lattice state
//! - [`obstacle`]: Obstacle masks
//! - [`solver`]: Streaming / collision solver, configuration and driver
//! - [`streamline`]: Streamline tracer
//! - [`output`]: CSV export and plots
//!
//! # Logging
//!
//! The crate logs through the `log` facade and installs no logger. Mask
//! rejections and unstable parameters are reported at `warn` level.
//!
//! # Features
//!
//! - `parallel` (default): run each solver pass on the rayon pool for grids
//!   larger than [`solver::parallel_threshold`]

// Core modules
pub mod lattice;
pub mod obstacle;
pub mod solver;
pub mod streamline;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use lattice_flow::prelude::*;
    //! ```
    pub use crate::obstacle::ObstacleMask;
    pub use crate::solver::{
        FlowSnapshot, FlowStatistics, FluidSolver, Simulation, SimulationConfig,
    };
    pub use crate::streamline::{StreamlineTracer, TracerConfig, VelocityField};
}
