//! Frame driver
//!
//! Hosts render at their own rate and want several solver steps per rendered
//! frame. [`Simulation`] keeps the inlet speed and batch size next to the
//! solver so the host only calls [`Simulation::advance_frame`].
//!
//! ```rust
//! use lattice_flow::solver::{Simulation, SimulationConfig};
//! use lattice_flow::streamline::TracerConfig;
//!
//! let config = SimulationConfig::wind_tunnel(80, 32).steps_per_frame(4);
//! let mut simulation = Simulation::from_config(config).unwrap();
//!
//! for _ in 0..5 {
//!     simulation.advance_frame();
//! }
//! assert_eq!(simulation.frames(), 5);
//! assert_eq!(simulation.solver().steps_taken(), 20);
//!
//! let tracer = simulation.tracer(TracerConfig::default()).unwrap();
//! let lines = tracer.trace_all();
//! assert!(!lines.is_empty());
//! ```

use crate::obstacle::ObstacleMask;
use crate::solver::config::SimulationConfig;
use crate::solver::fluid::FluidSolver;
use crate::solver::snapshot::FlowSnapshot;
use crate::streamline::{StreamlineTracer, TracerConfig};

/// Fluid solver driven in fixed batches of steps
#[derive(Debug, Clone)]
pub struct Simulation {
    solver: FluidSolver,
    config: SimulationConfig,
    frames: u64,
}

impl Simulation {
    /// Validate `config` and build the solver it describes
    pub fn from_config(config: SimulationConfig) -> Result<Self, String> {
        let solver = FluidSolver::from_config(&config)?;
        Ok(Self {
            solver,
            config,
            frames: 0,
        })
    }

    /// Run one frame worth of steps at the current inlet speed
    pub fn advance_frame(&mut self) {
        self.solver
            .advance(self.config.inlet_speed, self.config.steps_per_frame);
        self.frames += 1;

        log::trace!(
            "Frame {} done ({} steps total)",
            self.frames,
            self.solver.steps_taken()
        );
    }

    /// Change the free-stream speed used by subsequent frames
    pub fn set_inlet_speed(&mut self, inlet_speed: f64) {
        self.config.inlet_speed = inlet_speed;
    }

    /// Change the viscosity (see [`FluidSolver::set_viscosity`])
    pub fn set_viscosity(&mut self, viscosity: f64) {
        self.config.viscosity = viscosity;
        self.solver.set_viscosity(viscosity);
    }

    /// Change the number of steps per frame; zero is ignored
    pub fn set_steps_per_frame(&mut self, steps_per_frame: usize) {
        if steps_per_frame > 0 {
            self.config.steps_per_frame = steps_per_frame;
        }
    }

    /// Forward a flat mask to the solver (see [`FluidSolver::set_obstacle_mask`])
    pub fn set_obstacle_mask(&mut self, cells: &[bool]) -> bool {
        self.solver.set_obstacle_mask(cells)
    }

    /// Forward a mask to the solver (see [`FluidSolver::set_obstacles`])
    pub fn set_obstacles(&mut self, mask: ObstacleMask) -> bool {
        self.solver.set_obstacles(mask)
    }

    /// Re-create the solver on a new grid
    ///
    /// Viscosity and inlet speed are kept; the flow restarts from rest with
    /// no obstacles. On error nothing changes.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), String> {
        self.solver.configure(width, height, self.config.viscosity)?;
        self.config.width = width;
        self.config.height = height;
        self.frames = 0;

        log::debug!("Resized simulation to {}x{}", width, height);
        Ok(())
    }

    /// Frames advanced since construction or the last resize
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current parameters
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Underlying solver
    pub fn solver(&self) -> &FluidSolver {
        &self.solver
    }

    /// Owned copy of the current fields
    pub fn snapshot(&self) -> FlowSnapshot {
        self.solver.snapshot()
    }

    /// Streamline tracer over the current fields
    pub fn tracer(&self, config: TracerConfig) -> Result<StreamlineTracer<'_, FluidSolver>, String> {
        StreamlineTracer::new(&self.solver, config)
    }
}
