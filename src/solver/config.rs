//! Simulation configuration
//!
//! # Design
//!
//! A plain configuration object with public fields, named constructors and a
//! consuming builder, validated once before a solver is built from it:
//!
//! ```rust
//! use lattice_flow::solver::SimulationConfig;
//!
//! let config = SimulationConfig::wind_tunnel(160, 60)
//!     .viscosity(0.03)
//!     .inlet_speed(0.08)
//!     .steps_per_frame(8);
//!
//! assert!(config.validate().is_ok());
//! assert!((config.relaxation() - 1.0 / 0.59).abs() < 1e-12);
//! ```

use crate::lattice::d2q9::relaxation_from_viscosity;

/// Inlet speed above which the run is likely to hit the velocity clamp
pub const RECOMMENDED_MAX_INLET_SPEED: f64 = 0.2;

/// Default number of solver steps per rendered frame
pub const DEFAULT_STEPS_PER_FRAME: usize = 6;

// =================================================================================================
// Simulation configuration
// =================================================================================================

/// Parameters of one wind-tunnel run
///
/// # Fields
///
/// - `width`, `height`: grid size in cells (fixed for the solver's lifetime)
/// - `viscosity`: kinematic viscosity in lattice units
/// - `inlet_speed`: free-stream speed imposed on the left, top and bottom edges
/// - `steps_per_frame`: solver steps advanced by each driver frame
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Grid width in cells (default: 200)
    pub width: usize,

    /// Grid height in cells (default: 80)
    pub height: usize,

    /// Kinematic viscosity, lattice units (default: 0.02)
    pub viscosity: f64,

    /// Inlet / free-stream speed, lattice units (default: 0.1)
    pub inlet_speed: f64,

    /// Steps per frame (default: 6)
    pub steps_per_frame: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 80,
            viscosity: 0.02,
            inlet_speed: 0.1,
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
        }
    }
}

impl SimulationConfig {
    /// Default parameters on a `width x height` grid
    pub fn wind_tunnel(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Builder pattern: set viscosity
    pub fn viscosity(mut self, viscosity: f64) -> Self {
        self.viscosity = viscosity;
        self
    }

    /// Builder pattern: set inlet speed
    pub fn inlet_speed(mut self, inlet_speed: f64) -> Self {
        self.inlet_speed = inlet_speed;
        self
    }

    /// Builder pattern: set steps per frame
    pub fn steps_per_frame(mut self, steps_per_frame: usize) -> Self {
        self.steps_per_frame = steps_per_frame;
        self
    }

    /// Number of cells
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// BGK relaxation coefficient ω derived from the viscosity
    pub fn relaxation(&self) -> f64 {
        relaxation_from_viscosity(self.viscosity)
    }

    /// Validate that parameters describe a runnable simulation
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Grid dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if !self.viscosity.is_finite() || self.viscosity <= 0.0 {
            return Err(format!(
                "Viscosity must be finite and positive, got {}",
                self.viscosity
            ));
        }
        if !self.inlet_speed.is_finite() {
            return Err(format!("Inlet speed is not finite: {}", self.inlet_speed));
        }
        if self.steps_per_frame == 0 {
            return Err("Steps per frame must be greater than 0".to_string());
        }

        if self.inlet_speed.abs() > RECOMMENDED_MAX_INLET_SPEED {
            log::warn!(
                "Inlet speed {} exceeds {}: expect the velocity clamp to dominate the flow",
                self.inlet_speed,
                RECOMMENDED_MAX_INLET_SPEED
            );
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
