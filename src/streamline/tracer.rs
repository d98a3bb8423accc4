//! Forward-Euler streamline tracer

use std::iter::FusedIterator;

use nalgebra::{Point2, Vector2};

use super::VelocityField;

/// Speed below which a streamline is considered stagnant and stops
pub const STAGNATION_SPEED: f64 = 0.001;

// =================================================================================================
// Tracer configuration
// =================================================================================================

/// Tracing parameters
///
/// # Fields
///
/// - `step_size`: distance in cells travelled per integration step
/// - `seed_stride`: spacing in cells between seeds of [`StreamlineTracer::seeds`]
/// - `max_steps`: upper bound on the points of one streamline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerConfig {
    /// Distance per step, cells (default: 0.5)
    pub step_size: f64,

    /// Seed spacing, cells (default: 8)
    pub seed_stride: usize,

    /// Maximum points per streamline (default: 400)
    pub max_steps: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            step_size: 0.5,
            seed_stride: 8,
            max_steps: 400,
        }
    }
}

impl TracerConfig {
    /// Builder pattern: set step size
    pub fn step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Builder pattern: set seed stride
    pub fn seed_stride(mut self, seed_stride: usize) -> Self {
        self.seed_stride = seed_stride;
        self
    }

    /// Builder pattern: set maximum steps
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(format!(
                "Step size must be finite and positive, got {}",
                self.step_size
            ));
        }
        if self.seed_stride == 0 {
            return Err("Seed stride must be greater than 0".to_string());
        }
        Ok(())
    }
}

// =================================================================================================
// Tracer
// =================================================================================================

/// Streamline generator over a frozen velocity field
///
/// Borrowing the field for the tracer's lifetime guarantees no step runs
/// while lines are being traced.
#[derive(Debug)]
pub struct StreamlineTracer<'a, F: VelocityField + ?Sized> {
    field: &'a F,
    config: TracerConfig,
}

impl<F: VelocityField + ?Sized> Clone for StreamlineTracer<'_, F> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            config: self.config,
        }
    }
}

impl<'a, F: VelocityField + ?Sized> StreamlineTracer<'a, F> {
    /// Create a tracer after validating `config`
    pub fn new(field: &'a F, config: TracerConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { field, config })
    }

    /// Tracing parameters
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Lazily trace the streamline starting at `seed`
    ///
    /// The seed itself is not yielded. Tracing the same seed twice against
    /// the same field yields the same points.
    pub fn trace(&self, seed: Point2<f64>) -> Streamline<'a, F> {
        Streamline {
            field: self.field,
            position: seed,
            step_size: self.config.step_size,
            remaining: self.config.max_steps,
        }
    }

    /// Seed followed by every traced point
    pub fn polyline(&self, seed: Point2<f64>) -> Vec<Point2<f64>> {
        std::iter::once(seed).chain(self.trace(seed)).collect()
    }

    /// Regular seed grid, `seed_stride` cells apart and offset by half a stride
    pub fn seeds(&self) -> Vec<Point2<f64>> {
        let stride = self.config.seed_stride;
        let offset = stride as f64 / 2.0;

        (0..self.field.height())
            .step_by(stride)
            .flat_map(|y| {
                (0..self.field.width())
                    .step_by(stride)
                    .map(move |x| Point2::new(x as f64 + offset, y as f64 + offset))
            })
            .filter(|seed| self.contains(seed))
            .collect()
    }

    /// One polyline per seed that moves at least one step
    pub fn trace_all(&self) -> Vec<Vec<Point2<f64>>> {
        let lines: Vec<_> = self
            .seeds()
            .into_iter()
            .map(|seed| self.polyline(seed))
            .filter(|line| line.len() > 1)
            .collect();

        log::trace!("Traced {} streamlines", lines.len());
        lines
    }

    fn contains(&self, p: &Point2<f64>) -> bool {
        inside(self.field, p)
    }
}

fn inside<F: VelocityField + ?Sized>(field: &F, p: &Point2<f64>) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x < field.width() as f64 && p.y < field.height() as f64
}

// =================================================================================================
// Streamline iterator
// =================================================================================================

/// Points of one streamline, produced on demand
///
/// Each step: stop if the position is outside the grid or in a solid cell,
/// sample the velocity, stop if the flow is stagnant, move `step_size` along
/// the flow direction, stop if that leaves the grid, otherwise yield the new
/// position. At most `max_steps` points are yielded.
#[derive(Debug)]
pub struct Streamline<'a, F: VelocityField + ?Sized> {
    field: &'a F,
    position: Point2<f64>,
    step_size: f64,
    remaining: usize,
}

impl<F: VelocityField + ?Sized> Clone for Streamline<'_, F> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            position: self.position,
            step_size: self.step_size,
            remaining: self.remaining,
        }
    }
}

impl<F: VelocityField + ?Sized> Streamline<'_, F> {
    /// Last position reached (the seed before the first step)
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    fn advance(&self) -> Option<Point2<f64>> {
        let p = self.position;
        if !inside(self.field, &p) || self.field.is_solid(p.x as usize, p.y as usize) {
            return None;
        }

        let velocity: Vector2<f64> = self.field.sample(&p);
        let speed = velocity.norm();
        if !(speed >= STAGNATION_SPEED) {
            return None;
        }

        let next = p + velocity * (self.step_size / speed);
        inside(self.field, &next).then_some(next)
    }
}

impl<F: VelocityField + ?Sized> Iterator for Streamline<'_, F> {
    type Item = Point2<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.advance() {
            Some(next) => {
                self.remaining -= 1;
                self.position = next;
                Some(next)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<F: VelocityField + ?Sized> FusedIterator for Streamline<'_, F> {}

// =================================================================================================
// Tests
// =================================================================================================
