//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_fields;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_fields::{UniformField, VortexField};
pub use test_helpers::{cylinder_mask, max_speed, sealed_box, solver_with_mask};
