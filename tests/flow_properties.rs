//! Integration tests: physical properties of the fluid solver
//!
//! These tests run the full step (streaming, boundaries, collision, clamp)
//! and check properties that must hold regardless of implementation details.

use approx::assert_abs_diff_eq;

use lattice_flow::obstacle::ObstacleMask;
use lattice_flow::solver::{check_finite, FluidSolver, Simulation, SimulationConfig, VELOCITY_CEILING};

mod common;
use common::{cylinder_mask, max_speed, sealed_box, solver_with_mask};

// =================================================================================================
// Equilibrium and momentum
// =================================================================================================

#[test]
fn test_rest_is_a_fixed_point() {
    let mut solver = solver_with_mask(0.02, cylinder_mask(30, 20, 10.0, 10.0, 4.0));

    solver.advance(0.0, 100);

    for ((y, x), &rho) in solver.density().indexed_iter() {
        assert_abs_diff_eq!(rho, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(solver.velocity_x()[[y, x]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(solver.velocity_y()[[y, x]], 0.0, epsilon = 1e-12);
    }

    let stats = solver.statistics();
    assert_abs_diff_eq!(stats.total_mass, stats.fluid_cells as f64, epsilon = 1e-9);
}

#[test]
fn test_momentum_enters_from_the_inlet() {
    let mut solver = FluidSolver::new(60, 40, 0.05).unwrap();

    solver.advance(0.1, 10);

    // Middle row: flow has started near the inlet but not far downstream
    let near = solver.velocity_x()[[20, 2]];
    let far = solver.velocity_x()[[20, 40]];
    assert!(near > 0.01, "ux near inlet = {}", near);
    assert!(near > far, "near {} vs far {}", near, far);
}

#[test]
fn test_small_tunnel_converges_to_free_stream() {
    let mut solver = FluidSolver::new(10, 10, 0.04).unwrap();

    solver.advance(0.1, 50);

    let ux = solver.velocity_x()[[5, 9]];
    assert!(ux > 0.03 && ux < 0.2, "ux at outlet column = {}", ux);

    // Rows next to the free-stream edges carry the inlet speed to the outlet
    let outlet_max = solver
        .velocity_x()
        .column(9)
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(
        (0.08..=0.1).contains(&outlet_max),
        "max ux at outlet column = {}",
        outlet_max
    );
    assert!(
        solver.velocity_y().iter().all(|uy| uy.abs() < 0.05),
        "vertical velocity should stay small"
    );
    check_finite(&solver).unwrap();
}

#[test]
fn test_flow_is_mirror_symmetric_without_obstacles() {
    let mut solver = FluidSolver::new(16, 10, 0.04).unwrap();

    solver.advance(0.1, 40);

    let (ux, uy) = (solver.velocity_x(), solver.velocity_y());
    for y in 0..5 {
        let mirror = 9 - y;
        for x in 0..16 {
            assert_abs_diff_eq!(ux[[y, x]], ux[[mirror, x]], epsilon = 1e-10);
            assert_abs_diff_eq!(uy[[y, x]], -uy[[mirror, x]], epsilon = 1e-10);
        }
    }
}

// =================================================================================================
// Walls
// =================================================================================================

#[test]
fn test_sealed_enclosure_stays_at_rest() {
    let mask = sealed_box(40, 24, 12, 6, 25, 17);
    let mut solver = solver_with_mask(0.04, mask);

    solver.advance(0.15, 150);

    // Outside the box the flow runs
    assert!(solver.velocity_x()[[2, 5]] > 0.01);

    // Inside it never moves
    for y in 7..17 {
        for x in 13..25 {
            assert_eq!(solver.velocity_x()[[y, x]], 0.0, "ux at ({}, {})", x, y);
            assert_eq!(solver.velocity_y()[[y, x]], 0.0, "uy at ({}, {})", x, y);
            assert_abs_diff_eq!(solver.density()[[y, x]], 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_obstacles_report_rest_after_every_step() {
    let mut solver = solver_with_mask(0.03, cylinder_mask(50, 24, 15.0, 12.0, 5.0));

    for _ in 0..20 {
        solver.step(0.12);

        let mask = solver.obstacle_mask().clone();
        for ((y, x), &solid) in mask.cells().indexed_iter() {
            if solid {
                assert_eq!(solver.density()[[y, x]], 1.0);
                assert_eq!(solver.velocity_x()[[y, x]], 0.0);
                assert_eq!(solver.velocity_y()[[y, x]], 0.0);
            }
        }
    }
}

#[test]
fn test_cylinder_slows_the_wake() {
    let mut solver = solver_with_mask(0.05, cylinder_mask(80, 41, 20.0, 20.5, 6.0));

    solver.advance(0.1, 400);

    // Just behind the cylinder vs the same column near the edge
    let wake = solver.velocity_x()[[20, 28]];
    let free = solver.velocity_x()[[2, 28]];
    assert!(wake < free, "wake {} should be slower than free stream {}", wake, free);
}

// =================================================================================================
// Stability
// =================================================================================================

#[test]
fn test_speed_never_exceeds_ceiling() {
    for &inlet in &[0.0, 0.1, 0.2, 0.35, 0.5] {
        let mut solver = solver_with_mask(0.1, cylinder_mask(24, 12, 8.0, 6.0, 2.5));

        for step in 0..80 {
            solver.step(inlet);
            let speed = max_speed(&solver);
            assert!(
                speed <= VELOCITY_CEILING + 1e-12,
                "inlet {}: speed {} after step {}",
                inlet,
                speed,
                step
            );
        }
    }
}

#[test]
fn test_non_positive_viscosity_does_not_crash() {
    let mut solver = FluidSolver::new(12, 8, 0.02).unwrap();
    solver.set_viscosity(-0.1);

    solver.advance(0.1, 20);

    // Clamped, possibly garbage, never a panic
    assert_eq!(solver.steps_taken(), 20);
}

// =================================================================================================
// Mask handling
// =================================================================================================

#[test]
fn test_wrong_length_mask_is_ignored() {
    let mut solver = solver_with_mask(0.02, cylinder_mask(20, 10, 5.0, 5.0, 2.0));
    let before = solver.obstacle_mask().clone();

    assert!(!solver.set_obstacle_mask(&[true; 199]));
    assert!(!solver.set_obstacle_mask(&[true; 201]));
    assert!(!solver.set_obstacles(ObstacleMask::empty(10, 20)));

    assert_eq!(solver.obstacle_mask(), &before);
    assert_eq!(solver.rejected_mask_updates(), 3);
}

#[test]
fn test_mask_from_image_threshold() {
    // Dark square in a light 12x8 image
    let pixels: Vec<u8> = (0..96)
        .map(|i| {
            let (x, y) = (i % 12, i / 12);
            if (4..8).contains(&x) && (2..6).contains(&y) { 10 } else { 240 }
        })
        .collect();
    let mask = ObstacleMask::from_grayscale(12, 8, &pixels, 128).unwrap();

    let mut solver = FluidSolver::new(12, 8, 0.05).unwrap();
    assert!(solver.set_obstacles(mask));
    assert_eq!(solver.obstacle_mask().solid_count(), 16);
    assert!(solver.obstacle_mask().is_solid(5, 3));
}

// =================================================================================================
// Determinism
// =================================================================================================

#[test]
fn test_identical_runs_are_bit_identical() {
    let run = || {
        let mut solver = solver_with_mask(0.03, cylinder_mask(48, 20, 12.0, 10.0, 3.0));
        for step in 0..60 {
            solver.step(if step < 30 { 0.08 } else { 0.12 });
        }
        solver
    };

    let (a, b) = (run(), run());
    assert_eq!(a.density(), b.density());
    assert_eq!(a.velocity_x(), b.velocity_x());
    assert_eq!(a.velocity_y(), b.velocity_y());
}

#[test]
fn test_driver_matches_manual_stepping() {
    let config = SimulationConfig::wind_tunnel(30, 12)
        .viscosity(0.04)
        .inlet_speed(0.09)
        .steps_per_frame(5);
    let mut simulation = Simulation::from_config(config).unwrap();
    let mut solver = FluidSolver::new(30, 12, 0.04).unwrap();

    for _ in 0..4 {
        simulation.advance_frame();
    }
    solver.advance(0.09, 20);

    assert_eq!(simulation.snapshot(), solver.snapshot());
}
