//! Example: Obstacles from a grayscale image
//!
//! Builds an 8-bit grayscale buffer in memory (a dark airfoil-like ellipse
//! and a thin plate on a white background), thresholds it into an obstacle
//! mask and swaps masks while the simulation is running.
//!
//! Any decoder that yields one byte per pixel, row-major, bottom row first,
//! can feed `ObstacleMask::from_grayscale` the same way.

use lattice_flow::prelude::*;

fn grayscale_scene(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = vec![255u8; width * height];

    let (cx, cy) = (width as f64 * 0.3, height as f64 * 0.5);
    let (a, b) = (width as f64 * 0.08, height as f64 * 0.07);

    for y in 0..height {
        for x in 0..width {
            let dx = (x as f64 + 0.5 - cx) / a;
            let dy = (y as f64 + 0.5 - cy) / b;
            let r2 = dx * dx + dy * dy;

            // Soft edge: values fade from black to white across the border
            let value = ((r2 - 0.8) / 0.4).clamp(0.0, 1.0) * 255.0;
            pixels[y * width + x] = value as u8;
        }
    }

    // Plate downstream, mid grey
    let plate_x = width * 3 / 5;
    for y in height / 3..2 * height / 3 {
        pixels[y * width + plate_x] = 60;
        pixels[y * width + plate_x + 1] = 60;
    }

    pixels
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Wind Tunnel - Obstacles from a Grayscale Image");
    println!("═══════════════════════════════════════════════════════\n");

    let (width, height) = (160, 60);
    let pixels = grayscale_scene(width, height);

    let mut simulation = Simulation::from_config(SimulationConfig::wind_tunnel(width, height))?;

    // ====== Threshold sweep ======

    println!("{:<12} {:>12}", "Threshold", "Solid cells");
    println!("{:-<25}", "");
    for threshold in [32u8, 128, 224] {
        let mask = ObstacleMask::from_grayscale(width, height, &pixels, threshold)?;
        println!("{:<12} {:>12}", threshold, mask.solid_count());
    }
    println!();

    // ====== Run with the mid threshold ======

    let mask = ObstacleMask::from_grayscale(width, height, &pixels, 128)?;
    simulation.set_obstacles(mask);
    for _ in 0..200 {
        simulation.advance_frame();
    }
    report("Ellipse + plate", &simulation);

    // ====== Remove the plate mid-run ======

    // The plate is mid grey, so a low threshold keeps only the dark core
    let without_plate = ObstacleMask::from_grayscale(width, height, &pixels, 32)?;
    simulation.set_obstacles(without_plate);
    for _ in 0..200 {
        simulation.advance_frame();
    }
    report("Ellipse core only", &simulation);

    // ====== A mask of the wrong size is rejected ======

    let wrong_size = ObstacleMask::empty(width / 2, height);
    let accepted = simulation.set_obstacles(wrong_size);
    println!(
        "\nMismatched mask accepted: {} (rejected updates: {})",
        accepted,
        simulation.solver().rejected_mask_updates()
    );

    Ok(())
}

fn report(label: &str, simulation: &Simulation) {
    let stats = simulation.solver().statistics();
    let lines = simulation
        .tracer(TracerConfig::default())
        .map(|tracer| tracer.trace_all().len())
        .unwrap_or(0);

    println!("{}:", label);
    println!("  solid cells : {}", stats.solid_cells);
    println!("  mean ρ      : {:.5}", stats.mean_density);
    println!("  max |u|     : {:.4}", stats.max_speed);
    println!("  streamlines : {}", lines);
}
