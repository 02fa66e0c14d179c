//! Headless marching-cubes driver
//!
//! Builds a noise field, extracts its polygon grid and reports what a
//! renderer would receive. `--regenerate` and `--sweep` exercise the two
//! re-entry points: new field, and new threshold on the same field.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use isosurface::mesh::wireframe_lines;
use isosurface::{IsoSurface, NoiseSource, StageTimer, SurfaceMesh};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = args.resolve().context("invalid configuration")?;
    tracing::info!(
        world_size = config.world_size,
        threshold = config.threshold,
        noise = %config.noise,
        parallel = config.parallel,
        "Starting marching cubes"
    );

    let mut timer = StageTimer::new();
    timer.log("start");

    let noise = config.noise.build(config.noise_seed);
    let mut surface = IsoSurface::new(&config, noise).context("failed to build iso-surface")?;
    timer.log("initial extraction");
    report(&surface);
    finish_pass(&mut timer, args.debug);

    for _ in 0..args.regenerate {
        timer.log("start");
        surface.regenerate();
        timer.log("regenerate");
        report(&surface);
        finish_pass(&mut timer, args.debug);
    }

    for threshold in args.sweep_thresholds() {
        timer.log("start");
        surface.set_threshold(threshold);
        timer.log("threshold change");
        report(&surface);
        finish_pass(&mut timer, args.debug);
    }

    Ok(())
}

/// Log the grid and mesh statistics for the current extraction.
fn report<N: NoiseSource>(surface: &IsoSurface<N>) {
    let grid = surface.grid();
    let mesh = SurfaceMesh::from_grid(grid);
    let lines = wireframe_lines(grid);
    tracing::info!(
        seed = surface.seed_w(),
        threshold = surface.threshold(),
        points_above = surface.field().count_above(surface.threshold()),
        cells = grid.len(),
        polygons = grid.polygon_count(),
        vertices = grid.vertex_count(),
        triangles = mesh.triangle_count(),
        wireframe_segments = lines.len(),
        "Extraction pass"
    );
}

/// Print the stage breakdown in debug mode and start the next pass.
fn finish_pass(timer: &mut StageTimer, debug: bool) {
    if debug {
        timer.report();
    } else {
        tracing::trace!(total = ?timer.total(), "Pass finished");
        *timer = StageTimer::new();
    }
}
