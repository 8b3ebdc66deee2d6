//! # TERRAVOX
//!
//! Builds one terrain and reports what a renderer would receive.
//!
//! ```bash
//! # Built-in defaults (128x128, random offset)
//! terravox
//!
//! # From a config file, with debug output
//! RUST_LOG=debug terravox data/terravox.toml
//! ```

use std::process::ExitCode;

use terravox::{init_logging, TerrainBuilder, TerrainConfig, TerrainResult, DEFAULT_FILTER};

fn run() -> TerrainResult<()> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => TerrainConfig::load(path)?,
        None => {
            tracing::info!("no configuration file given, using defaults");
            TerrainConfig::default()
        }
    };

    let builder = TerrainBuilder::new(config)?;
    let terrain = builder.build();

    let mesh = terrain.mesh();
    let bounds = mesh.bounds();
    let sphere = mesh.bounding_sphere();
    let spawn = terrain.spawn_point();
    let hints = &builder.config().material;

    tracing::info!(
        offset = terrain.seed_offset().value(),
        base_level = terrain.grid().base(),
        min_height = terrain.grid().min_height(),
        max_height = terrain.grid().max_height(),
        "heightfield"
    );
    tracing::info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        vertex_bytes = mesh.vertex_bytes().len(),
        index_bytes = mesh.index_bytes().len(),
        "mesh ready for upload"
    );
    tracing::info!(
        min = ?bounds.min.to_array(),
        max = ?bounds.max.to_array(),
        sphere_center = ?sphere.center.to_array(),
        sphere_radius = sphere.radius,
        "bounds"
    );
    tracing::info!(spawn = ?spawn.to_array(), "camera spawn");
    tracing::info!(
        atlas = %hints.atlas.display(),
        nearest = hints.nearest_filter,
        double_sided = hints.double_sided,
        sun_direction = ?hints.sun_direction_normalized(),
        "material"
    );

    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = init_logging(DEFAULT_FILTER) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
