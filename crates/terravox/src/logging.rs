//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

use crate::error::{TerrainError, TerrainResult};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`.
///
/// # Errors
///
/// Returns [`TerrainError::Logging`] if a global subscriber already exists
/// or the fallback filter does not parse.
pub fn init_logging(default_filter: &str) -> TerrainResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| TerrainError::Logging(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| TerrainError::Logging(e.to_string()))?;

    tracing::debug!("logging initialized");
    Ok(())
}
