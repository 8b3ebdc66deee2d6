//! # Pipeline Error Types
//!
//! All errors that can occur while configuring or building a terrain.

use std::path::PathBuf;

use terravox_procedural::ProceduralError;
use thiserror::Error;

/// Errors that can occur in the terrain pipeline.
#[derive(Error, Debug)]
pub enum TerrainError {
    /// Heightfield precondition failed.
    #[error(transparent)]
    Procedural(#[from] ProceduralError),

    /// Configuration file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::TerrainConfig`].
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A global tracing subscriber was already installed.
    #[error("failed to install logger: {0}")]
    Logging(String),
}

/// Result type for pipeline operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
