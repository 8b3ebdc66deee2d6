//! # TERRAVOX
//!
//! Static voxel terrain: a fractal heightfield turned into one textured,
//! double-sided triangle mesh.
//!
//! ## Crates
//!
//! - `terravox_procedural`: gradient noise and heightmaps
//! - `terravox_mesh`: face emission and mesh merging
//! - `terravox` (this crate): configuration, pipeline, logging
//!
//! ## Example
//!
//! ```rust
//! use terravox::{TerrainBuilder, TerrainConfig};
//!
//! let config = TerrainConfig::from_toml_str("width = 16\ndepth = 16\nseed = 1")?;
//! let terrain = TerrainBuilder::new(config)?.build();
//!
//! assert_eq!(terrain.stats().top, 16 * 16);
//! # Ok::<(), terravox::TerrainError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

// Re-export the stages
pub use terravox_mesh as mesh;
pub use terravox_procedural as procedural;

pub use config::{MaterialHints, MeshConfig, NoiseConfig, PermutationKind, TerrainConfig};
pub use error::{TerrainError, TerrainResult};
pub use logging::{init_logging, DEFAULT_FILTER};
pub use pipeline::{Terrain, TerrainBuilder};
