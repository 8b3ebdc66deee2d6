//! # TERRAVOX Procedural Generation
//!
//! Deterministic heightfield synthesis for voxel terrain.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same permutation + same seed offset = same grid
//! 2. **Explicit randomness**: The seed offset is a parameter, never ambient
//! 3. **Dense**: Every cell of a `width x depth` grid is populated
//!
//! ## Core Components
//!
//! - `GradientNoise`: 3D gradient noise with a fixed permutation table
//! - `HeightmapGenerator`: Octave composition into raw values
//! - `HeightGrid`: Quantised, immutable column heights
//!
//! ## Example
//!
//! ```rust
//! use terravox_procedural::{GridDimensions, HeightmapGenerator, SeedOffset};
//!
//! let dims = GridDimensions::new(128, 128)?;
//! let grid = HeightmapGenerator::default().generate_grid(dims, SeedOffset::new(42.0));
//!
//! assert_eq!(grid.heights().len(), 128 * 128);
//! # Ok::<(), terravox_procedural::ProceduralError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod heightmap;
pub mod noise;

pub use error::{ProceduralError, ProceduralResult};
pub use heightmap::{
    GridDimensions, HeightGrid, Heightmap, HeightmapGenerator, HeightmapParams, SeedOffset,
    SEED_OFFSET_RANGE,
};
pub use noise::{GradientNoise, TerrainSeed};
