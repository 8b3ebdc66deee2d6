//! # Terrain Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file (or no file at all) builds the classic 128x128 terrain.
//!
//! ```toml
//! width = 128
//! depth = 128
//! seed = 42
//!
//! [noise]
//! octaves = 4
//! permutation = "reference"
//!
//! [mesh]
//! cell_size = 100.0
//!
//! [material]
//! atlas = "textures/minecraft/atlas.png"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use terravox_mesh::DEFAULT_CELL_SIZE;
use terravox_procedural::{GradientNoise, GridDimensions, HeightmapParams, TerrainSeed};

use crate::error::{TerrainError, TerrainResult};

/// Which permutation table the noise field uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermutationKind {
    /// Ken Perlin's reference table.
    #[default]
    Reference,
    /// Shuffled from the configured seed.
    Seeded,
}

/// Heightfield parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseConfig {
    /// Number of octaves.
    pub octaves: u32,
    /// Divisor and weight of the first octave.
    pub initial_quality: f64,
    /// Factor applied to quality after each octave.
    pub quality_multiplier: f64,
    /// Raw value to column height scale.
    pub height_scale: f64,
    /// Permutation table source.
    pub permutation: PermutationKind,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        let params = HeightmapParams::default();
        Self {
            octaves: params.octaves,
            initial_quality: params.initial_quality,
            quality_multiplier: params.quality_multiplier,
            height_scale: params.height_scale,
            permutation: PermutationKind::Reference,
        }
    }
}

/// Mesh assembly parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeshConfig {
    /// World units per cell and per height unit.
    pub cell_size: f32,
    /// Emit rows in parallel (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            parallel: false,
        }
    }
}

/// What the rendering collaborator should apply to the mesh.
///
/// Not used by the pipeline itself; carried so a renderer can be set up
/// from the same file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialHints {
    /// Texture atlas: top faces use the upper half, sides the lower half.
    pub atlas: PathBuf,
    /// Nearest-neighbour magnification filter.
    pub nearest_filter: bool,
    /// Atlas is sRGB encoded.
    pub srgb: bool,
    /// Render both sides of every triangle (no back-face culling).
    pub double_sided: bool,
    /// Clear colour, `0xRRGGBB`.
    pub sky_color: u32,
    /// Ambient light colour, `0xRRGGBB`.
    pub ambient_color: u32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Directional light colour, `0xRRGGBB`.
    pub sun_color: u32,
    /// Directional light intensity.
    pub sun_intensity: f32,
    /// Direction towards the directional light (normalised on use).
    pub sun_direction: [f32; 3],
}

impl Default for MaterialHints {
    fn default() -> Self {
        Self {
            atlas: PathBuf::from("textures/minecraft/atlas.png"),
            nearest_filter: true,
            srgb: true,
            double_sided: true,
            sky_color: 0x00bf_d1e5,
            ambient_color: 0x00ee_eeee,
            ambient_intensity: 3.0,
            sun_color: 0x00ff_ffff,
            sun_intensity: 12.0,
            sun_direction: [1.0, 1.0, 0.5],
        }
    }
}

impl MaterialHints {
    /// Unit vector towards the directional light.
    #[must_use]
    pub fn sun_direction_normalized(&self) -> [f32; 3] {
        terravox_mesh::Vec3::from_array(self.sun_direction)
            .normalize_or_zero()
            .to_array()
    }
}

/// Complete pipeline configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerrainConfig {
    /// Columns along X.
    pub width: usize,
    /// Columns along Z.
    pub depth: usize,
    /// Fixed seed; `None` draws a fresh seed offset on every build.
    pub seed: Option<u64>,
    /// Heightfield parameters.
    pub noise: NoiseConfig,
    /// Mesh parameters.
    pub mesh: MeshConfig,
    /// Renderer hints.
    pub material: MaterialHints,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 128,
            depth: 128,
            seed: None,
            noise: NoiseConfig::default(),
            mesh: MeshConfig::default(),
            material: MaterialHints::default(),
        }
    }
}

impl TerrainConfig {
    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or fails
    /// [`TerrainConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TerrainError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn from_toml_str(text: &str) -> TerrainResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::Procedural`] for zero dimensions and
    /// [`TerrainError::InvalidConfig`] for other unusable values.
    pub fn validate(&self) -> TerrainResult<()> {
        self.dimensions()?;

        let noise = &self.noise;
        if noise.octaves == 0 {
            return Err(invalid("noise.octaves must be at least 1"));
        }
        if !(noise.initial_quality.is_finite() && noise.initial_quality > 0.0) {
            return Err(invalid("noise.initial_quality must be positive"));
        }
        if !(noise.quality_multiplier.is_finite() && noise.quality_multiplier > 0.0) {
            return Err(invalid("noise.quality_multiplier must be positive"));
        }
        if !(noise.height_scale.is_finite() && noise.height_scale > 0.0) {
            return Err(invalid("noise.height_scale must be positive"));
        }
        if noise.permutation == PermutationKind::Seeded && self.seed.is_none() {
            return Err(invalid("noise.permutation = \"seeded\" requires a seed"));
        }
        if !(self.mesh.cell_size.is_finite() && self.mesh.cell_size > 0.0) {
            return Err(invalid("mesh.cell_size must be positive"));
        }
        Ok(())
    }

    /// Validated grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or depth is zero.
    pub fn dimensions(&self) -> TerrainResult<GridDimensions> {
        Ok(GridDimensions::new(self.width, self.depth)?)
    }

    /// Fixed seed, if any.
    #[must_use]
    pub fn terrain_seed(&self) -> Option<TerrainSeed> {
        self.seed.map(TerrainSeed::new)
    }

    /// Octave parameters for the heightmap generator.
    #[must_use]
    pub fn heightmap_params(&self) -> HeightmapParams {
        HeightmapParams {
            octaves: self.noise.octaves,
            initial_quality: self.noise.initial_quality,
            quality_multiplier: self.noise.quality_multiplier,
            height_scale: self.noise.height_scale,
        }
    }

    /// Noise field selected by `noise.permutation`.
    #[must_use]
    pub fn noise_field(&self) -> GradientNoise {
        match (self.noise.permutation, self.terrain_seed()) {
            (PermutationKind::Seeded, Some(seed)) => GradientNoise::new(seed),
            _ => GradientNoise::reference(),
        }
    }
}

fn invalid(message: &str) -> TerrainError {
    TerrainError::InvalidConfig(message.to_owned())
}
