//! # Terrain Pipeline
//!
//! ```text
//! SeedOffset ─┐
//!             ├─> HeightmapGenerator ─> HeightGrid ─> VoxelMesher ─> MeshMerger ─> Terrain
//! Config ─────┘
//! ```
//!
//! A build is one synchronous batch: nothing is shared between builds
//! except the read-only generator and mesher.

use terravox_mesh::{MeshMerger, MeshStats, TerrainMesh, Vec3, VoxelMesher};
use terravox_procedural::{GridDimensions, HeightGrid, HeightmapGenerator, SeedOffset};

use crate::config::TerrainConfig;
use crate::error::TerrainResult;

/// One finished terrain: the grid it came from and the mesh to render.
#[derive(Clone, Debug)]
pub struct Terrain {
    grid: HeightGrid,
    mesh: TerrainMesh,
    stats: MeshStats,
    offset: SeedOffset,
    cell_size: f32,
}

impl Terrain {
    /// Column heights.
    #[must_use]
    pub const fn grid(&self) -> &HeightGrid {
        &self.grid
    }

    /// Merged mesh.
    #[must_use]
    pub const fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Face counts per direction.
    #[must_use]
    pub const fn stats(&self) -> &MeshStats {
        &self.stats
    }

    /// Seed offset the heightmap was generated with.
    #[must_use]
    pub const fn seed_offset(&self) -> SeedOffset {
        self.offset
    }

    /// Camera spawn point: one cell above the column at the grid centre.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spawn_point(&self) -> Vec3 {
        let x = self.grid.width() / 2;
        let z = self.grid.depth() / 2;
        let height = self.grid.height(x, z) as f32;
        Vec3::new(0.0, height * self.cell_size + self.cell_size, 0.0)
    }

    /// Hands the mesh over to the renderer.
    #[must_use]
    pub fn into_mesh(self) -> TerrainMesh {
        self.mesh
    }
}

/// Builds terrains from a validated [`TerrainConfig`].
#[derive(Clone)]
pub struct TerrainBuilder {
    config: TerrainConfig,
    dimensions: GridDimensions,
    generator: HeightmapGenerator,
    mesher: VoxelMesher,
}

impl TerrainBuilder {
    /// Validates `config` and prepares the generator and mesher.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: TerrainConfig) -> TerrainResult<Self> {
        config.validate()?;
        let dimensions = config.dimensions()?;
        let generator = HeightmapGenerator::new(config.noise_field(), config.heightmap_params());
        let mesher = VoxelMesher::new(config.mesh.cell_size);

        Ok(Self {
            config,
            dimensions,
            generator,
            mesher,
        })
    }

    /// The configuration this builder was created from.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Offset for the next build: derived from the seed if one is set,
    /// otherwise freshly drawn.
    #[must_use]
    pub fn seed_offset(&self) -> SeedOffset {
        self.config
            .terrain_seed()
            .map_or_else(SeedOffset::random, SeedOffset::from_seed)
    }

    /// Builds one terrain with the configured seed source.
    #[must_use]
    pub fn build(&self) -> Terrain {
        self.build_with_offset(self.seed_offset())
    }

    /// Builds one terrain with an explicit seed offset.
    #[tracing::instrument(
        level = "info",
        skip(self),
        fields(width = self.dimensions.width(), depth = self.dimensions.depth())
    )]
    #[must_use]
    pub fn build_with_offset(&self, offset: SeedOffset) -> Terrain {
        let grid = self.generator.generate_grid(self.dimensions, offset);
        let faces = self.emit_faces(&grid);
        let stats = MeshStats::from_faces(&faces);
        let mesh = MeshMerger::merge(&faces);

        tracing::info!(
            cells = self.dimensions.cell_count(),
            faces = stats.total(),
            side_faces = stats.side_faces(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            radius = mesh.bounding_sphere().radius,
            "terrain built"
        );

        Terrain {
            grid,
            mesh,
            stats,
            offset,
            cell_size: self.mesher.cell_size(),
        }
    }

    #[cfg(feature = "parallel")]
    fn emit_faces(&self, grid: &HeightGrid) -> Vec<terravox_mesh::FaceInstance> {
        if self.config.mesh.parallel {
            self.mesher.mesh_par(grid)
        } else {
            self.mesher.mesh(grid)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn emit_faces(&self, grid: &HeightGrid) -> Vec<terravox_mesh::FaceInstance> {
        if self.config.mesh.parallel {
            tracing::warn!("mesh.parallel requested but the `parallel` feature is off");
        }
        self.mesher.mesh(grid)
    }
}
