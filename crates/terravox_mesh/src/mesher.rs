//! # Voxel Mesher
//!
//! Walks a [`HeightGrid`] and emits the faces of every column that are
//! exposed to air.
//!
//! ## Visibility Rule
//!
//! - The top face of every column is always emitted.
//! - A side face is emitted when there is no neighbour in that direction
//!   (grid boundary), or when the neighbour height `n` is neither `h` nor
//!   `h + 1`.
//!
//! The rule is asymmetric: a neighbour exactly one block taller
//! hides the lower column's side (a walkable step), while any neighbour that
//! is lower, or two or more blocks taller, exposes it.

use terravox_procedural::HeightGrid;

use crate::face::{Face, FaceInstance};
use crate::math::Vec3;

/// World units per grid cell and per height unit.
pub const DEFAULT_CELL_SIZE: f32 = 100.0;

/// Face counts per direction after meshing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Top faces (one per column).
    pub top: usize,
    /// +X side faces.
    pub pos_x: usize,
    /// -X side faces.
    pub neg_x: usize,
    /// +Z side faces.
    pub pos_z: usize,
    /// -Z side faces.
    pub neg_z: usize,
}

impl MeshStats {
    /// Counts faces by direction.
    #[must_use]
    pub fn from_faces(faces: &[FaceInstance]) -> Self {
        let mut stats = Self::default();
        for face in faces {
            stats.record(face.face);
        }
        stats
    }

    fn record(&mut self, face: Face) {
        match face {
            Face::Top => self.top += 1,
            Face::PosX => self.pos_x += 1,
            Face::NegX => self.neg_x += 1,
            Face::PosZ => self.pos_z += 1,
            Face::NegZ => self.neg_z += 1,
        }
    }

    /// All side faces.
    #[must_use]
    pub const fn side_faces(&self) -> usize {
        self.pos_x + self.neg_x + self.pos_z + self.neg_z
    }

    /// All faces.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.top + self.side_faces()
    }
}

/// Returns `true` if a side face of a column of height `height` is exposed.
///
/// `neighbor` is `None` outside the grid.
#[inline]
#[must_use]
pub fn side_visible(height: u32, neighbor: Option<u32>) -> bool {
    match neighbor {
        None => true,
        // n == h and n == h + 1 both hide the face
        Some(n) => !matches!(n.checked_sub(height), Some(0 | 1)),
    }
}

/// Height of the neighbour of `(x, z)` in direction `face`.
#[inline]
fn neighbor(grid: &HeightGrid, x: usize, z: usize, face: Face) -> Option<u32> {
    let (dx, dz) = face.step();
    let nx = x.checked_add_signed(dx)?;
    let nz = z.checked_add_signed(dz)?;
    (nx < grid.width() && nz < grid.depth()).then(|| grid.height(nx, nz))
}

/// Emits visible column faces as positioned [`FaceInstance`]s.
///
/// The grid is centred on the origin: column `(x, z)` of height `h` sits at
/// `((x - width / 2) * cell, h * cell, (z - depth / 2) * cell)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelMesher {
    cell_size: f32,
}

impl Default for VoxelMesher {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl VoxelMesher {
    /// Creates a mesher with the given world scale.
    #[must_use]
    pub const fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    /// World units per cell.
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World-space centre of column `(x, z)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn column_translation(&self, grid: &HeightGrid, x: usize, z: usize) -> Vec3 {
        let dims = grid.dimensions();
        let cell = self.cell_size;
        Vec3::new(
            x as f32 * cell - dims.half_width() as f32 * cell,
            grid.height(x, z) as f32 * cell,
            z as f32 * cell - dims.half_depth() as f32 * cell,
        )
    }

    /// Faces of column `(x, z)` that are emitted: top first, then the
    /// visible sides in [`Face::SIDES`] order.
    pub fn visible_faces(
        grid: &HeightGrid,
        x: usize,
        z: usize,
    ) -> impl Iterator<Item = Face> + '_ {
        let height = grid.height(x, z);
        std::iter::once(Face::Top).chain(
            Face::SIDES
                .into_iter()
                .filter(move |&side| side_visible(height, neighbor(grid, x, z, side))),
        )
    }

    /// Appends the faces of one row to `out`.
    fn mesh_row(&self, grid: &HeightGrid, z: usize, out: &mut Vec<FaceInstance>) {
        for x in 0..grid.width() {
            let translation = self.column_translation(grid, x, z);
            out.extend(
                Self::visible_faces(grid, x, z)
                    .map(|face| face.template().instance(translation, self.cell_size)),
            );
        }
    }

    /// Emits every visible face of the grid, rows in increasing `z`,
    /// columns in increasing `x`.
    #[tracing::instrument(level = "debug", skip_all, fields(width = grid.width(), depth = grid.depth()))]
    #[must_use]
    pub fn mesh(&self, grid: &HeightGrid) -> Vec<FaceInstance> {
        // Every column has a top face; sides are usually rarer
        let mut faces = Vec::with_capacity(grid.dimensions().cell_count() * 2);
        for z in 0..grid.depth() {
            self.mesh_row(grid, z, &mut faces);
        }

        tracing::debug!(faces = faces.len(), "columns meshed");
        faces
    }

    /// Same output as [`VoxelMesher::mesh`], rows emitted on the rayon pool.
    ///
    /// Each row reads the grid and fills its own buffer; buffers are joined
    /// in row order.
    #[cfg(feature = "parallel")]
    #[tracing::instrument(level = "debug", skip_all, fields(width = grid.width(), depth = grid.depth()))]
    #[must_use]
    pub fn mesh_par(&self, grid: &HeightGrid) -> Vec<FaceInstance> {
        use rayon::prelude::*;

        let rows: Vec<Vec<FaceInstance>> = (0..grid.depth())
            .into_par_iter()
            .map(|z| {
                let mut row = Vec::with_capacity(grid.width() * 2);
                self.mesh_row(grid, z, &mut row);
                row
            })
            .collect();

        let faces = rows.concat();
        tracing::debug!(faces = faces.len(), "columns meshed in parallel");
        faces
    }
}
