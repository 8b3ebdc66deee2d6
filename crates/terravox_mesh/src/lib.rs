//! # TERRAVOX Mesh
//!
//! Turns a height grid into one renderable triangle mesh.
//!
//! ## Pipeline
//!
//! ```text
//! HeightGrid ──> VoxelMesher ──> [FaceInstance] ──> MeshMerger ──> TerrainMesh
//!                (visibility)      (positioned)       (one buffer)   (+ bounds)
//! ```
//!
//! ## Rendering Contract
//!
//! The mesh is meant for a single draw call with one texture atlas sampled
//! with nearest-neighbour filtering and back-face culling disabled.
//!
//! ## Features
//!
//! - `parallel`: [`VoxelMesher::mesh_par`] emits rows on the rayon pool.
//!   Its equivalence with [`VoxelMesher::mesh`] is checked by the
//!   `parallel_mesh_test` target, which only builds with the feature:
//!   `cargo test -p terravox_mesh --features parallel`.
//! - `gpu`: `TerrainVertex::desc()`, the wgpu vertex buffer layout.
//!
//! ## Example
//!
//! ```rust
//! use terravox_mesh::{MeshMerger, VoxelMesher};
//! use terravox_procedural::HeightGrid;
//!
//! let grid = HeightGrid::from_heights(3, 1, vec![0, 0, 2])?;
//! let faces = VoxelMesher::default().mesh(&grid);
//! let mesh = MeshMerger::merge(&faces);
//!
//! assert_eq!(mesh.vertex_count(), faces.len() * 4);
//! # Ok::<(), terravox_procedural::ProceduralError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounds;
pub mod face;
pub mod math;
pub mod merge;
pub mod mesher;

pub use bounds::{Aabb, BoundingSphere};
pub use face::{Face, FaceInstance, FaceTemplate, QUAD_INDICES, TRIANGLES_PER_FACE, VERTICES_PER_FACE};
pub use math::{Vec2, Vec3};
pub use merge::{MeshMerger, TerrainMesh, TerrainVertex};
pub use mesher::{side_visible, MeshStats, VoxelMesher, DEFAULT_CELL_SIZE};
