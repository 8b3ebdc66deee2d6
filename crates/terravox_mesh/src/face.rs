//! # Face Templates
//!
//! Five canonical unit quads, one per exposed direction of a voxel column.
//! Bottom faces are never visible from above the terrain and have no template.
//!
//! Every template is a plane of side 1 centred on the face of a unit cube
//! around the origin. Vertex order is
//! `[top-left, top-right, bottom-left, bottom-right]` as seen from outside,
//! triangulated as [`QUAD_INDICES`] so the winding is counter-clockwise
//! around the outward normal.
//!
//! ## Atlas Layout
//!
//! Two of the four UV corners are pinned to `v = 0.5`: the top face samples
//! the upper half of the atlas and side faces the lower half. Neither half
//! bleeds into the other across voxel seams.

use crate::math::{Vec2, Vec3};

/// Triangle list for one quad, indexing `FaceTemplate::corners`.
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Vertices per emitted face.
pub const VERTICES_PER_FACE: usize = 4;

/// Triangles per emitted face.
pub const TRIANGLES_PER_FACE: usize = 2;

/// Direction a column face points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Y, always emitted.
    Top,
    /// +X side.
    PosX,
    /// -X side.
    NegX,
    /// +Z side.
    PosZ,
    /// -Z side.
    NegZ,
}

impl Face {
    /// All faces, top first.
    pub const ALL: [Self; 5] = [Self::Top, Self::PosX, Self::NegX, Self::PosZ, Self::NegZ];

    /// The four horizontal faces, in emission order.
    pub const SIDES: [Self; 4] = [Self::PosX, Self::NegX, Self::PosZ, Self::NegZ];

    /// Grid step `(dx, dz)` towards the neighbour this face looks at.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Top => (0, 0),
            Self::PosX => (1, 0),
            Self::NegX => (-1, 0),
            Self::PosZ => (0, 1),
            Self::NegZ => (0, -1),
        }
    }

    /// Outward unit normal.
    #[must_use]
    pub fn normal(self) -> Vec3 {
        self.template().normal
    }

    /// The read-only template for this face.
    #[must_use]
    pub fn template(self) -> &'static FaceTemplate {
        match self {
            Self::Top => &TOP,
            Self::PosX => &POS_X,
            Self::NegX => &NEG_X,
            Self::PosZ => &POS_Z,
            Self::NegZ => &NEG_Z,
        }
    }
}

/// One canonical unit quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceTemplate {
    /// Which face this is.
    pub face: Face,
    /// Corner positions relative to the column centre, unit scale.
    pub corners: [Vec3; 4],
    /// Outward unit normal.
    pub normal: Vec3,
    /// Per-corner texture coordinates.
    pub uvs: [Vec2; 4],
}

/// UVs of the top face: upper half of the atlas.
const TOP_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 0.5),
    Vec2::new(1.0, 0.5),
];

/// UVs of the side faces: lower half of the atlas.
const SIDE_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.5),
    Vec2::new(1.0, 0.5),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
];

const H: f32 = 0.5;

/// +Y template.
pub const TOP: FaceTemplate = FaceTemplate {
    face: Face::Top,
    corners: [
        Vec3::new(-H, H, -H),
        Vec3::new(H, H, -H),
        Vec3::new(-H, H, H),
        Vec3::new(H, H, H),
    ],
    normal: Vec3::Y,
    uvs: TOP_UVS,
};

/// +X template.
pub const POS_X: FaceTemplate = FaceTemplate {
    face: Face::PosX,
    corners: [
        Vec3::new(H, H, H),
        Vec3::new(H, H, -H),
        Vec3::new(H, -H, H),
        Vec3::new(H, -H, -H),
    ],
    normal: Vec3::X,
    uvs: SIDE_UVS,
};

/// -X template.
pub const NEG_X: FaceTemplate = FaceTemplate {
    face: Face::NegX,
    corners: [
        Vec3::new(-H, H, -H),
        Vec3::new(-H, H, H),
        Vec3::new(-H, -H, -H),
        Vec3::new(-H, -H, H),
    ],
    normal: Vec3::new(-1.0, 0.0, 0.0),
    uvs: SIDE_UVS,
};

/// +Z template.
pub const POS_Z: FaceTemplate = FaceTemplate {
    face: Face::PosZ,
    corners: [
        Vec3::new(-H, H, H),
        Vec3::new(H, H, H),
        Vec3::new(-H, -H, H),
        Vec3::new(H, -H, H),
    ],
    normal: Vec3::Z,
    uvs: SIDE_UVS,
};

/// -Z template.
pub const NEG_Z: FaceTemplate = FaceTemplate {
    face: Face::NegZ,
    corners: [
        Vec3::new(H, H, -H),
        Vec3::new(-H, H, -H),
        Vec3::new(H, -H, -H),
        Vec3::new(-H, -H, -H),
    ],
    normal: Vec3::new(0.0, 0.0, -1.0),
    uvs: SIDE_UVS,
};

impl FaceTemplate {
    /// Places the template in world space.
    ///
    /// Corners are scaled by `cell_size` and moved by `translation`. The
    /// template itself is never modified.
    #[inline]
    #[must_use]
    pub fn instance(&self, translation: Vec3, cell_size: f32) -> FaceInstance {
        FaceInstance {
            face: self.face,
            positions: self.corners.map(|corner| corner * cell_size + translation),
            normal: self.normal,
            uvs: self.uvs,
        }
    }
}

/// A face template positioned for one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceInstance {
    /// Which face this is.
    pub face: Face,
    /// World-space corner positions.
    pub positions: [Vec3; 4],
    /// Outward unit normal.
    pub normal: Vec3,
    /// Per-corner texture coordinates.
    pub uvs: [Vec2; 4],
}

impl FaceInstance {
    /// Centre of the quad.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.positions[0] + self.positions[3]) * 0.5
    }
}
