//! Bounding volumes for culling and camera placement.

use crate::math::Vec3;

/// Axis-aligned bounding box.
///
/// An empty box has `min > max` on every axis and contains nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// The empty box; extending it by a point yields that point.
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Smallest box containing all `points`.
    #[must_use]
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, Self::extended)
    }

    /// Returns `true` if the box contains no point.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// This box grown to contain `point`.
    #[inline]
    #[must_use]
    pub fn extended(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Centre of the box, origin for an empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Edge lengths, zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Returns `true` if `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

/// Bounding sphere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingSphere {
    /// Sphere centre.
    pub center: Vec3,
    /// Sphere radius, zero for an empty point set.
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere centred on the box of `points`, with the radius reaching the
    /// farthest point.
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let center = Aabb::from_points(points.clone()).center();
        let radius_squared = points
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max);

        Self {
            center,
            radius: radius_squared.sqrt(),
        }
    }

    /// Returns `true` if `point` lies inside or on the sphere (with a small
    /// relative tolerance for rounding).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let slack = self.radius * 1e-5;
        point.distance_squared(self.center) <= (self.radius + slack) * (self.radius + slack)
    }
}
