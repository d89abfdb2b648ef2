//! Axis-aligned bounded volumes.

use crate::{Point3, Vec3};

/// An axis-aligned bounding box in 3D, defined by its min and max corners.
///
/// The empty box is represented with inverted infinite corners so it acts
/// as the identity for [`union`](Aabb3::union). All overlap and containment
/// tests use closed comparisons: touching counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for accumulating unions.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create a degenerate AABB containing a single point.
    pub fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Expand this AABB in place to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Expand this AABB in place to include another AABB.
    pub fn add(&mut self, other: &Aabb3) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    /// The smallest AABB containing both `self` and `other`.
    pub fn union(&self, other: &Aabb3) -> Aabb3 {
        let mut r = *self;
        r.add(other);
        r
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    ///
    /// An empty AABB overlaps nothing.
    pub fn intersects(&self, other: &Aabb3) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// Test if a point lies inside or on the boundary.
    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Test if `other` lies entirely inside or on the boundary of `self`.
    pub fn contains(&self, other: &Aabb3) -> bool {
        (0..3).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }

    /// Center point of the box.
    pub fn center(&self) -> Point3 {
        self.min + (self.max - self.min) / 2.0
    }

    /// Per-axis extents (max - min).
    pub fn dimensions(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index (0 = x, 1 = y, 2 = z) of the axis with the largest extent.
    ///
    /// Ties resolve to the lower axis index.
    pub fn largest_axis(&self) -> usize {
        let d = self.dimensions();
        let mut axis = 0;
        for i in 1..3 {
            if d[axis] < d[i] {
                axis = i;
            }
        }
        axis
    }

    /// A copy of this AABB padded by `amount` on every side.
    pub fn grow(&self, amount: f64) -> Aabb3 {
        let pad = Vec3::new(amount, amount, amount);
        Aabb3::new(self.min - pad, self.max + pad)
    }

    /// Enclosed volume; zero for empty or degenerate boxes.
    pub fn volume(&self) -> f64 {
        let d = self.dimensions();
        if d.iter().any(|&e| e <= 0.0) {
            0.0
        } else {
            d.x * d.y * d.z
        }
    }

    /// True if the box encloses no volume.
    pub fn is_empty(&self) -> bool {
        self.volume() == 0.0
    }

    /// True if every corner component is finite.
    pub fn is_finite(&self) -> bool {
        self.min.iter().all(|c| c.is_finite()) && self.max.iter().all(|c| c.is_finite())
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::empty()
    }
}
