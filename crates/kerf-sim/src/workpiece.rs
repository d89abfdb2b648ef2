//! The stock block as a signed squared-distance field.

use kerf_math::{Aabb3, Point3};

use crate::FieldFunction;

/// A rectangular stock block.
///
/// Unlike the sweep classifiers, the workpiece field is a real signed
/// *squared* distance to the block surface: positive inside, negative
/// outside, zero on it.
#[derive(Debug, Clone, Copy)]
pub struct Workpiece {
    bounds: Aabb3,
}

impl Workpiece {
    /// Create a stock block filling `bounds`.
    pub fn new(bounds: Aabb3) -> Self {
        Self { bounds }
    }

    /// Create a workpiece with no volume; queries on it are meaningless
    /// and callers are expected to check [`is_valid`](Self::is_valid).
    pub fn invalid() -> Self {
        Self { bounds: Aabb3::empty() }
    }

    /// The block's bounds.
    pub fn bounds(&self) -> Aabb3 {
        self.bounds
    }

    /// True if the block encloses any volume.
    pub fn is_valid(&self) -> bool {
        self.bounds.volume() > 0.0
    }

    /// True if `p` is inside or on the block.
    pub fn contains(&self, p: &Point3) -> bool {
        self.bounds.contains_point(p)
    }

    /// Squared distance from `p` to the nearest point of the block
    /// surface.
    fn surface_distance_squared(&self, p: &Point3) -> f64 {
        if self.bounds.contains_point(p) {
            // Nearest face.
            let mut d = f64::MAX;
            for i in 0..3 {
                d = d.min(p[i] - self.bounds.min[i]).min(self.bounds.max[i] - p[i]);
            }
            d * d
        } else {
            let mut d2 = 0.0;
            for i in 0..3 {
                let c = p[i].clamp(self.bounds.min[i], self.bounds.max[i]);
                d2 += (p[i] - c) * (p[i] - c);
            }
            d2
        }
    }
}

impl FieldFunction for Workpiece {
    fn depth(&self, p: Point3) -> f64 {
        let d2 = self.surface_distance_squared(&p);
        if self.contains(&p) {
            d2
        } else {
            -d2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn block() -> Workpiece {
        Workpiece::new(Aabb3::new(
            Point3::new(-5.0, -5.0, -5.0),
            Point3::new(5.0, 5.0, 5.0),
        ))
    }

    #[test]
    fn test_depth_sign_and_magnitude() {
        let wp = block();
        // Center: 5 from every face.
        assert_relative_eq!(wp.depth(Point3::origin()), 25.0);
        // 1 inside the +x face.
        assert_relative_eq!(wp.depth(Point3::new(4.0, 0.0, 0.0)), 1.0);
        // On the surface.
        assert_relative_eq!(wp.depth(Point3::new(5.0, 0.0, 0.0)), 0.0);
        // 2 outside the +x face.
        assert_relative_eq!(wp.depth(Point3::new(7.0, 0.0, 0.0)), -4.0);
        // Outside a corner.
        assert_relative_eq!(wp.depth(Point3::new(6.0, 6.0, 6.0)), -3.0);
    }

    #[test]
    fn test_validity() {
        assert!(block().is_valid());
        assert!(!Workpiece::invalid().is_valid());
        let flat = Workpiece::new(Aabb3::new(
            Point3::origin(),
            Point3::new(1.0, 1.0, 0.0),
        ));
        assert!(!flat.is_valid());
    }
}
