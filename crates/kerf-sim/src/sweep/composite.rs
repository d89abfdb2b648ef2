//! Union of sub-sweeps stacked at z offsets.

use std::sync::Arc;

use kerf_math::{Aabb3, Point3, Vec3};

use super::Sweep;

/// A sweep assembled from child sweeps, each lifted by a z offset.
///
/// A ball-nose tool is the canonical case: a spherical tip at offset zero
/// under a cylindrical shaft offset one radius up. A point is inside the
/// composite when it is inside any child, so depth is the maximum over
/// children.
#[derive(Clone, Default)]
pub struct CompositeSweep {
    children: Vec<(Arc<dyn Sweep + Send + Sync>, f64)>,
}

impl CompositeSweep {
    /// Create a composite with no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child sweep lifted by `z_offset`.
    pub fn add(&mut self, sweep: Arc<dyn Sweep + Send + Sync>, z_offset: f64) {
        self.children.push((sweep, z_offset));
    }
}

impl std::fmt::Debug for CompositeSweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeSweep")
            .field("children", &self.children.len())
            .finish()
    }
}

impl Sweep for CompositeSweep {
    fn bboxes(&self, start: Point3, end: Point3, out: &mut Vec<Aabb3>, tolerance: f64) {
        for (child, _) in &self.children {
            child.bboxes(start, end, out, tolerance);
        }
    }

    fn depth(&self, start: Point3, end: Point3, p: Point3) -> f64 {
        let mut best = -f64::MAX;
        for (child, z_offset) in &self.children {
            let shifted = p - Vec3::new(0.0, 0.0, *z_offset);
            let d = child.depth(start, end, shifted);
            if best < d {
                best = d;
            }
        }
        best
    }
}
