//! Parametric tool-sweep shapes and their analytic depth classifiers.
//!
//! A sweep describes the volume a tool shape occupies while its reference
//! point travels from `start` to `end`. Depth here is deliberately not a
//! distance: `-1.0` means outside the swept solid, `1.0` means inside or
//! on it. Callers treat `>= 0.0` as a hit. The stock field uses a real
//! signed squared distance, and the cut composition relies on the sweep
//! sentinels staying small against it; do not unify the two conventions.

mod composite;
mod conic;
mod spheroid;

pub use composite::CompositeSweep;
pub use conic::ConicSweep;
pub use spheroid::SpheroidSweep;

use kerf_math::{Aabb3, Point3};

/// Default geometric tolerance for swept bounding boxes, in mm.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// The volume swept by a tool shape along a motion segment.
pub trait Sweep {
    /// Append conservative bounding boxes for the travel from `start` to
    /// `end` onto `out`.
    fn bboxes(&self, start: Point3, end: Point3, out: &mut Vec<Aabb3>, tolerance: f64);

    /// Classify `p` against the swept solid: `1.0` inside or on, `-1.0`
    /// outside.
    fn depth(&self, start: Point3, end: Point3, p: Point3) -> f64;
}

/// Shared box-chunking helper for solids of revolution.
///
/// Long motions are cut into pieces no longer than ~16x the tool radius so
/// each box stays tight. Each box spans the piece's endpoints padded by
/// the radius and tolerance in X/Y, and by the tool's z extent
/// (`z_offset` below the reference point, `length` above) in Z.
pub(crate) fn segment_bboxes(
    start: Point3,
    end: Point3,
    out: &mut Vec<Aabb3>,
    radius: f64,
    length: f64,
    z_offset: f64,
    tolerance: f64,
) {
    let max_len = radius * 16.0;
    let len = (end - start).norm();
    let steps = if len <= max_len {
        1
    } else {
        (len / max_len) as usize
    };
    let stride = 1.0 / steps as f64;

    let mut p1 = start;
    for i in 0..steps {
        let p2 = start + (end - start) * (stride * (i + 1) as f64);

        let min = Point3::new(
            p1.x.min(p2.x) - radius - tolerance,
            p1.y.min(p2.y) - radius - tolerance,
            p1.z.min(p2.z) + z_offset - tolerance,
        );
        let max = Point3::new(
            p1.x.max(p2.x) + radius + tolerance,
            p1.y.max(p2.y) + radius + tolerance,
            p1.z.max(p2.z) + length + tolerance,
        );
        out.push(Aabb3::new(min, max));

        p1 = p2;
    }
}
