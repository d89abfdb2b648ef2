//! The spatial-index contract over motion segments.

use kerf_math::{Aabb3, Point3};

/// An index over motion segments keyed by their swept bounding boxes.
///
/// Segments are identified by their index into the owning
/// [`ToolPath`](kerf_path::ToolPath); the index stores no segment data of
/// its own. One segment may be inserted under several boxes (long motions
/// are chunked), and queries may report it once per matching box.
pub trait MoveLookup {
    /// Bounding box of everything inserted so far; empty for no insertions.
    fn bounds(&self) -> Aabb3;

    /// Index the segment `mv` under `bbox`.
    fn insert(&mut self, mv: usize, bbox: Aabb3);

    /// True if any inserted box overlaps `region`.
    fn intersects(&self, region: &Aabb3) -> bool;

    /// Collect every segment with an inserted box containing `p`.
    fn collisions(&self, p: Point3, moves: &mut Vec<usize>);

    /// Transition from building to querying.
    ///
    /// Indexes built incrementally need no transition; the default is a
    /// no-op.
    fn finalize(&mut self) {}
}
