//! The field-function contract consumed by surface extraction.

use kerf_math::{Aabb3, Point3};

/// A signed scalar field over 3D space.
///
/// A surface extractor samples [`depth`](FieldFunction::depth) at lattice
/// points and calls [`cull`](FieldFunction::cull) to skip whole regions
/// known not to matter. Implementations are read-only after construction;
/// queries may run concurrently from any number of threads.
pub trait FieldFunction {
    /// True if `region` is known not to intersect anything this field
    /// describes, letting the caller skip it entirely.
    ///
    /// The default never culls.
    fn cull(&self, _region: &Aabb3) -> bool {
        false
    }

    /// Signed depth of `p` relative to the solid this field describes.
    ///
    /// Positive means inside, negative means outside. The magnitude's
    /// meaning is implementation-defined; see the implementors.
    fn depth(&self, p: Point3) -> f64;
}
