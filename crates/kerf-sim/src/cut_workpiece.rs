//! Stock minus tool sweep: the material-removal oracle.

use std::sync::Arc;

use kerf_math::{Aabb3, Point3};

use crate::{FieldFunction, ToolSweep, Workpiece};

/// The composition of a stock block and a tool sweep into the single
/// field the surface extractor queries.
///
/// A point is material (positive depth) only when it is inside the stock
/// and not inside anything the tool swept. The stock side is a signed
/// squared distance while the sweep side is a `±1` classifier; the
/// composition relies on the sweep sentinels staying small against real
/// stock distances.
#[derive(Debug, Clone)]
pub struct CutWorkpiece {
    tool_sweep: Arc<ToolSweep>,
    workpiece: Workpiece,
}

impl CutWorkpiece {
    /// Compose a tool sweep with a stock block.
    pub fn new(tool_sweep: Arc<ToolSweep>, workpiece: Workpiece) -> Self {
        Self { tool_sweep, workpiece }
    }

    /// The tool sweep being subtracted.
    pub fn tool_sweep(&self) -> &Arc<ToolSweep> {
        &self.tool_sweep
    }

    /// The stock block.
    pub fn workpiece(&self) -> &Workpiece {
        &self.workpiece
    }

    /// The stock bounds when the stock is valid, else the sweep's bounds.
    pub fn bounds(&self) -> Aabb3 {
        use crate::MoveLookup;
        if self.workpiece.is_valid() {
            self.workpiece.bounds()
        } else {
            self.tool_sweep.bounds()
        }
    }

    /// False when the stock has no volume or the usable bounds carry a
    /// non-finite component; bounds-derived computations must not rely on
    /// an invalid cut.
    pub fn is_valid(&self) -> bool {
        self.workpiece.is_valid() && self.bounds().is_finite()
    }
}

impl FieldFunction for CutWorkpiece {
    fn cull(&self, region: &Aabb3) -> bool {
        self.tool_sweep.cull(region)
    }

    fn depth(&self, p: Point3) -> f64 {
        if !self.workpiece.is_valid() {
            // Pure air: the removal field alone.
            return self.tool_sweep.depth(p);
        }
        self.workpiece.depth(p).min(-self.tool_sweep.depth(p))
    }
}
