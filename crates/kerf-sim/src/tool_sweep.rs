//! The tool sweep: a spatial index over every motion segment's swept
//! boxes plus one shared sweep shape per tool.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use kerf_math::{Aabb3, Point3};
use kerf_path::{Tool, ToolPath};

use crate::sweep::{CompositeSweep, ConicSweep, SpheroidSweep, DEFAULT_TOLERANCE};
use crate::{AabbTree, FieldFunction, MoveLookup, SimError, Sweep};

/// Shared, thread-safe handle to a sweep shape.
pub type SharedSweep = Arc<dyn Sweep + Send + Sync>;

/// Shared, thread-safe handle to a move lookup.
pub type SharedLookup = Arc<dyn MoveLookup + Send + Sync>;

/// A field function describing everything a tool path removes over a time
/// window.
///
/// Construction indexes the swept bounding boxes of every move overlapping
/// `[start_time, end_time]` in a bounding-volume tree and lazily builds one
/// [`Sweep`] per tool number, shared by all moves using that tool. After
/// construction the sweep is immutable; `depth` and `cull` are safe to
/// call from any number of threads.
pub struct ToolSweep {
    path: Arc<ToolPath>,
    sweeps: HashMap<u32, SharedSweep>,
    start_time: f64,
    end_time: f64,
    tree: AabbTree,
    change: Option<SharedLookup>,
}

impl ToolSweep {
    /// Build a sweep for the moves overlapping `[start_time, end_time]`.
    ///
    /// A reversed interval is normalized. Moves without a tool are
    /// skipped; a move referencing a tool number missing from the path's
    /// table is an error.
    pub fn new(path: Arc<ToolPath>, start_time: f64, end_time: f64) -> Result<Self, SimError> {
        let (start_time, end_time) = if end_time < start_time {
            (end_time, start_time)
        } else {
            (start_time, end_time)
        };

        let mut sweeps: HashMap<u32, SharedSweep> = HashMap::new();
        let mut tree = AabbTree::new();
        let mut bboxes = Vec::new();
        let mut boxes = 0usize;

        for i in path.time_window(start_time, end_time) {
            let mv = path.get(i);
            let Some(tool_number) = mv.tool() else {
                continue;
            };

            if !sweeps.contains_key(&tool_number) {
                let tool = path
                    .tools()
                    .get(tool_number)
                    .ok_or(SimError::UnknownTool(tool_number))?;
                sweeps.insert(tool_number, Self::sweep_for(tool));
            }

            let start_pt = mv.position_at(start_time);
            let end_pt = mv.position_at(end_time);
            sweeps[&tool_number].bboxes(start_pt, end_pt, &mut bboxes, DEFAULT_TOLERANCE);

            boxes += bboxes.len();
            for bbox in bboxes.drain(..) {
                tree.insert(i, bbox);
            }
        }

        tree.finalize();
        debug!("tool sweep: {boxes} boxes indexed, tree height {}", tree.height());

        Ok(Self {
            path,
            sweeps,
            start_time,
            end_time,
            tree,
            change: None,
        })
    }

    /// Build a sweep covering the path's entire duration.
    pub fn over_full_path(path: Arc<ToolPath>) -> Result<Self, SimError> {
        Self::new(path, 0.0, f64::MAX)
    }

    /// The sweep shape for a tool descriptor.
    ///
    /// Every tool is a solid of revolution or a stack of them: cylindrical
    /// and snub-nose tools map to frustums, ball-nose tools to a spherical
    /// tip under a cylindrical shaft, spheroids to a (possibly stretched)
    /// sphere.
    pub fn sweep_for(tool: &Tool) -> SharedSweep {
        match *tool {
            Tool::Cylindrical { radius, length } => Arc::new(ConicSweep::cylinder(length, radius)),
            Tool::Conical { radius, length } => Arc::new(ConicSweep::new(length, radius, 0.0)),
            Tool::Ballnose { radius, length } => {
                let mut composite = CompositeSweep::new();
                composite.add(Arc::new(SpheroidSweep::sphere(radius)), 0.0);
                composite.add(Arc::new(ConicSweep::cylinder(length, radius)), radius);
                Arc::new(composite)
            }
            Tool::Spheroid { radius, length } => Arc::new(SpheroidSweep::new(radius, length)),
            Tool::Snubnose { radius, snub_radius, length } => {
                Arc::new(ConicSweep::new(length, radius, snub_radius))
            }
        }
    }

    /// Start of the represented time window.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// End of the represented time window.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Move the window start. Only affects which moves `depth` considers;
    /// the index keeps the boxes computed at construction.
    pub fn set_start_time(&mut self, start_time: f64) {
        self.start_time = start_time;
    }

    /// Move the window end. See [`set_start_time`](Self::set_start_time).
    pub fn set_end_time(&mut self, end_time: f64) {
        self.end_time = end_time;
    }

    /// The lookup describing the most recent incremental change, if any.
    pub fn change(&self) -> Option<&SharedLookup> {
        self.change.as_ref()
    }

    /// Install or clear the change lookup consulted by `cull`.
    ///
    /// Typically a second, smaller `ToolSweep` covering just the time span
    /// that differs from the previously rendered state. The old lookup is
    /// dropped wholesale; queries in flight on other threads keep their
    /// own `Arc`.
    pub fn set_change(&mut self, change: Option<SharedLookup>) {
        self.change = change;
    }
}

impl std::fmt::Debug for ToolSweep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSweep")
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("tools", &self.sweeps.len())
            .finish()
    }
}

impl FieldFunction for ToolSweep {
    fn cull(&self, region: &Aabb3) -> bool {
        match &self.change {
            Some(change) => !change.intersects(region),
            None => false,
        }
    }

    fn depth(&self, p: Point3) -> f64 {
        let mut candidates = Vec::new();
        self.tree.collisions(p, &mut candidates);

        // Earliest moves first.
        candidates.sort_unstable_by(|&a, &b| {
            self.path
                .get(a)
                .start_time()
                .total_cmp(&self.path.get(b).start_time())
        });

        let mut best = -f64::MAX;

        for i in candidates {
            let mv = self.path.get(i);
            if mv.end_time() < self.start_time || self.end_time < mv.start_time() {
                continue;
            }
            let Some(sweep) = mv.tool().and_then(|t| self.sweeps.get(&t)) else {
                continue;
            };

            let start_pt = mv.position_at(self.start_time);
            let end_pt = mv.position_at(self.end_time);

            let d = sweep.depth(start_pt, end_pt, p);
            // First hit wins. With overlapping segments this can return a
            // non-maximal depth, traded for skipping the remaining
            // candidates.
            if d >= 0.0 {
                return d;
            }
            if best < d {
                best = d;
            }
        }

        best
    }
}

impl MoveLookup for ToolSweep {
    fn bounds(&self) -> Aabb3 {
        self.tree.bounds()
    }

    fn insert(&mut self, mv: usize, bbox: Aabb3) {
        self.tree.insert(mv, bbox);
    }

    fn intersects(&self, region: &Aabb3) -> bool {
        self.tree.intersects(region)
    }

    fn collisions(&self, p: Point3, moves: &mut Vec<usize>) {
        self.tree.collisions(p, moves);
    }

    fn finalize(&mut self) {
        self.tree.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerf_path::{Move, ToolTable};

    fn cylinder_table() -> ToolTable {
        let mut tools = ToolTable::new();
        tools.set(1, Tool::Cylindrical { radius: 1.0, length: 10.0 });
        tools
    }

    fn plunge_path() -> Arc<ToolPath> {
        let mut path = ToolPath::new(cylinder_table());
        path.add(Move::new(Some(1), Point3::origin(), Point3::origin(), 0.0, 1.0));
        Arc::new(path)
    }

    #[test]
    fn test_stationary_plunge_scenario() {
        let sweep = ToolSweep::new(plunge_path(), 0.0, 1.0).unwrap();
        assert!(sweep.depth(Point3::new(0.0, 0.0, 0.0)) >= 0.0);
        assert!(sweep.depth(Point3::new(3.0, 3.0, 3.0)) < 0.0);
    }

    #[test]
    fn test_no_candidates_returns_sentinel() {
        let sweep = ToolSweep::new(plunge_path(), 0.0, 1.0).unwrap();
        assert_eq!(sweep.depth(Point3::new(100.0, 100.0, 100.0)), -f64::MAX);
    }

    #[test]
    fn test_window_excludes_later_moves() {
        let mut path = ToolPath::new(cylinder_table());
        path.add(Move::new(
            Some(1),
            Point3::origin(),
            Point3::origin(),
            0.0,
            1.0,
        ));
        path.add(Move::new(
            Some(1),
            Point3::new(20.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
            1.0,
            2.0,
        ));
        let path = Arc::new(path);

        let full = ToolSweep::new(Arc::clone(&path), 0.0, 2.0).unwrap();
        assert!(full.depth(Point3::new(20.0, 0.0, 1.0)) >= 0.0);

        let early = ToolSweep::new(path, 0.0, 0.5).unwrap();
        assert!(early.depth(Point3::new(20.0, 0.0, 1.0)) < 0.0);
    }

    #[test]
    fn test_reversed_window_is_normalized() {
        let sweep = ToolSweep::new(plunge_path(), 1.0, 0.0).unwrap();
        assert!(sweep.start_time() <= sweep.end_time());
        assert!(sweep.depth(Point3::origin()) >= 0.0);
    }

    #[test]
    fn test_moves_without_tool_are_skipped() {
        let mut path = ToolPath::new(cylinder_table());
        path.add(Move::new(
            None,
            Point3::origin(),
            Point3::new(5.0, 0.0, 0.0),
            0.0,
            1.0,
        ));
        let sweep = ToolSweep::new(Arc::new(path), 0.0, 1.0).unwrap();
        assert_eq!(sweep.depth(Point3::new(2.0, 0.0, 1.0)), -f64::MAX);
    }

    #[test]
    fn test_unknown_tool_is_an_error() {
        let mut path = ToolPath::new(ToolTable::new());
        path.add(Move::new(Some(9), Point3::origin(), Point3::origin(), 0.0, 1.0));
        let err = ToolSweep::new(Arc::new(path), 0.0, 1.0).unwrap_err();
        assert_eq!(err, SimError::UnknownTool(9));
    }

    #[test]
    fn test_overlapping_segments_first_hit_wins() {
        // Two moves cover the same region; depth returns on the earliest
        // hit without consulting the second (documented non-maximal
        // early exit).
        let mut path = ToolPath::new(cylinder_table());
        path.add(Move::new(Some(1), Point3::origin(), Point3::origin(), 0.0, 1.0));
        path.add(Move::new(Some(1), Point3::origin(), Point3::origin(), 1.0, 2.0));
        let sweep = ToolSweep::new(Arc::new(path), 0.0, 2.0).unwrap();
        assert!(sweep.depth(Point3::new(0.5, 0.0, 5.0)) >= 0.0);
    }

    #[test]
    fn test_cull_requires_change_lookup() {
        let mut sweep = ToolSweep::new(plunge_path(), 0.0, 1.0).unwrap();
        let far = Aabb3::new(
            Point3::new(50.0, 50.0, 50.0),
            Point3::new(51.0, 51.0, 51.0),
        );
        // Without a change lookup nothing culls.
        assert!(!sweep.cull(&far));

        let change: SharedLookup = Arc::new(ToolSweep::new(plunge_path(), 0.0, 1.0).unwrap());
        sweep.set_change(Some(change));
        // The change only touches the plunge region.
        assert!(sweep.cull(&far));
        let near = Aabb3::new(
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        );
        assert!(!sweep.cull(&near));

        sweep.set_change(None);
        assert!(!sweep.cull(&far));
    }

    #[test]
    fn test_ball_nose_tool_mapping() {
        let mut tools = ToolTable::new();
        tools.set(2, Tool::Ballnose { radius: 1.0, length: 10.0 });
        let mut path = ToolPath::new(tools);
        path.add(Move::new(
            Some(2),
            Point3::origin(),
            Point3::new(6.0, 0.0, 0.0),
            0.0,
            1.0,
        ));
        let sweep = ToolSweep::new(Arc::new(path), 0.0, 1.0).unwrap();

        // Tip region below z = 0 would be outside; ball covers low z.
        assert!(sweep.depth(Point3::new(3.0, 0.0, 0.2)) >= 0.0);
        // Shaft region well above the ball.
        assert!(sweep.depth(Point3::new(3.0, 0.0, 8.0)) >= 0.0);
        // Outside the swept tube.
        assert!(sweep.depth(Point3::new(3.0, 3.0, 5.0)) < 0.0);
    }

    #[test]
    fn test_shared_handles_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToolSweep>();
        assert_send_sync::<SharedSweep>();
        assert_send_sync::<SharedLookup>();
    }
}
