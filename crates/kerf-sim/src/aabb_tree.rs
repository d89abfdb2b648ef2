//! Median-split bounding-volume tree over motion-segment boxes.

use kerf_math::{Aabb3, Point3};

use crate::MoveLookup;

/// A node of the finalized tree: a leaf owning one segment's box, or a
/// branch owning exactly two children whose boxes it unions.
#[derive(Debug)]
enum AabbNode {
    Leaf {
        bounds: Aabb3,
        mv: usize,
    },
    Branch {
        bounds: Aabb3,
        left: Box<AabbNode>,
        right: Box<AabbNode>,
    },
}

impl AabbNode {
    fn bounds(&self) -> &Aabb3 {
        match self {
            AabbNode::Leaf { bounds, .. } | AabbNode::Branch { bounds, .. } => bounds,
        }
    }

    fn leaf(mv: usize, bounds: Aabb3) -> AabbNode {
        AabbNode::Leaf { bounds, mv }
    }

    /// Recursively partition `items` into a balanced subtree.
    fn build(items: Vec<(usize, Aabb3)>) -> AabbNode {
        let mut bounds = Aabb3::empty();
        for (_, b) in &items {
            bounds.add(b);
        }

        // Degenerate groups need no split decision.
        if let [(mv, b)] = items[..] {
            return AabbNode::leaf(mv, b);
        }
        if let [(mv_l, b_l), (mv_r, b_r)] = items[..] {
            return AabbNode::Branch {
                bounds,
                left: Box::new(AabbNode::leaf(mv_l, b_l)),
                right: Box::new(AabbNode::leaf(mv_r, b_r)),
            };
        }

        // Split on the group's widest axis at the mean of the item centers.
        let axis = bounds.largest_axis();
        let split = items
            .iter()
            .map(|(_, b)| b.center()[axis])
            .sum::<f64>()
            / items.len() as f64;

        let (mut less, mut greater): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|(_, b)| b.center()[axis] < split);

        // Identical or clustered centers can land everything on one side;
        // move half across so the recursion always shrinks the group.
        if less.is_empty() {
            less = greater.split_off(greater.len() / 2);
        } else if greater.is_empty() {
            greater = less.split_off(less.len() / 2);
        }

        AabbNode::Branch {
            bounds,
            left: Box::new(AabbNode::build(less)),
            right: Box::new(AabbNode::build(greater)),
        }
    }

    fn intersects(&self, region: &Aabb3) -> bool {
        if !self.bounds().intersects(region) {
            return false;
        }
        match self {
            AabbNode::Leaf { .. } => true,
            AabbNode::Branch { left, right, .. } => {
                left.intersects(region) || right.intersects(region)
            }
        }
    }

    fn collisions(&self, p: Point3, moves: &mut Vec<usize>) {
        if !self.bounds().contains_point(&p) {
            return;
        }
        match self {
            AabbNode::Leaf { mv, .. } => moves.push(*mv),
            AabbNode::Branch { left, right, .. } => {
                left.collisions(p, moves);
                right.collisions(p, moves);
            }
        }
    }

    fn height(&self) -> usize {
        match self {
            AabbNode::Leaf { .. } => 1,
            AabbNode::Branch { left, right, .. } => left.height().max(right.height()) + 1,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            AabbNode::Leaf { .. } => 1,
            AabbNode::Branch { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// A bounding-volume tree built once from inserted segment boxes.
///
/// Usage is two-phase: [`insert`](MoveLookup::insert) accumulates boxes,
/// then [`finalize`](MoveLookup::finalize) partitions them into a balanced
/// binary tree, after which the tree is immutable and query-only.
/// Inserting after finalize, or querying before it, is a caller bug and
/// panics.
#[derive(Debug, Default)]
pub struct AabbTree {
    items: Vec<(usize, Aabb3)>,
    root: Option<Box<AabbNode>>,
    finalized: bool,
}

impl AabbTree {
    /// Create an empty tree in its insert phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of the finalized tree; zero when empty.
    pub fn height(&self) -> usize {
        assert!(self.finalized, "AabbTree not yet finalized");
        self.root.as_ref().map_or(0, |r| r.height())
    }

    /// Number of leaves in the finalized tree.
    pub fn leaf_count(&self) -> usize {
        assert!(self.finalized, "AabbTree not yet finalized");
        self.root.as_ref().map_or(0, |r| r.leaf_count())
    }
}

impl MoveLookup for AabbTree {
    fn bounds(&self) -> Aabb3 {
        assert!(self.finalized, "AabbTree not yet finalized");
        self.root.as_ref().map_or_else(Aabb3::empty, |r| *r.bounds())
    }

    fn insert(&mut self, mv: usize, bbox: Aabb3) {
        assert!(!self.finalized, "cannot insert into AabbTree after finalize");
        self.items.push((mv, bbox));
    }

    fn intersects(&self, region: &Aabb3) -> bool {
        assert!(self.finalized, "AabbTree not yet finalized");
        self.root.as_ref().is_some_and(|r| r.intersects(region))
    }

    fn collisions(&self, p: Point3, moves: &mut Vec<usize>) {
        assert!(self.finalized, "AabbTree not yet finalized");
        if let Some(root) = &self.root {
            root.collisions(p, moves);
        }
    }

    fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        let items = std::mem::take(&mut self.items);
        if !items.is_empty() {
            self.root = Some(Box::new(AabbNode::build(items)));
        }
    }
}
