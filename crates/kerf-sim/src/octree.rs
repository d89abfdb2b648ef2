//! Fixed-depth octree index over motion-segment boxes.

use kerf_math::{Aabb3, Point3, Vec3};

use crate::MoveLookup;

#[derive(Debug)]
struct OctNode {
    bounds: Aabb3,
    depth: u32,
    children: Option<Box<[OctNode; 8]>>,
    moves: Vec<usize>,
}

impl OctNode {
    fn new(bounds: Aabb3, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            children: None,
            moves: Vec::new(),
        }
    }

    fn insert(&mut self, mv: usize, bbox: &Aabb3) {
        if !self.bounds.intersects(bbox) {
            return;
        }

        // Record here when this node cannot subdivide, or when subdividing
        // gains nothing because the box covers the whole cell.
        if self.depth == 0 || bbox.contains(&self.bounds) {
            if !self.moves.contains(&mv) {
                self.moves.push(mv);
            }
            return;
        }

        let min = self.bounds.min;
        let half = self.bounds.dimensions() / 2.0;
        let depth = self.depth - 1;
        let children = self.children.get_or_insert_with(|| {
            Box::new(std::array::from_fn(|i| {
                let offset = Vec3::new(
                    if i & 1 != 0 { half.x } else { 0.0 },
                    if i & 2 != 0 { half.y } else { 0.0 },
                    if i & 4 != 0 { half.z } else { 0.0 },
                );
                OctNode::new(Aabb3::new(min + offset, min + offset + half), depth)
            }))
        });

        for child in children.iter_mut() {
            child.insert(mv, bbox);
        }
    }

    fn intersects(&self, region: &Aabb3) -> bool {
        if !self.bounds.intersects(region) {
            return false;
        }
        if !self.moves.is_empty() {
            return true;
        }
        match &self.children {
            Some(children) => children.iter().any(|c| c.intersects(region)),
            None => false,
        }
    }

    fn collisions(&self, p: Point3, moves: &mut Vec<usize>) {
        if !self.bounds.contains_point(&p) {
            return;
        }
        moves.extend_from_slice(&self.moves);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collisions(p, moves);
            }
        }
    }
}

/// An eight-way spatial subdivision index built incrementally to a fixed
/// maximum depth.
///
/// The root is a cube anchored at the supplied volume's min corner with an
/// edge equal to its largest dimension. Unlike [`AabbTree`](crate::AabbTree)
/// there is no build/query phase split; [`finalize`](MoveLookup::finalize)
/// is a no-op and inserts and queries may interleave. A segment whose box
/// spans several child cells is recorded in each of them.
#[derive(Debug)]
pub struct Octree {
    bbox: Aabb3,
    root: OctNode,
}

impl Octree {
    /// Create an index covering `bounds`, subdividing at most `max_depth`
    /// times.
    pub fn new(bounds: &Aabb3, max_depth: u32) -> Self {
        let edge = bounds.dimensions().max();
        let cube = Aabb3::new(bounds.min, bounds.min + Vec3::new(edge, edge, edge));
        Self {
            bbox: Aabb3::empty(),
            root: OctNode::new(cube, max_depth),
        }
    }
}

impl MoveLookup for Octree {
    fn bounds(&self) -> Aabb3 {
        self.bbox
    }

    fn insert(&mut self, mv: usize, bbox: Aabb3) {
        self.bbox.add(&bbox);
        self.root.insert(mv, &bbox);
    }

    fn intersects(&self, region: &Aabb3) -> bool {
        self.root.intersects(region)
    }

    fn collisions(&self, p: Point3, moves: &mut Vec<usize>) {
        self.root.collisions(p, moves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Aabb3 {
        Aabb3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(16.0, 16.0, 16.0))
    }

    fn small_box(x: f64, y: f64, z: f64) -> Aabb3 {
        Aabb3::new(
            Point3::new(x - 0.4, y - 0.4, z - 0.4),
            Point3::new(x + 0.4, y + 0.4, z + 0.4),
        )
    }

    #[test]
    fn test_point_query_finds_inserted_segment() {
        let mut tree = Octree::new(&domain(), 4);
        tree.insert(7, small_box(3.0, 3.0, 3.0));

        // Query a point interior to one deepest cell; a point on a cell
        // boundary is reported once per adjacent cell that indexed it.
        let mut hits = Vec::new();
        tree.collisions(Point3::new(3.1, 3.2, 3.3), &mut hits);
        assert_eq!(hits, vec![7]);

        hits.clear();
        tree.collisions(Point3::new(12.0, 12.0, 12.0), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_segment_spanning_children_found_from_both_sides() {
        let mut tree = Octree::new(&domain(), 3);
        // Straddles the x = 8 split plane.
        tree.insert(0, Aabb3::new(Point3::new(6.0, 1.0, 1.0), Point3::new(10.0, 2.0, 2.0)));

        for x in [6.5, 9.5] {
            let mut hits = Vec::new();
            tree.collisions(Point3::new(x, 1.5, 1.5), &mut hits);
            assert_eq!(hits, vec![0], "expected hit at x = {x}");
        }
    }

    #[test]
    fn test_intersects_matches_linear_scan() {
        let mut tree = Octree::new(&domain(), 4);
        let boxes = [
            small_box(1.0, 1.0, 1.0),
            small_box(9.0, 4.0, 2.0),
            small_box(15.0, 15.0, 15.0),
            Aabb3::new(Point3::new(2.0, 2.0, 2.0), Point3::new(14.0, 3.0, 3.0)),
        ];
        for (i, b) in boxes.iter().enumerate() {
            tree.insert(i, *b);
        }

        let queries = [
            small_box(1.2, 1.2, 1.2),
            small_box(9.0, 4.0, 2.0),
            small_box(7.0, 14.0, 1.0),
            small_box(8.0, 2.5, 2.5),
            Aabb3::new(Point3::new(-5.0, -5.0, -5.0), Point3::new(-1.0, -1.0, -1.0)),
        ];
        for query in queries {
            let brute = boxes.iter().any(|b| b.intersects(&query));
            assert_eq!(tree.intersects(&query), brute);
        }
    }

    #[test]
    fn test_covering_box_recorded_without_subdividing() {
        let mut tree = Octree::new(&domain(), 5);
        tree.insert(3, domain().grow(1.0));
        // Recorded at the root, so any point in the cube sees it.
        let mut hits = Vec::new();
        tree.collisions(Point3::new(0.5, 15.5, 8.0), &mut hits);
        assert_eq!(hits, vec![3]);
        assert!(tree.root.children.is_none());
    }

    #[test]
    fn test_depth_zero_records_everything_at_root() {
        let mut tree = Octree::new(&domain(), 0);
        tree.insert(0, small_box(1.0, 1.0, 1.0));
        tree.insert(1, small_box(9.0, 9.0, 9.0));
        tree.insert(1, small_box(9.5, 9.0, 9.0)); // same segment, second box
        assert_eq!(tree.root.moves, vec![0, 1]);
    }

    #[test]
    fn test_bounds_is_union_of_inserted_boxes() {
        let mut tree = Octree::new(&domain(), 4);
        tree.insert(0, small_box(1.0, 1.0, 1.0));
        tree.insert(1, small_box(9.0, 4.0, 2.0));
        let b = tree.bounds();
        assert_eq!(b.min, Point3::new(0.6, 0.6, 0.6));
        assert_eq!(b.max, Point3::new(9.4, 4.4, 2.4));
    }
}
