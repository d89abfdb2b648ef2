//! Frustum sweep: cylinders, cones, and snub-nose tools.

use kerf_math::{Aabb3, Point3};

use super::{segment_bboxes, Sweep};

fn sqr(x: f64) -> f64 {
    x * x
}

/// The volume swept by a frustum whose axis stays vertical: a cylinder
/// when the radii match, a cone when the bottom radius is zero.
///
/// The tool's flat tip sits at the motion segment's interpolated position
/// and the body extends `length` upward, with radius tapering linearly
/// from `radius_bottom` at the tip to `radius_top`.
#[derive(Debug, Clone, Copy)]
pub struct ConicSweep {
    length: f64,
    radius_top: f64,
    radius_bottom: f64,
    /// Radius change per unit height: `(radius_top - radius_bottom) / length`.
    taper: f64,
}

impl ConicSweep {
    /// Create a frustum sweep.
    pub fn new(length: f64, radius_top: f64, radius_bottom: f64) -> Self {
        Self {
            length,
            radius_top,
            radius_bottom,
            taper: (radius_top - radius_bottom) / length,
        }
    }

    /// Create a straight cylinder sweep.
    pub fn cylinder(length: f64, radius: f64) -> Self {
        Self::new(length, radius, radius)
    }

    /// Radius of the tool `height` above its tip.
    fn radius_at(&self, height: f64) -> f64 {
        self.radius_bottom + self.taper * height
    }
}

impl Sweep for ConicSweep {
    fn bboxes(&self, start: Point3, end: Point3, out: &mut Vec<Aabb3>, tolerance: f64) {
        let radius = self.radius_top.max(self.radius_bottom);
        segment_bboxes(start, end, out, radius, self.length, 0.0, tolerance);
    }

    fn depth(&self, a: Point3, b: Point3, p: Point3) -> f64 {
        let (l, rt, rb, tm) = (self.length, self.radius_top, self.radius_bottom, self.taper);

        // The tool's z extent over the whole travel.
        if p.z < a.z.min(b.z) || a.z.max(b.z) + l < p.z {
            return -1.0;
        }

        // Coincident endpoints leave the quadratic singular; classify
        // against the tool standing at `a` instead.
        if a == b {
            let r = self.radius_at(p.z - a.z);
            let d2 = sqr(p.x - a.x) + sqr(p.y - a.y);
            return if d2 <= r * r { 1.0 } else { -1.0 };
        }

        // Solve epsilon * beta^2 + gamma * beta + rho = 0 for the travel
        // fraction beta at which the tapered side wall contacts p.
        let mut epsilon = sqr(b.x - a.x) + sqr(b.y - a.y) - sqr(tm * (b.z - a.z));

        // A vertical move of a cylindrical tool has no horizontal or taper
        // term; substitute a tiny epsilon to keep the quadratic solvable.
        if epsilon == 0.0 && b.z != a.z && tm == 0.0 {
            epsilon = 1e-9;
        }

        let gamma = (a.x - p.x) * (b.x - a.x)
            + (a.y - p.y) * (b.y - a.y)
            + (sqr(tm) * (a.z - p.z) - tm * rb) * (a.z - b.z);
        let rho = sqr(a.x - p.x) + sqr(a.y - p.y) - sqr(tm * (a.z - p.z) - rb);
        let sigma = sqr(gamma) - epsilon * rho;

        if epsilon == 0.0 || sigma < 0.0 {
            return -1.0;
        }

        let beta = (-gamma - sigma.sqrt()) / epsilon;

        // z of the tool tip at the contact.
        let qz = (b.z - a.z) * beta + a.z;

        if p.z < qz || qz + l < p.z {
            // The side-wall contact misses the tool's height range; p may
            // still be cut by the flat bottom or top disc crossing its
            // z plane.
            if rb != 0.0 {
                let beta = (p.z - a.z) / (b.z - a.z);
                if (0.0..=1.0).contains(&beta) {
                    let ex = beta * (b.x - a.x) + a.x;
                    let ey = beta * (b.y - a.y) + a.y;
                    if sqr(ex - p.x) + sqr(ey - p.y) <= rb * rb {
                        return 1.0;
                    }
                }
            }
            if rt != 0.0 {
                let beta = (p.z - a.z - l) / (b.z - a.z);
                if (0.0..=1.0).contains(&beta) {
                    let ex = beta * (b.x - a.x) + a.x;
                    let ey = beta * (b.y - a.y) + a.y;
                    if sqr(ex - p.x) + sqr(ey - p.y) <= rt * rt {
                        return 1.0;
                    }
                }
            }
            return -1.0;
        }

        // Contact must lie on the traveled segment.
        if beta < 0.0 || 1.0 < beta {
            return -1.0;
        }

        1.0
    }
}
