//! Sphere and ellipsoid sweep: ball tips and spheroid cutters.

use kerf_math::{Aabb3, Point3, Vec3};

use super::{segment_bboxes, Sweep};

/// The volume swept by a sphere, or an axially stretched ellipsoid,
/// resting its lowest point on the motion segment's interpolated position.
///
/// Oblong spheroids are handled by rescaling z so the solid becomes a
/// sphere of `radius` before solving.
#[derive(Debug, Clone, Copy)]
pub struct SpheroidSweep {
    radius: f64,
    length: f64,
}

impl SpheroidSweep {
    /// Create a spheroid sweep with the given equatorial radius and axial
    /// length.
    pub fn new(radius: f64, length: f64) -> Self {
        Self { radius, length }
    }

    /// Create a true sphere sweep.
    pub fn sphere(radius: f64) -> Self {
        Self::new(radius, 2.0 * radius)
    }

    fn is_oblong(&self) -> bool {
        2.0 * self.radius != self.length
    }
}

impl Sweep for SpheroidSweep {
    fn bboxes(&self, start: Point3, end: Point3, out: &mut Vec<Aabb3>, tolerance: f64) {
        segment_bboxes(
            start,
            end,
            out,
            self.radius,
            self.length,
            -self.radius,
            tolerance,
        );
    }

    fn depth(&self, a: Point3, b: Point3, p: Point3) -> f64 {
        let r = self.radius;
        let (mut a, mut b, mut p) = (a, b, p);

        if self.is_oblong() {
            let scale = 2.0 * r / self.length;
            a.z *= scale;
            b.z *= scale;
            p.z *= scale;
        }

        // Coincident endpoints leave the quadratic singular; classify by
        // plain distance from the rest position.
        if a == b {
            return if (p - a).norm_squared() <= r * r {
                1.0
            } else {
                -1.0
            };
        }

        if p.z < a.z.min(b.z) || a.z.max(b.z) + 2.0 * r < p.z {
            return -1.0;
        }

        // Solve epsilon * beta^2 + gamma * beta + rho = 0 for the travel
        // fraction beta at which the sphere surface contacts p.
        let ab = b - a;
        let pa = a - p;

        let epsilon = ab.dot(&ab);
        let gamma = ab.dot(&(pa + Vec3::new(0.0, 0.0, r)));
        let rho = pa.dot(&pa) + 2.0 * r * (a.z - p.z);
        let sigma = gamma * gamma - epsilon * rho;

        if epsilon == 0.0 || sigma < 0.0 {
            return -1.0;
        }

        let beta = (-gamma - sigma.sqrt()) / epsilon;

        // Contact must lie on the traveled segment.
        if beta < 0.0 || 1.0 < beta {
            return -1.0;
        }

        1.0
    }
}
