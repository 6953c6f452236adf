//! Barycentric coordinate basis for a single screen-space triangle.

use crate::math::Vec3;

/// Precomputed basis for repeated barycentric queries against one triangle.
///
/// The two basis vectors are derived once at construction; `compute` is a
/// pure function of the query point, unlike the scratch-mutating original
/// this is ported from.
#[derive(Clone, Copy, Debug)]
pub struct BarycentricBasis {
    root: Vec3,
    b0: Vec3,
    b1: Vec3,
}

impl BarycentricBasis {
    pub fn new(t0: Vec3, t1: Vec3, t2: Vec3) -> Self {
        Self {
            root: t0,
            b0: Vec3::new(t2.x - t0.x, t1.x - t0.x, 0.0),
            b1: Vec3::new(t2.y - t0.y, t1.y - t0.y, 0.0),
        }
    }

    /// Returns barycentric weights `(w0, w1, w2)` for pixel centre `p`.
    ///
    /// Degenerate (zero-area, to within rounding) triangles report the
    /// sentinel `(-1, 1, 1)`, which fails any all-non-negative inside test.
    pub fn compute(&self, p: Vec3) -> Vec3 {
        let b0 = Vec3::new(self.b0.x, self.b0.y, self.root.x - p.x);
        let b1 = Vec3::new(self.b1.x, self.b1.y, self.root.y - p.y);
        let u = crate::math::vec3::cross(b0, b1);

        if u.z.abs() < 1.0 {
            return Vec3::new(-1.0, 1.0, 1.0);
        }

        let zrecip = 1.0 / u.z;
        Vec3::new(1.0 - (u.x + u.y) * zrecip, u.y * zrecip, u.x * zrecip)
    }
}
