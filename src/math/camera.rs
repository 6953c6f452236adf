//! Free-function camera helpers: view and viewport matrix construction.

use super::mat4::Mat4;
use super::vec3::{cross, Vec3};

/// Builds a right-handed view matrix looking from `eye` towards `at`.
///
/// Falls back to identity when `eye` and `at` are coincident, since no
/// forward axis can be derived.
pub fn lookat(eye: Vec3, at: Vec3, up: Vec3) -> Mat4 {
    let delta = at - eye;
    if delta.length_sq() < 1e-3 {
        return Mat4::identity();
    }

    let z = (-delta).normalized();
    let x = cross(up, z).normalized();
    let y = cross(z, x).normalized();

    let mut m = Mat4::identity();
    m.set_row(0, x.widen4(-super::vec3::dot(x, at)));
    m.set_row(1, y.widen4(-super::vec3::dot(y, at)));
    m.set_row(2, z.widen4(-super::vec3::dot(z, at)));
    m
}

/// Builds the matrix mapping the canonical cube `[-1, 1]^3` to the rectangle
/// `(x, y)`-`(x+w, y+h)` in xy and to `[0, 255]` in z.
pub fn viewport(x: f32, y: f32, w: f32, h: f32) -> Mat4 {
    let mut m = Mat4::identity();
    m.set(0, 0, w / 2.0);
    m.set(0, 3, x + w / 2.0);
    m.set(1, 1, h / 2.0);
    m.set(1, 3, y + h / 2.0);
    m.set(2, 2, 127.5);
    m.set(2, 3, 127.5);
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lookat_degenerate_falls_back_to_identity() {
        let eye = Vec3::new(1.0, 1.0, 1.0);
        let m = lookat(eye, eye, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(m.get(0, 0), 1.0);
        assert_relative_eq!(m.get(1, 1), 1.0);
        assert_relative_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn viewport_maps_ndc_corners_to_pixel_bounds() {
        let m = viewport(0.0, 0.0, 800.0, 600.0);
        let centre = m * super::super::vec4::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(centre.x, 400.0);
        assert_relative_eq!(centre.y, 300.0);
        let corner = m * super::super::vec4::Vec4::new(-1.0, -1.0, -1.0, 1.0);
        assert_relative_eq!(corner.x, 0.0);
        assert_relative_eq!(corner.y, 0.0);
        assert_relative_eq!(corner.z, 0.0);
        let far_corner = m * super::super::vec4::Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(far_corner.z, 255.0);
    }
}
