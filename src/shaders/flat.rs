//! Flat shading: one light intensity per face, computed from the face
//! normal, held constant across the triangle.

use crate::colour::Colour;
use crate::image::Image;
use crate::interpolate::Interpolate;
use crate::math::{vec3, Vec2, Vec3};
use crate::model::Model;
use crate::pipeline::{DrawInfo, ShadeContext, Shader};

#[derive(Clone, Copy, Debug, Default)]
pub struct FlatVOut {
    pub position: Vec3,
    pub uv: Vec2,
    pub light: f32,
}

impl Interpolate for FlatVOut {
    fn weighted_sum3(a: Self, b: Self, c: Self, wa: f32, wb: f32, wc: f32) -> Self {
        FlatVOut {
            position: a.position * wa + b.position * wb + c.position * wc,
            uv: a.uv * wa + b.uv * wb + c.uv * wc,
            light: a.light * wa + b.light * wb + c.light * wc,
        }
    }
}

pub struct FlatShader<'a> {
    pub albedo: &'a Image,
}

impl<'a> FlatShader<'a> {
    pub fn new(albedo: &'a Image) -> Self {
        Self { albedo }
    }
}

impl<'a> Shader for FlatShader<'a> {
    type VOut = FlatVOut;

    fn shade_vertex(
        &self,
        model: &Model,
        _info: &DrawInfo,
        ctx: &ShadeContext,
        face: usize,
        corner: usize,
    ) -> FlatVOut {
        let p = model.position(face, corner);
        let proj = ctx.mvpv * p.widen4(1.0);
        let position = proj.narrow3() / proj.w;
        let uv = model.uv(face, corner);

        let p0 = model.position(face, 0);
        let p1 = model.position(face, 1);
        let p2 = model.position(face, 2);
        let mut normal = vec3::cross(p1 - p0, p2 - p0);
        normal.normalize();

        let mut light = vec3::dot(normal, ctx.directional_light_view).max(0.0);
        light += 0.2;
        light = light.min(1.0);

        FlatVOut { position, uv, light }
    }

    fn shade_fragment(&self, _info: &DrawInfo, _ctx: &ShadeContext, v: FlatVOut) -> Colour<f32> {
        let light = Colour::new(v.light, v.light, v.light, 1.0);
        let albedo = self.albedo.sample(v.uv.u(), v.uv.v()).to_f32();
        let mut lighted = light * albedo;
        lighted = Colour::new(lighted.r(), lighted.g(), lighted.b(), 1.0);
        lighted
    }

    fn position(v: &FlatVOut) -> Vec3 {
        v.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Format;
    use crate::math::Mat4;
    use approx::assert_relative_eq;

    #[test]
    fn face_normal_facing_light_is_fully_lit_minus_ambient_cap() {
        let obj = "v 0 0 0\nvt 0 0\nv 1 0 0\nvt 1 0\nv 0 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let model = Model::from_obj(obj.as_bytes()).unwrap();
        let texture = Image::new(1, 1, Format::Rgb);
        let shader = FlatShader::new(&texture);
        let info = DrawInfo {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            viewport: Mat4::identity(),
            eye: Vec3::ZERO,
            point_light: Vec3::ZERO,
            directional_light: Vec3::new(0.0, 0.0, 1.0),
            ambient_light: 0.2,
        };
        let ctx = ShadeContext::new(&info);
        let vout = shader.shade_vertex(&model, &info, &ctx, 0, 0);
        assert_relative_eq!(vout.light, 1.0, epsilon = 1e-5);
    }
}
