//! Gouraud shading: per-vertex light intensity, interpolated across the
//! triangle for a smooth gradient.

use crate::colour::Colour;
use crate::image::Image;
use crate::math::{vec3, Vec3};
use crate::model::Model;
use crate::pipeline::{DrawInfo, ShadeContext, Shader};

pub use super::flat::FlatVOut as GouraudVOut;

pub struct GouraudShader<'a> {
    pub albedo: &'a Image,
}

impl<'a> GouraudShader<'a> {
    pub fn new(albedo: &'a Image) -> Self {
        Self { albedo }
    }
}

impl<'a> Shader for GouraudShader<'a> {
    type VOut = GouraudVOut;

    fn shade_vertex(
        &self,
        model: &Model,
        _info: &DrawInfo,
        ctx: &ShadeContext,
        face: usize,
        corner: usize,
    ) -> GouraudVOut {
        let p = model.position(face, corner);
        let proj = ctx.mvpv * p.widen4(1.0);
        let position = proj.narrow3() / proj.w;
        let uv = model.uv(face, corner);

        let normal = model.normal(face, corner).unwrap_or(Vec3::new(0.0, 0.0, 1.0));
        let mut light = vec3::dot(normal, ctx.directional_light_view).max(0.0);
        light += 0.2;
        light = light.min(1.0);

        GouraudVOut { position, uv, light }
    }

    fn shade_fragment(&self, _info: &DrawInfo, _ctx: &ShadeContext, v: GouraudVOut) -> Colour<f32> {
        let light = Colour::new(v.light, v.light, v.light, 1.0);
        let albedo = self.albedo.sample(v.uv.u(), v.uv.v()).to_f32();
        let lighted = light * albedo;
        Colour::new(lighted.r(), lighted.g(), lighted.b(), 1.0)
    }

    fn position(v: &GouraudVOut) -> Vec3 {
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
    fn light_varies_by_per_vertex_normal() {
        let obj = "\
v 0 0 0
vt 0 0
vn 0 0 1
v 1 0 0
vt 1 0
vn 1 0 0
v 0 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/2 3/3/3
";
        let model = Model::from_obj(obj.as_bytes()).unwrap();
        let texture = Image::new(1, 1, Format::Rgb);
        let shader = GouraudShader::new(&texture);
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
        let v0 = shader.shade_vertex(&model, &info, &ctx, 0, 0);
        let v1 = shader.shade_vertex(&model, &info, &ctx, 0, 1);
        assert_relative_eq!(v0.light, 1.0, epsilon = 1e-5);
        assert_relative_eq!(v1.light, 0.2, epsilon = 1e-5);
    }
}
