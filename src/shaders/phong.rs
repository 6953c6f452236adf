//! Phong shading: per-pixel normal and specular highlight from a point
//! light, plus a flat ambient term.

use crate::colour::Colour;
use crate::image::Image;
use crate::interpolate::Interpolate;
use crate::math::{vec3, Vec2, Vec3};
use crate::model::Model;
use crate::pipeline::{DrawInfo, ShadeContext, Shader};

#[derive(Clone, Copy, Debug, Default)]
pub struct PhongVOut {
    pub cam_pos: Vec3,
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Interpolate for PhongVOut {
    fn weighted_sum3(a: Self, b: Self, c: Self, wa: f32, wb: f32, wc: f32) -> Self {
        PhongVOut {
            cam_pos: a.cam_pos * wa + b.cam_pos * wb + c.cam_pos * wc,
            position: a.position * wa + b.position * wb + c.position * wc,
            normal: a.normal * wa + b.normal * wb + c.normal * wc,
            uv: a.uv * wa + b.uv * wb + c.uv * wc,
        }
    }
}

pub struct PhongShader<'a> {
    pub albedo: &'a Image,
}

impl<'a> PhongShader<'a> {
    pub fn new(albedo: &'a Image) -> Self {
        Self { albedo }
    }
}

/// Reflects `neg_light_dir` about `normal`.
fn reflect(neg_light_dir: Vec3, normal: Vec3) -> Vec3 {
    neg_light_dir - normal * (2.0 * vec3::dot(normal, neg_light_dir))
}

impl<'a> Shader for PhongShader<'a> {
    type VOut = PhongVOut;

    fn shade_vertex(
        &self,
        model: &Model,
        _info: &DrawInfo,
        ctx: &ShadeContext,
        face: usize,
        corner: usize,
    ) -> PhongVOut {
        let vertex_position = model.position(face, corner).widen4(1.0);
        let proj = ctx.mvpv * vertex_position;
        let cam_pos = (ctx.mv * vertex_position).narrow3();
        let position = proj.narrow3() / proj.w;
        let uv = model.uv(face, corner);
        let normal_world = model.normal(face, corner).unwrap_or(Vec3::new(0.0, 0.0, 1.0));
        let normal = (ctx.mv * normal_world.widen4(1.0)).narrow3();

        PhongVOut { cam_pos, position, normal, uv }
    }

    fn shade_fragment(&self, info: &DrawInfo, ctx: &ShadeContext, v: PhongVOut) -> Colour<f32> {
        let mut light_dir = ctx.point_light_view - v.cam_pos;
        let light_distance = light_dir.normalize();
        let n_dot_l = vec3::dot(v.normal, light_dir).max(0.0);

        let mut phong = 0.0f32;
        if n_dot_l > 0.0 {
            let view = info.view.get_column(3).narrow3();
            let r = reflect(-light_dir, v.normal);
            phong = vec3::dot(view, r).clamp(0.0, 1.0).powf(16.0);
        }

        let albedo = self.albedo.sample(v.uv.u(), v.uv.v()).to_f32().to_vec4();
        let attenuation = 1.0 / light_distance;
        let spec_colour = crate::math::Vec4::new(0.0, 0.0, 1.0, 1.0);
        let ambient = 0.2;

        let lighted = albedo * (attenuation * n_dot_l)
            + spec_colour * (attenuation * phong)
            + albedo * ambient;

        Colour::from_vec4(lighted)
    }

    fn position(v: &PhongVOut) -> Vec3 {
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
    fn reflect_of_normal_incidence_is_straight_back() {
        let n = Vec3::new(0.0, 0.0, 1.0);
        let incoming = Vec3::new(0.0, 0.0, -1.0);
        let r = reflect(incoming, n);
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(r.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn fragment_has_no_specular_when_light_faces_away() {
        let obj = "v 0 0 0\nvt 0 0\nvn 0 0 -1\nv 1 0 0\nvt 1 0\nvn 0 0 -1\n\
                   v 0 1 0\nvt 0 1\nvn 0 0 -1\nf 1/1/1 2/2/2 3/3/3\n";
        let model = Model::from_obj(obj.as_bytes()).unwrap();
        let texture = Image::new(1, 1, Format::Rgb);
        let shader = PhongShader::new(&texture);
        let info = DrawInfo {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            viewport: Mat4::identity(),
            eye: Vec3::ZERO,
            point_light: Vec3::new(0.0, 0.0, 10.0),
            directional_light: Vec3::ZERO,
            ambient_light: 0.2,
        };
        let ctx = ShadeContext::new(&info);
        let vout = shader.shade_vertex(&model, &info, &ctx, 0, 0);
        let colour = shader.shade_fragment(&info, &ctx, vout);
        assert!(colour.r() >= 0.0);
    }
}
