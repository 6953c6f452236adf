//! The generic draw loop: vertex shading, backface cull, bounding-box
//! rasterization, barycentric interpolation, depth test, fragment shading.

use crate::colour::Colour;
use crate::geometry::{BBox3f, BarycentricBasis};
use crate::image::Image;
use crate::interpolate::Interpolate;
use crate::math::{vec3, Mat4, Vec3};
use crate::model::Model;
use crate::pipeline_counters::PipelineCounters;

/// Uniform bundle passed to every shader invocation within a single draw.
#[derive(Clone, Copy, Debug)]
pub struct DrawInfo {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
    pub eye: Vec3,
    pub point_light: Vec3,
    pub directional_light: Vec3,
    pub ambient_light: f32,
}

/// Transforms derived once per draw from a [`DrawInfo`]: the composed
/// model-view and model-view-projection-viewport matrices, and the two
/// light vectors moved into view space. The pipeline builds this once in
/// [`draw`] and passes it to every `shade_vertex`/`shade_fragment` call,
/// rather than having each shader invocation rebuild it from `DrawInfo`.
#[derive(Clone, Copy, Debug)]
pub struct ShadeContext {
    pub mv: Mat4,
    pub mvpv: Mat4,
    pub directional_light_view: Vec3,
    pub point_light_view: Vec3,
}

impl ShadeContext {
    pub fn new(info: &DrawInfo) -> Self {
        let mv = info.view * info.model;
        let mvpv = info.viewport * info.projection * mv;
        let directional_light_view = (info.view * info.directional_light.widen4(1.0)).narrow3();
        let point_light_view = (info.view * info.point_light.widen4(1.0)).narrow3();

        Self { mv, mvpv, directional_light_view, point_light_view }
    }
}

/// A programmable stage pair: project a vertex to screen space, then shade
/// the interpolated fragment.
pub trait Shader {
    type VOut: Interpolate;

    fn shade_vertex(
        &self,
        model: &Model,
        info: &DrawInfo,
        ctx: &ShadeContext,
        face: usize,
        corner: usize,
    ) -> Self::VOut;
    fn shade_fragment(&self, info: &DrawInfo, ctx: &ShadeContext, v: Self::VOut) -> Colour<f32>;

    /// Screen-space position (x,y pixels, z depth) carried by `VOut`.
    fn position(v: &Self::VOut) -> Vec3;
}

/// Runs one draw call: iterates every face of `model`, shading, culling,
/// rasterizing, and depth-testing it against `color`/`depth`.
pub fn draw<S: Shader>(
    shader: &S,
    model: &Model,
    info: &DrawInfo,
    color: &mut Image,
    depth: &mut [f32],
) -> PipelineCounters {
    let mut counters = PipelineCounters::new();
    counters.increment_draw_count();

    let ctx = ShadeContext::new(info);
    let width = color.width();
    let height = color.height();

    for face in 0..model.nfaces() {
        let v0 = shader.shade_vertex(model, info, &ctx, face, 0);
        let v1 = shader.shade_vertex(model, info, &ctx, face, 1);
        let v2 = shader.shade_vertex(model, info, &ctx, face, 2);

        let p0 = S::position(&v0);
        let p1 = S::position(&v1);
        let p2 = S::position(&v2);

        let mut normal = vec3::cross(p2 - p0, p1 - p0);
        normal.normalize();
        if vec3::dot(normal, Vec3::new(0.0, 0.0, -1.0)) < 0.0 {
            continue;
        }

        let mut bbox = BBox3f::seed(p0);
        bbox.expand(p1);
        bbox.expand(p2);
        bbox.clamp(
            Vec3::ZERO,
            Vec3::new((width - 1) as f32, (height - 1) as f32, 0.0),
        );

        counters.increment_triangle_count();

        let basis = BarycentricBasis::new(p0, p1, p2);
        let min = bbox.min();
        let max = bbox.max();
        let x0 = min.x.ceil().max(0.0) as i64;
        let x1 = max.x.floor().min((width - 1) as f32) as i64;
        let y0 = min.y.ceil().max(0.0) as i64;
        let y1 = max.y.floor().min((height - 1) as f32) as i64;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let w = basis.compute(Vec3::new(x as f32, y as f32, 0.0));
                if w.x < 0.0 || w.y < 0.0 || w.z < 0.0 {
                    continue;
                }

                let z = w.x * p0.z + w.y * p1.z + w.z * p2.z;
                let idx = y as usize * width + x as usize;
                if z <= depth[idx] {
                    continue;
                }

                depth[idx] = z;
                counters.increment_pixel_count();

                let vout = S::VOut::weighted_sum3(v0, v1, v2, w.x, w.y, w.z);
                let out_colour = shader.shade_fragment(info, &ctx, vout);
                if out_colour.a() > 0.0 {
                    color.set(x as usize, y as usize, out_colour.to_u8());
                }
            }
        }
    }

    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Format;
    use approx::assert_relative_eq;

    #[derive(Clone, Copy)]
    struct FlatVOut {
        position: Vec3,
    }

    impl Interpolate for FlatVOut {
        fn weighted_sum3(a: Self, b: Self, c: Self, wa: f32, wb: f32, wc: f32) -> Self {
            FlatVOut {
                position: a.position * wa + b.position * wb + c.position * wc,
            }
        }
    }

    struct SolidShader;

    impl Shader for SolidShader {
        type VOut = FlatVOut;

        fn shade_vertex(
            &self,
            model: &Model,
            _info: &DrawInfo,
            _ctx: &ShadeContext,
            face: usize,
            corner: usize,
        ) -> FlatVOut {
            FlatVOut { position: model.position(face, corner) }
        }

        fn shade_fragment(&self, _info: &DrawInfo, _ctx: &ShadeContext, _v: FlatVOut) -> Colour<f32> {
            Colour::new(1.0, 0.0, 0.0, 1.0)
        }

        fn position(v: &FlatVOut) -> Vec3 {
            v.position
        }
    }

    fn triangle_model() -> Model {
        let obj = "v 1 1 1\nv 8 1 1\nv 1 8 1\nf 1 2 3\n";
        Model::from_obj(obj.as_bytes()).unwrap()
    }

    fn identity_info() -> DrawInfo {
        DrawInfo {
            model: Mat4::identity(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            viewport: Mat4::identity(),
            eye: Vec3::ZERO,
            point_light: Vec3::ZERO,
            directional_light: Vec3::new(0.0, 0.0, -1.0),
            ambient_light: 0.2,
        }
    }

    #[test]
    fn draws_triangle_and_increments_counters() {
        let model = triangle_model();
        let info = identity_info();
        let mut color = Image::new(10, 10, Format::Rgb);
        let mut depth = vec![f32::NEG_INFINITY; 100];

        let counters = draw(&SolidShader, &model, &info, &mut color, &mut depth);

        assert_eq!(counters.draws(), 1);
        assert_eq!(counters.triangles(), 1);
        assert!(counters.pixels() > 0);
        let centre = color.get(2, 2);
        assert_eq!(centre.r(), 255);
    }

    #[test]
    fn backfacing_triangle_is_culled() {
        let obj = "v 1 8 1\nv 8 1 1\nv 1 1 1\nf 1 2 3\n";
        let model = Model::from_obj(obj.as_bytes()).unwrap();
        let info = identity_info();
        let mut color = Image::new(10, 10, Format::Rgb);
        let mut depth = vec![f32::NEG_INFINITY; 100];

        let counters = draw(&SolidShader, &model, &info, &mut color, &mut depth);
        assert_eq!(counters.triangles(), 0);
        assert_eq!(counters.pixels(), 0);
    }

    #[test]
    fn nearer_triangle_wins_depth_test() {
        let obj = "\
v 1 1 1
v 8 1 1
v 1 8 1
v 1 1 2
v 8 1 2
v 1 8 2
f 1 2 3
f 4 5 6
";
        let model = Model::from_obj(obj.as_bytes()).unwrap();
        let info = identity_info();
        let mut color = Image::new(10, 10, Format::Rgb);
        let mut depth = vec![f32::NEG_INFINITY; 100];

        draw(&SolidShader, &model, &info, &mut color, &mut depth);
        // the second, farther-in-z (larger z = closer per the viewport convention)
        // triangle should own the depth buffer at the shared region
        assert_relative_eq!(depth[2 * 10 + 2], 2.0);
    }

    #[test]
    fn shade_context_leaves_lights_unchanged_under_identity_view() {
        let mut info = identity_info();
        info.point_light = Vec3::new(1.0, 2.0, 3.0);
        info.directional_light = Vec3::new(0.0, 0.0, -1.0);

        let ctx = ShadeContext::new(&info);
        assert_relative_eq!(ctx.point_light_view.x, 1.0);
        assert_relative_eq!(ctx.directional_light_view.z, -1.0);
    }
}
