//! Offline demo: load an OBJ mesh and a diffuse texture, render one frame
//! with a chosen shader, and write the result as a TGA image.
//!
//! Usage: `tga_render <model.obj> <diffuse.tga> [flat|gouraud|phong] [out.tga]`

use std::env;
use std::process::ExitCode;

use log::error;

use swrast::image::{Format, Image};
use swrast::math::{lookat, viewport, Mat4, Vec3};
use swrast::model::Model;
use swrast::pipeline::DrawInfo;
use swrast::shaders::{FlatShader, GouraudShader, PhongShader};

const WIDTH: usize = 800;
const HEIGHT: usize = 800;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: tga_render <model.obj> <diffuse.tga> [flat|gouraud|phong] [out.tga]");
        return ExitCode::FAILURE;
    }

    let model = match Model::from_obj_file(&args[1]) {
        Ok(m) => m,
        Err(e) => {
            error!("failed to load model {}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };

    let texture = match Image::read_tga_file(&args[2]) {
        Ok(t) => t,
        Err(e) => {
            error!("failed to load texture {}: {}", args[2], e);
            return ExitCode::FAILURE;
        }
    };

    let shader_name = args.get(3).map(String::as_str).unwrap_or("gouraud");
    let out_path = args.get(4).map(String::as_str).unwrap_or("out.tga");

    let eye = Vec3::new(1.0, 1.0, 3.0);
    let info = DrawInfo {
        model: Mat4::identity(),
        view: lookat(eye, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
        projection: perspective(eye.length()),
        viewport: viewport(0.0, 0.0, WIDTH as f32, HEIGHT as f32),
        eye,
        point_light: Vec3::new(1.0, 1.0, 1.0),
        directional_light: Vec3::new(1.0, 1.0, 1.0),
        ambient_light: 0.2,
    };

    let mut color = Image::new(WIDTH, HEIGHT, Format::Rgb);
    let mut depth = vec![f32::NEG_INFINITY; WIDTH * HEIGHT];

    let counters = match shader_name {
        "flat" => swrast::draw(&FlatShader::new(&texture), &model, &info, &mut color, &mut depth),
        "phong" => swrast::draw(&PhongShader::new(&texture), &model, &info, &mut color, &mut depth),
        "gouraud" => {
            swrast::draw(&GouraudShader::new(&texture), &model, &info, &mut color, &mut depth)
        }
        other => {
            error!("unknown shader '{}', expected flat, gouraud, or phong", other);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = color.write_tga_file(out_path, true) {
        error!("failed to write {}: {}", out_path, e);
        return ExitCode::FAILURE;
    }

    println!(
        "wrote {} ({} triangles, {} pixels, {} draws)",
        out_path,
        counters.triangles(),
        counters.pixels(),
        counters.draws()
    );
    ExitCode::SUCCESS
}

/// A simple perspective matrix: w picks up `-z/distance` so the subsequent
/// homogeneous divide produces perspective foreshortening.
fn perspective(distance: f32) -> Mat4 {
    let mut m = Mat4::identity();
    m.set(3, 2, -1.0 / distance);
    m
}
