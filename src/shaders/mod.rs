//! Concrete shading models built on the generic pipeline.

pub mod flat;
pub mod gouraud;
pub mod phong;

pub use flat::{FlatShader, FlatVOut};
pub use gouraud::{GouraudShader, GouraudVOut};
pub use phong::{PhongShader, PhongVOut};
