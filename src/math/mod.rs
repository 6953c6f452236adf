//! Linear algebra kernel: concrete 2/3/4-component vectors and a row-major
//! 4x4 matrix, plus free-function camera helpers.

pub mod camera;
pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use camera::{lookat, viewport};
pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
