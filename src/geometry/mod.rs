pub mod barycentric;
pub mod bbox;

pub use barycentric::BarycentricBasis;
pub use bbox::{BBox2f, BBox3f};
