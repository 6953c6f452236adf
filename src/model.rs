//! Owning container for an indexed triangle mesh parsed from an OBJ stream.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ObjError;
use crate::math::{Vec2, Vec3};
use crate::obj::{self, ParsedObj};

#[derive(Debug)]
pub struct Model {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    idx_position: Vec<[i64; 3]>,
    idx_uv: Vec<[i64; 3]>,
    idx_norm: Vec<[i64; 3]>,
}

impl Model {
    pub fn from_obj(reader: impl Read) -> Result<Self, ObjError> {
        let ParsedObj {
            positions,
            uvs,
            normals,
            idx_position,
            idx_uv,
            idx_norm,
        } = obj::parse(reader)?;

        Ok(Self {
            positions,
            uvs,
            normals,
            idx_position,
            idx_uv,
            idx_norm,
        })
    }

    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Self, ObjError> {
        let file = File::open(path)?;
        Self::from_obj(file)
    }

    pub fn nfaces(&self) -> usize {
        self.idx_position.len()
    }

    /// Position of corner `i` (0, 1, or 2) of face `face`.
    pub fn position(&self, face: usize, i: usize) -> Vec3 {
        let idx = self.idx_position[face][i];
        self.positions[idx as usize]
    }

    /// UV of corner `i` of face `face`, or `(0,0)` if the face has none.
    pub fn uv(&self, face: usize, i: usize) -> Vec2 {
        let idx = self.idx_uv[face][i];
        if idx < 0 {
            Vec2::ZERO
        } else {
            self.uvs[idx as usize]
        }
    }

    /// Normal of corner `i` of face `face`, or `None` if the face has none.
    pub fn normal(&self, face: usize, i: usize) -> Option<Vec3> {
        let idx = self.idx_norm[face][i];
        if idx < 0 {
            None
        } else {
            Some(self.normals[idx as usize])
        }
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TRIANGLE: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    #[test]
    fn loads_positions_and_faces() {
        let model = Model::from_obj(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(model.nfaces(), 1);
        let p0 = model.position(0, 0);
        assert_relative_eq!(p0.x, 0.0);
        let p1 = model.position(0, 1);
        assert_relative_eq!(p1.x, 1.0);
    }

    #[test]
    fn uv_and_normal_absent_when_not_provided() {
        let model = Model::from_obj(TRIANGLE.as_bytes()).unwrap();
        assert!(!model.has_uvs());
        assert!(model.normal(0, 0).is_none());
        assert_relative_eq!(model.uv(0, 0).x, 0.0);
    }
}
