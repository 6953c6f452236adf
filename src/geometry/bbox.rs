//! Axis-aligned bounding boxes over the concrete 2D/3D vector types.

use crate::math::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox2f {
    min: Vec2,
    max: Vec2,
}

impl BBox2f {
    pub fn seed(p: Vec2) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut b = Self::seed(points[0]);
        for &p in &points[1..] {
            b.expand(p);
        }
        b
    }

    pub fn expand(&mut self, p: Vec2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn clamp(&mut self, min: Vec2, max: Vec2) {
        self.min.x = self.min.x.max(min.x);
        self.min.y = self.min.y.max(min.y);
        self.max.x = self.max.x.min(max.x);
        self.max.y = self.max.y.min(max.y);
    }

    pub fn min(&self) -> Vec2 {
        self.min
    }

    pub fn max(&self) -> Vec2 {
        self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox3f {
    min: Vec3,
    max: Vec3,
}

impl BBox3f {
    pub fn seed(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    pub fn from_points(points: &[Vec3]) -> Self {
        let mut b = Self::seed(points[0]);
        for &p in &points[1..] {
            b.expand(p);
        }
        b
    }

    pub fn expand(&mut self, p: Vec3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn clamp(&mut self, min: Vec3, max: Vec3) {
        self.min.x = self.min.x.max(min.x);
        self.min.y = self.min.y.max(min.y);
        self.min.z = self.min.z.max(min.z);
        self.max.x = self.max.x.min(max.x);
        self.max.y = self.max.y.min(max.y);
        self.max.z = self.max.z.min(max.z);
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }
}
