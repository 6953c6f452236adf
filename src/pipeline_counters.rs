//! Advisory statistics collected during a draw call.

use std::ops::AddAssign;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineCounters {
    pixels: u64,
    triangles: u64,
    draws: u64,
}

impl PipelineCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixels(&self) -> u64 {
        self.pixels
    }

    pub fn triangles(&self) -> u64 {
        self.triangles
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn increment_pixel_count(&mut self) {
        self.pixels += 1;
    }

    pub fn increment_triangle_count(&mut self) {
        self.triangles += 1;
    }

    pub fn increment_draw_count(&mut self) {
        self.draws += 1;
    }
}

impl AddAssign for PipelineCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.pixels += rhs.pixels;
        self.triangles += rhs.triangles;
        self.draws += rhs.draws;
    }
}
