//! Generic RGBA colour, with saturating conversion between `u8` and `f32`
//! component types.

use std::ops::Mul;

use crate::math::Vec4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colour<T> {
    r: T,
    g: T,
    b: T,
    a: T,
}

impl<T: Copy> Colour<T> {
    pub fn new(r: T, g: T, b: T, a: T) -> Self {
        Self { r, g, b, a }
    }

    pub fn r(&self) -> T {
        self.r
    }

    pub fn g(&self) -> T {
        self.g
    }

    pub fn b(&self) -> T {
        self.b
    }

    pub fn a(&self) -> T {
        self.a
    }
}

impl Colour<u8> {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// Builds a colour from up to 4 leading bytes of `source`, filling the
    /// remainder with 0 and defaulting alpha to opaque.
    pub fn from_bytes(source: &[u8]) -> Self {
        let mut c = [0u8, 0, 0, 255];
        let n = source.len().min(4);
        c[..n].copy_from_slice(&source[..n]);
        Self::new(c[0], c[1], c[2], c[3])
    }

    pub fn to_f32(self) -> Colour<f32> {
        Colour::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }
}

impl Colour<f32> {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn to_u8(self) -> Colour<u8> {
        let clamp = |c: f32| (c.min(1.0).max(0.0) * 255.0) as u8;
        Colour::new(clamp(self.r), clamp(self.g), clamp(self.b), clamp(self.a))
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    pub fn from_vec4(v: Vec4) -> Self {
        Colour::new(v.x, v.y, v.z, v.w)
    }
}

impl Mul for Colour<f32> {
    type Output = Colour<f32>;
    fn mul(self, rhs: Colour<f32>) -> Colour<f32> {
        Colour::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
            self.a * rhs.a,
        )
    }
}
