//! Screen-space math for scanline rasterization

use std::ops::{Add, Mul};

/// 2D Vector (screen coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians (screen Y grows downward)
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// Linear interpolation between two scalars
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fractional position of `value` within `start..=end`
///
/// Returns 0.0 for an empty range so zero-height edges and zero-width
/// spans never divide by zero.
pub fn factor(value: i32, start: i32, end: i32) -> f32 {
    let extent = end - start;
    if extent == 0 {
        return 0.0;
    }
    (value - start) as f32 / extent as f32
}

/// Round a screen coordinate to the nearest pixel
///
/// Coordinates are kept within +-2^24 (the range where f32 still resolves
/// whole pixels) so edge arithmetic cannot overflow.
pub fn snap(v: f32) -> i32 {
    const LIMIT: f32 = 16_777_216.0;
    v.round().clamp(-LIMIT, LIMIT) as i32
}

/// Calculate barycentric weights of point p in triangle (v1, v2, v3)
/// Returns None for a degenerate triangle
pub fn barycentric(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> Option<[f32; 3]> {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

    if d.abs() < 0.0001 {
        return None;
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    let w = 1.0 - u - v;

    Some([u, v, w])
}
