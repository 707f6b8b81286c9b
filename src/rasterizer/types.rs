//! Core types for the rasterizer

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};
use super::math::Vec2;

/// RGBA color with floating point channels
///
/// Channels are nominally in 0.0-1.0 but the type never clamps them, so
/// intermediate results of `+`, `-` and `*` may leave that range. Clamping
/// happens only when a color is packed into a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Linear blend: `self + (other - self) * t`
    pub fn lerp(self, other: Color, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Pack into the default pixel format (0xAABBGGRR)
    ///
    /// The little-endian bytes of the result are R, G, B, A, which is the
    /// layout expected by RGBA8 textures and PNG encoders.
    pub fn to_u32(self) -> u32 {
        self.pack(PixelFormat::Abgr8888)
    }

    /// Pack into a 32-bit pixel. Channels saturate at 0 and 255; NaN packs to 0.
    pub fn pack(self, format: PixelFormat) -> u32 {
        let r = channel_to_u8(self.r);
        let g = channel_to_u8(self.g);
        let b = channel_to_u8(self.b);
        let a = channel_to_u8(self.a);
        match format {
            PixelFormat::Abgr8888 => u32::from_be_bytes([a, b, g, r]),
            PixelFormat::Argb8888 => u32::from_be_bytes([a, r, g, b]),
            PixelFormat::Rgba8888 => u32::from_be_bytes([r, g, b, a]),
        }
    }

    /// Inverse of [`Color::pack`], exact up to 8-bit quantization
    pub fn unpack(value: u32, format: PixelFormat) -> Self {
        let [r, g, b, a] = format.rgba_bytes(value);
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0) as u8
}

impl Add for Color {
    type Output = Color;
    fn add(self, other: Color) -> Color {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
            a: self.a + other.a,
        }
    }
}

impl Sub for Color {
    type Output = Color;
    fn sub(self, other: Color) -> Color {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
            a: self.a - other.a,
        }
    }
}

impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, s: f32) -> Color {
        Color {
            r: self.r * s,
            g: self.g * s,
            b: self.b * s,
            a: self.a * s,
        }
    }
}

/// Channel order of a packed 32-bit pixel, named from the most significant byte down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 0xAABBGGRR (bytes R, G, B, A in little-endian memory)
    #[default]
    Abgr8888,
    /// 0xAARRGGBB (typical X11/SDL window surface)
    Argb8888,
    /// 0xRRGGBBAA
    Rgba8888,
}

impl PixelFormat {
    /// Split a packed pixel into `[r, g, b, a]`
    pub fn rgba_bytes(self, value: u32) -> [u8; 4] {
        let [hi, b1, b2, lo] = value.to_be_bytes();
        match self {
            PixelFormat::Abgr8888 => [lo, b2, b1, hi],
            PixelFormat::Argb8888 => [b1, b2, lo, hi],
            PixelFormat::Rgba8888 => [hi, b1, b2, lo],
        }
    }

    /// Convert a packed frame buffer into tightly packed RGBA8 bytes
    pub fn to_rgba8(self, pixels: &[u32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(pixels.len() * 4);
        for &pixel in pixels {
            bytes.extend_from_slice(&self.rgba_bytes(pixel));
        }
        bytes
    }
}

/// A screen-space vertex with its color
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub color: Color,
}

impl Vertex {
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            pos: Vec2::new(x, y),
            color,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.x.is_finite() && self.pos.y.is_finite()
    }
}
