//! Scanline software rasterizer
//!
//! Features:
//! - Gouraud-shaded triangles by edge walking (long edge vs. two short edges)
//! - DDA lines with interpolated color
//! - Borrowed, caller-owned frame buffers with silent clipping
//! - Explicit packed pixel formats

mod math;
mod types;
mod scanline;
mod render;

pub use math::*;
pub use types::*;
pub use scanline::*;
pub use render::*;

/// Default frame buffer dimensions
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
