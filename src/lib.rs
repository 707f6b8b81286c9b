//! Span Raster: scanline triangle rasterizer
//!
//! Fills Gouraud-shaded triangles into a caller-owned `u32` frame buffer by
//! walking triangle edges one scanline at a time. No GPU involved.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod config;
pub mod app;
pub mod screenshot;
