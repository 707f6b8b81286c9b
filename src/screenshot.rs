//! PNG export of the frame buffer

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::rasterizer::PixelFormat;

/// Error type for screenshot saving
#[derive(Debug)]
pub enum ScreenshotError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    SizeMismatch { expected: usize, actual: usize },
}

impl From<std::io::Error> for ScreenshotError {
    fn from(e: std::io::Error) -> Self {
        ScreenshotError::IoError(e)
    }
}

impl From<image::ImageError> for ScreenshotError {
    fn from(e: image::ImageError) -> Self {
        ScreenshotError::ImageError(e)
    }
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::IoError(e) => write!(f, "IO error: {}", e),
            ScreenshotError::ImageError(e) => write!(f, "Image error: {}", e),
            ScreenshotError::SizeMismatch { expected, actual } => {
                write!(f, "Frame buffer has {} pixels, expected {}", actual, expected)
            }
        }
    }
}

impl std::error::Error for ScreenshotError {}

/// Convert a packed frame buffer into an RGBA image
pub fn to_image(
    pixels: &[u32],
    width: usize,
    height: usize,
    format: PixelFormat,
) -> Result<RgbaImage, ScreenshotError> {
    let expected = width.saturating_mul(height);
    let mismatch = ScreenshotError::SizeMismatch { expected, actual: pixels.len() };

    if pixels.len() != expected {
        return Err(mismatch);
    }
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(mismatch);
    };

    RgbaImage::from_raw(w, h, format.to_rgba8(pixels)).ok_or(mismatch)
}

/// Save the frame buffer as a PNG file, creating parent directories as needed
pub fn save_png<P: AsRef<Path>>(
    pixels: &[u32],
    width: usize,
    height: usize,
    format: PixelFormat,
    path: P,
) -> Result<(), ScreenshotError> {
    let path = path.as_ref();
    let img = to_image(pixels, width, height, format)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Numbered screenshot path inside `dir`
pub fn screenshot_path<P: AsRef<Path>>(dir: P, index: u32) -> PathBuf {
    dir.as_ref().join(format!("frame-{:04}.png", index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_to_image_unpacks_channels() {
        let pixels = [
            Color::RED.pack(PixelFormat::Argb8888),
            Color::BLUE.pack(PixelFormat::Argb8888),
        ];
        let img = to_image(&pixels, 2, 1, PixelFormat::Argb8888).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_size_mismatch() {
        let pixels = [0u32; 5];
        let err = to_image(&pixels, 2, 3, PixelFormat::Abgr8888).unwrap_err();
        assert!(matches!(err, ScreenshotError::SizeMismatch { expected: 6, actual: 5 }));
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = std::env::temp_dir().join(format!("span-raster-shots-{}", std::process::id()));
        let path = screenshot_path(&dir, 3);
        assert!(path.ends_with("frame-0003.png"));

        let pixels = vec![Color::GREEN.to_u32(); 4 * 3];
        save_png(&pixels, 4, 3, PixelFormat::Abgr8888, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(2, 1).0, [0, 255, 0, 255]);
    }
}
