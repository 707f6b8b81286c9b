//! Demo configuration loading and saving
//!
//! Uses RON (Rusty Object Notation) so settings stay human-editable.
//! Missing fields take their default value.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Serialize, Deserialize};

use crate::rasterizer::{Color, PixelFormat, HEIGHT, WIDTH};

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "demo.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for the spinning triangle demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frame buffer size in pixels
    pub width: usize,
    pub height: usize,
    /// Window pixels per frame buffer pixel
    pub window_scale: u32,
    /// Distance from screen center to each vertex
    pub radius: f32,
    /// Radians per second
    pub rotation_speed: f32,
    pub vertex_colors: [Color; 3],
    pub clear_color: Color,
    /// Packing used for the frame buffer
    pub pixel_format: PixelFormat,
    /// Outline the triangle with lines on startup
    pub wireframe: bool,
    pub screenshot_dir: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            window_scale: 2,
            radius: 110.0,
            rotation_speed: std::f32::consts::FRAC_PI_2,
            vertex_colors: [Color::RED, Color::GREEN, Color::BLUE],
            clear_color: Color::BLACK,
            pixel_format: PixelFormat::default(),
            wireframe: false,
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

impl DemoConfig {
    /// Reject settings the demo cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame buffer size {}x{} is empty",
                self.width, self.height
            )));
        }
        // Textures are uploaded with 16-bit dimensions
        if self.width > u16::MAX as usize || self.height > u16::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "frame buffer size {}x{} exceeds {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if self.window_scale == 0 {
            return Err(ConfigError::Invalid("window_scale must be at least 1".to_string()));
        }
        if !self.radius.is_finite() || !self.rotation_speed.is_finite() {
            return Err(ConfigError::Invalid(
                "radius and rotation_speed must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DemoConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<DemoConfig, ConfigError> {
    let config: DemoConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &DemoConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load the config at `path`, falling back to defaults when it is absent or broken
pub fn load_or_default<P: AsRef<Path>>(path: P) -> DemoConfig {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return DemoConfig::default();
    }

    match load_config(path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {}", path.display(), e);
            DemoConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (320, 240));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = load_config_from_str("(radius: 50.0, wireframe: true)").unwrap();
        assert_eq!(config.radius, 50.0);
        assert!(config.wireframe);
        assert_eq!(config.width, WIDTH);
        assert_eq!(config.vertex_colors[1], Color::GREEN);
    }

    #[test]
    fn test_colors_and_format_parse() {
        let config = load_config_from_str(
            "(clear_color: (r: 0.5, g: 0.0, b: 0.0, a: 1.0), pixel_format: Argb8888)",
        )
        .unwrap();
        assert_eq!(config.clear_color, Color::rgb(0.5, 0.0, 0.0));
        assert_eq!(config.pixel_format, PixelFormat::Argb8888);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            load_config_from_str("(width: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_config_from_str("(window_scale: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_config_from_str("(height: 70000)"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = load_config_from_str("(radius: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("span-raster-config-{}.ron", std::process::id()));
        let config = DemoConfig {
            radius: 42.0,
            wireframe: true,
            pixel_format: PixelFormat::Rgba8888,
            ..DemoConfig::default()
        };

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let path = std::env::temp_dir().join("span-raster-does-not-exist.ron");
        assert_eq!(load_or_default(path), DemoConfig::default());
    }
}
