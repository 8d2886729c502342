//! Configuration file support for heliobox.
//!
//! Every tunable of the canvas (size thresholds, handle size, stroke widths,
//! colors) lives here so hosts can adjust them without recompiling. Missing
//! fields fall back to the values in [`crate::constants`].

use heliobox_raster::Color;
use serde::{Deserialize, Serialize};

use crate::constants::{geometry, style};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Canvas configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Minimum width and height of a drawn or resized box
    pub min_box_size: f32,

    /// Corner handle tolerance and drawn handle size
    pub handle_size: f32,

    pub stroke_width: f32,
    pub hover_stroke_width: f32,

    pub grid_color: Color,
    pub grid_line_width: f32,

    /// Color of the in-progress box
    pub preview_color: Color,
    /// Dash pattern `[on, off]` of the in-progress box
    pub preview_dash: [f32; 2],

    pub handle_color: Color,

    /// Stroke color for boxes whose class is missing from the table
    pub unknown_class_color: Color,

    pub label_font_size: f32,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            min_box_size: geometry::MIN_BOX_SIZE,
            handle_size: geometry::HANDLE_SIZE,
            stroke_width: style::STROKE_WIDTH,
            hover_stroke_width: style::HOVER_STROKE_WIDTH,
            grid_color: style::GRID_COLOR,
            grid_line_width: style::GRID_LINE_WIDTH,
            preview_color: style::PREVIEW_COLOR,
            preview_dash: style::PREVIEW_DASH,
            handle_color: style::HANDLE_COLOR,
            unknown_class_color: style::UNKNOWN_CLASS_COLOR,
            label_font_size: style::LABEL_FONT_SIZE,
            log_level: LogLevel::default(),
        }
    }
}

impl CanvasConfig {
    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and widths that would make the canvas unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("min_box_size", self.min_box_size),
            ("handle_size", self.handle_size),
            ("stroke_width", self.stroke_width),
            ("hover_stroke_width", self.hover_stroke_width),
            ("grid_line_width", self.grid_line_width),
            ("label_font_size", self.label_font_size),
            ("preview_dash[0]", self.preview_dash[0]),
            ("preview_dash[1]", self.preview_dash[1]),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "heliobox-config.json"
    }

    /// Get the default config file path for auto-load/save.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("heliobox").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("heliobox")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the given path, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A numeric setting is out of range
    #[error("Invalid value {value} for '{field}': must be a positive number")]
    InvalidValue { field: &'static str, value: String },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = CanvasConfig::default();
        let json = config.to_json().unwrap();
        let parsed = CanvasConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = CanvasConfig::from_json(r#"{"min_box_size": 5.0}"#).unwrap();
        assert_eq!(config.min_box_size, 5.0);
        assert_eq!(config.handle_size, geometry::HANDLE_SIZE);
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_colors_parse_from_hex() {
        let config = CanvasConfig::from_json(r##"{"preview_color": "#112233"}"##).unwrap();
        assert_eq!(config.preview_color, Color::rgb(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = CanvasConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(err, ConfigError::VersionTooNew { file_version: 99, .. }));
    }

    #[test]
    fn test_invalid_value_rejected() {
        let err = CanvasConfig::from_json(r#"{"handle_size": 0.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "handle_size", .. }));
    }

    #[test]
    fn test_log_level_lowercase() {
        let config = CanvasConfig::from_json(r#"{"log_level": "trace"}"#).unwrap();
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Trace);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("heliobox-config-test-{}", std::process::id()));
        let path = dir.join(CanvasConfig::default_filename());
        let config = CanvasConfig {
            min_box_size: 12.0,
            ..CanvasConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(CanvasConfig::load(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
