//! Configuration file support for screen-annotate.
//!
//! Settings are loaded from `~/.config/screen-annotate/config.toml` and cover
//! drawing defaults, arrowhead size, the viewport the surface is fitted into,
//! downloads and the share store.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{ArrowConfig, DrawingConfig, ExportConfig, ShareConfig, ViewportConfig};

use crate::export::file::expand_tilde;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// rect_thickness = 3.0
/// font_size = 20.0
///
/// [arrow]
/// head_length = 20.0
/// head_width = 15.0
///
/// [share]
/// base_url = "https://annotate.example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Defaults for new annotations (color, stroke widths, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead dimensions
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Window size and margins used to fit the surface
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Download directory and notifications
    #[serde(default)]
    pub export: ExportConfig,

    /// Image store location and share link origin
    #[serde(default)]
    pub share: ShareConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `rect_thickness`, `arrow_thickness`: 1.0 - 20.0
    /// - `font_size`: 8.0 - 72.0
    /// - `arrow.head_length`, `arrow.head_width`: 5.0 - 60.0
    /// - `viewport` window sides: 200.0 - 16384.0, margins: 0.0 - 1000.0
    pub fn validate_and_clamp(&mut self) {
        clamp_field("rect_thickness", &mut self.drawing.rect_thickness, 1.0, 20.0);
        clamp_field("arrow_thickness", &mut self.drawing.arrow_thickness, 1.0, 20.0);
        clamp_field("font_size", &mut self.drawing.font_size, 8.0, 72.0);
        clamp_field("arrow head_length", &mut self.arrow.head_length, 5.0, 60.0);
        clamp_field("arrow head_width", &mut self.arrow.head_width, 5.0, 60.0);
        clamp_field("window_width", &mut self.viewport.window_width, 200.0, 16384.0);
        clamp_field("window_height", &mut self.viewport.window_height, 200.0, 16384.0);
        clamp_field("margin_x", &mut self.viewport.margin_x, 0.0, 1000.0);
        clamp_field("margin_y", &mut self.viewport.margin_y, 0.0, 1000.0);

        if !self.drawing.default_color.is_valid() {
            warn!(
                "Invalid default_color {:?}, falling back to '#FF0000'",
                self.drawing.default_color
            );
            self.drawing.default_color = DrawingConfig::default().default_color;
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.drawing.placeholder_text.is_empty() {
            warn!("Empty placeholder_text, falling back to 'Click to edit'");
            self.drawing.placeholder_text = DrawingConfig::default().placeholder_text;
        }

        if url::Url::parse(&self.share.base_url).is_err() {
            warn!(
                "Invalid share base_url '{}', falling back to 'http://localhost:3000'",
                self.share.base_url
            );
            self.share.base_url = ShareConfig::default().base_url;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("screen-annotate");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to `config_path`, creating parent directories.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path
    /// or the file cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Download directory with `~/` expanded.
    pub fn export_directory(&self) -> PathBuf {
        expand_tilde(&self.export.directory)
    }

    /// Image store directory with `~/` expanded.
    pub fn store_directory(&self) -> PathBuf {
        expand_tilde(&self.share.directory)
    }
}

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name, *value, min, max
        );
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Color;

    #[test]
    fn test_defaults_match_editor_defaults() {
        let config = Config::default();
        assert_eq!(
            config.drawing.default_color.to_color(),
            Color::from_rgb8(255, 0, 0)
        );
        assert_eq!(config.drawing.rect_thickness, 3.0);
        assert_eq!(config.drawing.arrow_thickness, 4.0);
        assert_eq!(config.drawing.font_size, 20.0);
        assert_eq!(config.drawing.font_family, "Arial");
        assert_eq!(config.arrow.head_length, 20.0);
        assert_eq!(config.arrow.head_width, 15.0);
        assert_eq!(config.viewport.margin_x, 100.0);
        assert_eq!(config.viewport.margin_y, 200.0);
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r##"
            [drawing]
            default_color = "#00FF00"
            font_size = 32.0

            [share]
            base_url = "https://annotate.example.com"
            "##,
        )
        .unwrap();

        assert_eq!(
            config.drawing.default_color.to_color(),
            Color::from_rgb8(0, 255, 0)
        );
        assert_eq!(config.drawing.font_size, 32.0);
        assert_eq!(config.drawing.rect_thickness, 3.0);
        assert_eq!(config.share.base_url, "https://annotate.example.com");
    }

    #[test]
    fn test_validate_and_clamp() {
        let mut config = Config::default();
        config.drawing.rect_thickness = 50.0;
        config.drawing.font_size = 2.0;
        config.arrow.head_width = -1.0;
        config.drawing.font_weight = "extra-chunky".to_string();
        config.drawing.font_style = "slanted".to_string();
        config.drawing.default_color = ColorSpec::Name("nope".to_string());
        config.share.base_url = "not a url".to_string();

        config.validate_and_clamp();

        assert_eq!(config.drawing.rect_thickness, 20.0);
        assert_eq!(config.drawing.font_size, 8.0);
        assert_eq!(config.arrow.head_width, 5.0);
        assert_eq!(config.drawing.font_weight, "normal");
        assert_eq!(config.drawing.font_style, "normal");
        assert!(config.drawing.default_color.is_valid());
        assert_eq!(config.share.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.drawing.font_size = 28.0;
        config.export.notify = true;
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_example_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::create_default_file(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing, DrawingConfig::default());
        assert!(Config::create_default_file(&path).is_err());
    }

    #[test]
    fn test_schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "arrow", "viewport", "export", "share"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
