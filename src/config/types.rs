//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the appearance of newly created annotations. The toolbar color
/// can still be changed while editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial drawing color - a preset name, `#RRGGBB`, or an RGB array like
    /// `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Rectangle border thickness in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_rect_thickness")]
    pub rect_thickness: f64,

    /// Arrow line thickness in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_arrow_thickness")]
    pub arrow_thickness: f64,

    /// Font size for text annotations in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Font family name for text annotations (e.g., "Arial", "Sans")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Content of a freshly placed text annotation
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            rect_thickness: default_rect_thickness(),
            arrow_thickness: default_arrow_thickness(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            placeholder_text: default_placeholder_text(),
        }
    }
}

/// Arrowhead dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Tip-to-base length in pixels (valid range: 5.0 - 60.0)
    #[serde(default = "default_head_length")]
    pub head_length: f64,

    /// Base width in pixels (valid range: 5.0 - 60.0)
    #[serde(default = "default_head_width")]
    pub head_width: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            head_length: default_head_length(),
            head_width: default_head_width(),
        }
    }
}

/// Space available to the drawing surface.
///
/// Images larger than `window - margin` are scaled down to fit; smaller
/// images keep their size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    #[serde(default = "default_window_width")]
    pub window_width: f64,

    #[serde(default = "default_window_height")]
    pub window_height: f64,

    /// Horizontal space reserved for padding
    #[serde(default = "default_margin_x")]
    pub margin_x: f64,

    /// Vertical space reserved for the toolbar and padding
    #[serde(default = "default_margin_y")]
    pub margin_y: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            margin_x: default_margin_x(),
            margin_y: default_margin_y(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for downloaded images (supports `~/`)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Show a desktop notification after downloading or sharing
    #[serde(default)]
    pub notify: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            notify: false,
        }
    }
}

/// Image store and share link settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShareConfig {
    /// Directory holding uploaded and shared images (supports `~/`)
    #[serde(default = "default_store_directory")]
    pub directory: String,

    /// Public origin used to build share links (`<base_url>/share/<id>`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            directory: default_store_directory(),
            base_url: default_base_url(),
        }
    }
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#FF0000".to_string())
}

fn default_rect_thickness() -> f64 {
    3.0
}

fn default_arrow_thickness() -> f64 {
    4.0
}

fn default_font_size() -> f64 {
    20.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_placeholder_text() -> String {
    "Click to edit".to_string()
}

fn default_head_length() -> f64 {
    20.0
}

fn default_head_width() -> f64 {
    15.0
}

fn default_window_width() -> f64 {
    1920.0
}

fn default_window_height() -> f64 {
    1080.0
}

fn default_margin_x() -> f64 {
    100.0
}

fn default_margin_y() -> f64 {
    200.0
}

fn default_export_directory() -> String {
    dirs::picture_dir()
        .map(|dir| dir.join("Screen Annotate").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/Pictures/Screen Annotate".to_string())
}

fn default_store_directory() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("screen-annotate").join("images").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/.local/share/screen-annotate/images".to_string())
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
