//! RGBA color type, toolbar presets and color parsing.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use screen_annotate::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(red.to_hex(), "#FF0000");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Parses a `#RRGGBB` hex string (the leading `#` is optional).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the color as an uppercase `#RRGGBB` string (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Applies this color as the Cairo source.
    pub(crate) fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

/// Parses a color value as given by the toolbar: a preset name or a hex string.
pub fn parse_color(value: &str) -> Option<Color> {
    name_to_color(value).or_else(|| Color::from_hex(value))
}

/// Maps toolbar preset names to colors (case-insensitive).
pub fn name_to_color(name: &str) -> Option<Color> {
    let color = match name.trim().to_lowercase().as_str() {
        "red" => RED,
        "green" => GREEN,
        "blue" => BLUE,
        "yellow" => YELLOW,
        "magenta" | "pink" => MAGENTA,
        "cyan" => CYAN,
        "orange" => ORANGE,
        "purple" => PURPLE,
        "black" => BLACK,
        "white" => WHITE,
        _ => return None,
    };
    Some(color)
}

// ============================================================================
// Toolbar preset palette
// ============================================================================

/// `#FF0000`, also the default drawing color
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// `#00FF00`
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

/// `#0000FF`
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// `#FFFF00`
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// `#FF00FF`
pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0, 1.0);

/// `#00FFFF`
pub const CYAN: Color = Color::new(0.0, 1.0, 1.0, 1.0);

/// `#FFA500`
pub const ORANGE: Color = Color::new(1.0, 165.0 / 255.0, 0.0, 1.0);

/// `#800080`
pub const PURPLE: Color = Color::new(128.0 / 255.0, 0.0, 128.0 / 255.0, 1.0);

/// `#000000`
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// `#FFFFFF`
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Fill behind the background image (`#f3f4f6`).
pub const SURFACE_BACKGROUND: Color = Color::new(243.0 / 255.0, 244.0 / 255.0, 246.0 / 255.0, 1.0);

/// Toolbar presets in display order.
pub const PRESETS: [Color; 10] = [
    RED, GREEN, BLUE, YELLOW, MAGENTA, CYAN, ORANGE, PURPLE, BLACK, WHITE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_toolbar_values() {
        assert_eq!(Color::from_hex("#FF0000"), Some(RED));
        assert_eq!(Color::from_hex("ffa500"), Some(ORANGE));
        assert_eq!(Color::from_hex("#800080"), Some(PURPLE));
        assert!(Color::from_hex("#FFF").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn presets_format_back_to_hex() {
        let hex: Vec<String> = PRESETS.iter().map(Color::to_hex).collect();
        assert_eq!(
            hex,
            [
                "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500",
                "#800080", "#000000", "#FFFFFF"
            ]
        );
    }

    #[test]
    fn parse_color_prefers_names_then_hex() {
        assert_eq!(parse_color("Cyan"), Some(CYAN));
        assert_eq!(parse_color("#0000ff"), Some(BLUE));
        assert!(parse_color("chartreuse").is_none());
    }
}
