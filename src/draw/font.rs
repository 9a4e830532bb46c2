//! Font descriptor for text annotations.

use serde::{Deserialize, Serialize};

/// Font configuration for text rendering.
///
/// Stored on every text shape so a snapshot restores the exact font the text
/// was created with, even if the configured default changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Arial", "Sans", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size", e.g. "Arial 20" or "Sans Italic Bold 24".
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));
        parts.join(" ")
    }

    /// Builds a Pango layout for `text` on the given context.
    pub(crate) fn layout(&self, ctx: &cairo::Context, text: &str, size: f64) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(ctx);
        let description = pango::FontDescription::from_string(&self.to_pango_string(size));
        layout.set_font_description(Some(&description));
        layout.set_text(text);
        layout
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
