//! Tool mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tool selected on the toolbar.
///
/// The active mode determines whether shapes can be selected and which pointer
/// handlers the editor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Select and move existing shapes (the default)
    #[default]
    Select,
    /// Drag to draw an arrow from the press point to the release point
    Arrow,
    /// Drag to draw a rectangle outline
    Rectangle,
    /// Click to place an editable text
    Text,
}

impl ToolMode {
    /// All modes in toolbar order.
    pub const ALL: [ToolMode; 4] = [
        ToolMode::Select,
        ToolMode::Arrow,
        ToolMode::Rectangle,
        ToolMode::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolMode::Select => "select",
            ToolMode::Arrow => "arrow",
            ToolMode::Rectangle => "rectangle",
            ToolMode::Text => "text",
        }
    }

    /// Whether this mode creates shapes (and therefore owns pointer handlers).
    pub fn is_drawing(self) -> bool {
        !matches!(self, ToolMode::Select)
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "select" => Ok(ToolMode::Select),
            "arrow" => Ok(ToolMode::Arrow),
            "rectangle" | "rect" => Ok(ToolMode::Rectangle),
            "text" => Ok(ToolMode::Text),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}
