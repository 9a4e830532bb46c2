//! Pointer events and toolbar commands delivered to the editor.

use super::tool::ToolMode;
use crate::util::Point;

/// Pointer event on the drawing surface, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed
    Down(Point),
    /// Pointer moved (with or without a button held)
    Move(Point),
    /// Primary button released
    Up(Point),
}

/// Command issued from the toolbar (outside the surface).
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarCommand {
    SetTool(ToolMode),
    /// Preset name or `#RRGGBB` value
    SetColor(String),
    Undo,
}

/// Keyboard input while a text annotation is being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum TextInput {
    /// Insert characters at the end of the text
    Insert(String),
    Backspace,
    /// Leave inline editing
    Finish,
}
