//! Surface interaction mode derived from the active tool.

use crate::input::ToolMode;

/// Pointer cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
}

/// Tools that own pointer-down/move/up drawing handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingTool {
    Arrow,
    Rectangle,
    Text,
}

impl DrawingTool {
    /// `None` for [`ToolMode::Select`], which draws nothing.
    pub fn for_mode(mode: ToolMode) -> Option<Self> {
        match mode {
            ToolMode::Select => None,
            ToolMode::Arrow => Some(DrawingTool::Arrow),
            ToolMode::Rectangle => Some(DrawingTool::Rectangle),
            ToolMode::Text => Some(DrawingTool::Text),
        }
    }

    /// Drag tools build their shape from pointer-move events; text is click-placed.
    pub fn is_drag(self) -> bool {
        !matches!(self, DrawingTool::Text)
    }
}

/// How the surface reacts to pointer input in the current tool mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    /// Whether clicking a shape selects it (and dragging moves it)
    pub selection_enabled: bool,
    pub cursor: Cursor,
    /// Drawing handlers currently attached, if any
    pub handlers: Option<DrawingTool>,
}

impl Interaction {
    /// Interaction with every handler detached and selection off.
    pub fn detached() -> Self {
        Self {
            selection_enabled: false,
            cursor: Cursor::Default,
            handlers: None,
        }
    }

    /// Entry action for `mode`: select mode enables selection with the default
    /// cursor, drawing modes disable it and attach their handlers.
    pub fn for_mode(mode: ToolMode) -> Self {
        match DrawingTool::for_mode(mode) {
            None => Self {
                selection_enabled: true,
                cursor: Cursor::Default,
                handlers: None,
            },
            Some(tool) => Self {
                selection_enabled: false,
                cursor: Cursor::Crosshair,
                handlers: Some(tool),
            },
        }
    }
}
