//! Editor state: tool mode machine, drawing state and history.

use super::EditorError;
use super::history::History;
use super::interaction::{DrawingTool, Interaction};
use super::snapshot::Snapshot;
use super::surface::{Surface, Viewport};
use crate::config::Config;
use crate::draw::{ArrowStyle, Color, FontDescriptor, color::RED, parse_color};
use crate::export::{self, ExportError};
use crate::input::{PointerEvent, TextInput, ToolMode, ToolbarCommand};
use crate::share::{ShareError, ShareService, SharedLink};
use crate::util::Point;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

/// Drawing parameters applied to newly created shapes.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub viewport: Viewport,
    pub default_color: Color,
    pub rect_thickness: f64,
    pub arrow: ArrowStyle,
    pub font_size: f64,
    pub font_descriptor: FontDescriptor,
    /// Content of a freshly placed text annotation
    pub placeholder_text: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            viewport: Viewport::from_window(1920.0, 1080.0, 100.0, 200.0),
            default_color: RED,
            rect_thickness: 3.0,
            arrow: ArrowStyle::default(),
            font_size: 20.0,
            font_descriptor: FontDescriptor::default(),
            placeholder_text: "Click to edit".to_string(),
        }
    }
}

impl EditorSettings {
    /// Builds settings from a loaded (already validated) configuration.
    pub fn from_config(config: &Config) -> Self {
        let drawing = &config.drawing;
        Self {
            viewport: Viewport::from_window(
                config.viewport.window_width,
                config.viewport.window_height,
                config.viewport.margin_x,
                config.viewport.margin_y,
            ),
            default_color: drawing.default_color.to_color(),
            rect_thickness: drawing.rect_thickness,
            arrow: ArrowStyle {
                thick: drawing.arrow_thickness,
                head_width: config.arrow.head_width,
                head_length: config.arrow.head_length,
            },
            font_size: drawing.font_size,
            font_descriptor: FontDescriptor::new(
                drawing.font_family.clone(),
                drawing.font_weight.clone(),
                drawing.font_style.clone(),
            ),
            placeholder_text: drawing.placeholder_text.clone(),
        }
    }
}

/// Pointer-driven state machine.
///
/// Tracks whether a drag is building a shape, a selected shape is being
/// moved, or a text annotation is in inline-edit mode.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No pointer interaction in progress
    Idle,
    /// Pointer held down with a drag tool; the shape is rebuilt on every move
    Drawing {
        tool: DrawingTool,
        /// Where the pointer was pressed
        start: Point,
    },
    /// Pointer held down on a selected shape in select mode
    Moving {
        index: usize,
        /// Last pointer position applied to the shape
        last: Point,
        moved: bool,
    },
    /// Inline editing of a text annotation
    TextEditing {
        index: usize,
        /// Content when editing started, to detect whether anything changed
        original: String,
        /// Content is still the placeholder; the first keystroke replaces it
        placeholder: bool,
    },
}

/// Toolbar-facing view of the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarState {
    pub tool: ToolMode,
    pub color: String,
    pub can_undo: bool,
}

/// Annotation editor bound to one background image.
///
/// Owns the surface, the tool-mode state machine and the undo history. All
/// mutation happens synchronously through the event handlers.
pub struct Editor {
    pub(super) surface: Surface,
    pub(super) settings: EditorSettings,
    pub(super) tool: ToolMode,
    pub(super) interaction: Interaction,
    pub(super) state: DrawingState,
    pub(super) current_color: Color,
    /// Index of the selected annotation, if any
    pub(super) selection: Option<usize>,
    pub(super) history: History<Snapshot>,
}

impl Editor {
    /// Decodes `png` into a new surface and captures the initial snapshot.
    ///
    /// # Errors
    /// Returns [`EditorError::ImageLoad`] when the bytes are not a decodable
    /// PNG. No editor exists in that case; the caller should navigate away.
    pub fn load(png: &[u8], settings: EditorSettings) -> Result<Self, EditorError> {
        let surface = Surface::from_png(png, settings.viewport)?;
        Self::with_surface(surface, settings)
    }

    /// Wraps an existing surface. History starts as `[snapshot0]`, cursor 0.
    pub fn with_surface(surface: Surface, settings: EditorSettings) -> Result<Self, EditorError> {
        let mut history = History::new();
        history.commit(surface.snapshot()?);

        let mut editor = Self {
            surface,
            current_color: settings.default_color,
            settings,
            tool: ToolMode::Select,
            interaction: Interaction::detached(),
            state: DrawingState::Idle,
            selection: None,
            history,
        };
        editor.set_tool(ToolMode::Select);
        Ok(editor)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn color(&self) -> Color {
        self.current_color
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        ToolbarState {
            tool: self.tool,
            color: self.current_color.to_hex(),
            can_undo: self.can_undo(),
        }
    }

    /// Switches tool mode.
    ///
    /// Exit actions detach every handler and settle pending pointer state: an
    /// interrupted drag's in-progress shape is discarded, a text edit is
    /// finished and a shape move is finalized. Entry actions then enable
    /// selection (select mode) or attach the drawing handlers.
    pub fn set_tool(&mut self, mode: ToolMode) {
        self.interaction = Interaction::detached();

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => {}
            DrawingState::Drawing { .. } => {
                let discarded = self.surface.frame.discard_in_progress();
                if discarded > 0 {
                    debug!("Discarded {discarded} in-progress shape(s) on tool change");
                }
            }
            DrawingState::Moving { moved, .. } => {
                if moved {
                    self.commit();
                }
            }
            editing @ DrawingState::TextEditing { .. } => {
                self.state = editing;
                self.finish_text_edit();
            }
        }

        self.interaction = Interaction::for_mode(mode);
        if mode.is_drawing() {
            self.selection = None;
        }

        if self.tool != mode {
            info!("Tool changed from {} to {}", self.tool, mode);
        }
        self.tool = mode;
    }

    /// Sets the drawing color from a preset name or `#RRGGBB` string.
    ///
    /// Returns `false` (keeping the current color) if the value is not a color.
    pub fn set_color(&mut self, value: &str) -> bool {
        match parse_color(value) {
            Some(color) => {
                self.current_color = color;
                debug!("Drawing color set to {}", color.to_hex());
                true
            }
            None => {
                warn!("Ignoring unknown color '{value}'");
                false
            }
        }
    }

    /// Steps back one history entry and restores the surface from it.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. Selection, text
    /// editing and any drag in progress are dropped.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let Some(snapshot) = self.history.undo() else {
            debug!("Undo ignored: already at the oldest history entry");
            return Ok(false);
        };

        self.surface.restore(snapshot)?;
        self.state = DrawingState::Idle;
        self.selection = None;
        info!(
            "Undo to history entry {} of {}",
            self.history.cursor(),
            self.history.len()
        );
        Ok(true)
    }

    /// Records the current surface as a new history entry.
    pub(super) fn commit(&mut self) {
        match self.surface.snapshot() {
            Ok(snapshot) => {
                debug!(
                    "History commit: {} shape(s), {} bytes",
                    self.surface.frame.len(),
                    snapshot.len()
                );
                self.history.commit(snapshot);
            }
            Err(err) => error!("Failed to capture history snapshot: {err}"),
        }
    }

    /// Dispatches a pointer event to the active handlers.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(point) => self.on_pointer_down(point),
            PointerEvent::Move(point) => self.on_pointer_move(point),
            PointerEvent::Up(point) => self.on_pointer_up(point),
        }
    }

    /// Applies a toolbar command.
    pub fn handle_toolbar(&mut self, command: ToolbarCommand) -> Result<(), EditorError> {
        match command {
            ToolbarCommand::SetTool(mode) => self.set_tool(mode),
            ToolbarCommand::SetColor(value) => {
                self.set_color(&value);
            }
            ToolbarCommand::Undo => {
                self.undo()?;
            }
        }
        Ok(())
    }

    /// Applies keyboard input to the text being edited, if any.
    pub fn handle_text(&mut self, input: TextInput) {
        match input {
            TextInput::Insert(text) => self.insert_text(&text),
            TextInput::Backspace => self.backspace(),
            TextInput::Finish => self.finish_text_edit(),
        }
    }

    /// Rasterizes background and annotations to PNG bytes.
    ///
    /// Selection is never drawn, and the output is identical for identical
    /// surface content.
    pub fn to_image(&self) -> Result<Vec<u8>, ExportError> {
        let image = self.surface.rasterize()?;
        export::encode_png(&image)
    }

    /// Writes the exported image to `directory` as `annotated-<millis>.png`.
    pub fn download(&self, directory: &Path) -> Result<PathBuf, ExportError> {
        let png = self.to_image()?;
        export::file::save_download(&png, directory)
    }

    /// Exports the image and hands it to the share store.
    pub fn save(&self, service: &ShareService) -> Result<SharedLink, ShareError> {
        let png = self.to_image()?;
        service.share(&png)
    }
}
