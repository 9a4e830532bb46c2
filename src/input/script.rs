//! Annotation scripts: recorded toolbar, pointer and keyboard input replayed
//! against an editor.
//!
//! ```toml
//! [[step]]
//! action = "tool"
//! mode = "rectangle"
//!
//! [[step]]
//! action = "drag"
//! from = [100.0, 100.0]
//! to = [50.0, 50.0]
//! ```

use super::events::{PointerEvent, TextInput, ToolbarCommand};
use super::tool::ToolMode;
use crate::editor::Editor;
use crate::util::Point;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One replayed input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Tool {
        mode: ToolMode,
    },
    Color {
        value: String,
    },
    Down {
        at: [f64; 2],
    },
    Move {
        to: [f64; 2],
    },
    /// Release at `at`, or where the pointer last was
    Up {
        #[serde(default)]
        at: Option<[f64; 2]>,
    },
    /// Down, one move and up
    Drag {
        from: [f64; 2],
        to: [f64; 2],
    },
    /// Down and up without moving
    Click {
        at: [f64; 2],
    },
    Type {
        text: String,
    },
    Backspace,
    FinishText,
    /// Re-enter editing of the selected text
    EditText,
    Undo,
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse annotation script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Replays every step in order.
    pub fn apply(&self, editor: &mut Editor) -> Result<()> {
        let mut pointer = Point::default();
        for (index, step) in self.steps.iter().enumerate() {
            debug!("Script step {}: {:?}", index + 1, step);
            apply_step(editor, step, &mut pointer)
                .with_context(|| format!("Script step {} failed", index + 1))?;
        }
        info!("Replayed {} script step(s)", self.steps.len());
        Ok(())
    }
}

fn apply_step(editor: &mut Editor, step: &Step, pointer: &mut Point) -> Result<()> {
    match step {
        Step::Tool { mode } => editor.handle_toolbar(ToolbarCommand::SetTool(*mode))?,
        Step::Color { value } => {
            if !editor.set_color(value) {
                anyhow::bail!("Unknown color '{value}'");
            }
        }
        Step::Down { at } => {
            *pointer = Point::from((at[0], at[1]));
            editor.handle_pointer(PointerEvent::Down(*pointer));
        }
        Step::Move { to } => {
            *pointer = Point::from((to[0], to[1]));
            editor.handle_pointer(PointerEvent::Move(*pointer));
        }
        Step::Up { at } => {
            if let Some(at) = at {
                *pointer = Point::from((at[0], at[1]));
            }
            editor.handle_pointer(PointerEvent::Up(*pointer));
        }
        Step::Drag { from, to } => {
            let from = Point::from((from[0], from[1]));
            *pointer = Point::from((to[0], to[1]));
            editor.handle_pointer(PointerEvent::Down(from));
            editor.handle_pointer(PointerEvent::Move(*pointer));
            editor.handle_pointer(PointerEvent::Up(*pointer));
        }
        Step::Click { at } => {
            *pointer = Point::from((at[0], at[1]));
            editor.handle_pointer(PointerEvent::Down(*pointer));
            editor.handle_pointer(PointerEvent::Up(*pointer));
        }
        Step::Type { text } => editor.handle_text(TextInput::Insert(text.clone())),
        Step::Backspace => editor.handle_text(TextInput::Backspace),
        Step::FinishText => editor.handle_text(TextInput::Finish),
        Step::EditText => {
            if !editor.edit_selected_text() {
                anyhow::bail!("No selected text annotation to edit");
            }
        }
        Step::Undo => editor.handle_toolbar(ToolbarCommand::Undo)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Shape;
    use crate::editor::{EditorSettings, Surface, Viewport};

    fn blank_editor() -> Editor {
        let image = cairo::ImageSurface::create(cairo::Format::ARgb32, 400, 300).unwrap();
        let surface = Surface::from_image(image, Viewport::new(1000.0, 1000.0));
        Editor::with_surface(surface, EditorSettings::default()).unwrap()
    }

    #[test]
    fn parses_every_action() {
        let script = Script::parse(
            r##"
            [[step]]
            action = "tool"
            mode = "arrow"

            [[step]]
            action = "color"
            value = "#00FF00"

            [[step]]
            action = "down"
            at = [1.0, 2.0]

            [[step]]
            action = "move"
            to = [3.0, 4.0]

            [[step]]
            action = "up"

            [[step]]
            action = "drag"
            from = [0.0, 0.0]
            to = [5.0, 5.0]

            [[step]]
            action = "click"
            at = [9.0, 9.0]

            [[step]]
            action = "type"
            text = "hello"

            [[step]]
            action = "backspace"

            [[step]]
            action = "finish-text"

            [[step]]
            action = "edit-text"

            [[step]]
            action = "undo"
            "##,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 12);
        assert_eq!(script.steps[0], Step::Tool { mode: ToolMode::Arrow });
        assert_eq!(script.steps[4], Step::Up { at: None });
        assert_eq!(script.steps[9], Step::FinishText);
    }

    #[test]
    fn replays_drawing_and_text() {
        let script = Script::parse(
            r##"
            [[step]]
            action = "tool"
            mode = "rectangle"

            [[step]]
            action = "drag"
            from = [100.0, 100.0]
            to = [50.0, 50.0]

            [[step]]
            action = "tool"
            mode = "text"

            [[step]]
            action = "click"
            at = [10.0, 20.0]

            [[step]]
            action = "type"
            text = "Bug here"

            [[step]]
            action = "finish-text"
            "##,
        )
        .unwrap();

        let mut editor = blank_editor();
        script.apply(&mut editor).unwrap();

        let shapes: Vec<&Shape> = editor.surface().frame.shapes.iter().map(|a| &a.shape).collect();
        assert_eq!(shapes.len(), 2);
        assert!(matches!(shapes[0], Shape::Rect { w, h, .. } if *w == 50.0 && *h == 50.0));
        assert!(matches!(shapes[1], Shape::Text { text, .. } if text == "Bug here"));
        // load, rectangle, text placed, text edited
        assert_eq!(editor.history().len(), 4);
    }

    #[test]
    fn unknown_color_fails_with_step_number() {
        let script = Script::parse(
            r##"
            [[step]]
            action = "color"
            value = "plaid"
            "##,
        )
        .unwrap();

        let err = script.apply(&mut blank_editor()).unwrap_err();
        assert!(format!("{err:#}").contains("Script step 1"));
    }

    #[test]
    fn rejects_unknown_action() {
        assert!(Script::parse("[[step]]\naction = \"spin\"\n").is_err());
    }
}
