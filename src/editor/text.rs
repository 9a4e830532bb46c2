//! Inline editing of text annotations.

use super::core::{DrawingState, Editor};
use crate::draw::Shape;
use log::{debug, info};

impl Editor {
    /// Whether a text annotation is in inline-edit mode.
    pub fn is_editing_text(&self) -> bool {
        matches!(self.state, DrawingState::TextEditing { .. })
    }

    /// Current content of the text being edited.
    pub fn editing_text(&self) -> Option<&str> {
        let DrawingState::TextEditing { index, .. } = self.state else {
            return None;
        };
        match self.surface.frame.get(index).map(|a| &a.shape) {
            Some(Shape::Text { text, .. }) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Re-enters inline editing for the selected text annotation.
    ///
    /// Returns `false` when nothing is selected, the selection is not text, or
    /// a pointer interaction is in progress.
    pub fn edit_selected_text(&mut self) -> bool {
        if !matches!(self.state, DrawingState::Idle) {
            return false;
        }
        let Some(index) = self.selection else {
            return false;
        };
        let Some(Shape::Text { text, .. }) = self.surface.frame.get(index).map(|a| &a.shape) else {
            return false;
        };

        let placeholder = *text == self.settings.placeholder_text;
        self.state = DrawingState::TextEditing {
            index,
            original: text.clone(),
            placeholder,
        };
        debug!("Editing text annotation {index}");
        true
    }

    /// Appends `input` to the edited text. Placeholder content is replaced.
    pub(super) fn insert_text(&mut self, input: &str) {
        let DrawingState::TextEditing {
            index,
            ref mut placeholder,
            ..
        } = self.state
        else {
            debug!("Ignoring text input outside of text editing");
            return;
        };

        if let Some(Shape::Text { text, .. }) =
            self.surface.frame.get_mut(index).map(|a| &mut a.shape)
        {
            if *placeholder {
                text.clear();
                *placeholder = false;
            }
            text.push_str(input);
        }
    }

    /// Removes the last character. Placeholder content is cleared entirely.
    pub(super) fn backspace(&mut self) {
        let DrawingState::TextEditing {
            index,
            ref mut placeholder,
            ..
        } = self.state
        else {
            return;
        };

        if let Some(Shape::Text { text, .. }) =
            self.surface.frame.get_mut(index).map(|a| &mut a.shape)
        {
            if *placeholder {
                text.clear();
                *placeholder = false;
            } else {
                text.pop();
            }
        }
    }

    /// Leaves inline editing.
    ///
    /// Commits when the content changed since editing started. A text left
    /// empty is removed from the surface, which also counts as a change.
    pub(super) fn finish_text_edit(&mut self) {
        let DrawingState::TextEditing {
            index, original, ..
        } = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        let current = match self.surface.frame.get(index).map(|a| &a.shape) {
            Some(Shape::Text { text, .. }) => text.clone(),
            _ => return,
        };

        if current.is_empty() {
            self.surface.frame.remove(index);
            self.selection = None;
            info!("Removed empty text annotation");
            self.commit();
        } else if current != original {
            info!("Text annotation changed to {current:?}");
            self.commit();
        }
    }
}
