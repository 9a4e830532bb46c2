//! Annotation editor: surface, tool modes, pointer handling and undo history.
//!
//! The [`Editor`] owns a [`Surface`] (background image plus annotations) and
//! drives it from three event streams:
//! - pointer events on the surface ([`crate::input::PointerEvent`])
//! - toolbar commands ([`crate::input::ToolbarCommand`])
//! - keyboard input while a text annotation is edited ([`crate::input::TextInput`])
//!
//! Every completed edit is recorded as a whole-surface [`Snapshot`] in a linear
//! [`History`].

mod core;
pub mod history;
pub mod interaction;
mod pointer;
pub mod snapshot;
pub mod surface;
mod text;

#[cfg(test)]
mod tests;

pub use self::core::{DrawingState, Editor, EditorSettings, ToolbarState};
pub use history::History;
pub use interaction::{Cursor, DrawingTool, Interaction};
pub use snapshot::{Snapshot, SurfaceContent};
pub use surface::{Surface, Viewport};

use thiserror::Error;

/// Errors raised while building or restoring an editor surface.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] cairo::IoError),

    #[error("Failed to serialise surface snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Snapshot is for a {found:?} surface, editor surface is {expected:?}")]
    SnapshotMismatch {
        expected: (i32, i32),
        found: (i32, i32),
    },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
}
