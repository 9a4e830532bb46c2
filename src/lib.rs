//! Screenshot annotation editor.
//!
//! Loads a PNG as a fixed background, lets arrows, rectangles and text be
//! drawn on top through a tool-mode state machine with linear undo, and
//! exports the result as PNG for download or sharing through an image store.

pub mod config;
pub mod draw;
pub mod editor;
pub mod export;
pub mod input;
pub mod notification;
pub mod share;
pub mod util;

pub use config::Config;
pub use editor::{Editor, EditorError, EditorSettings};
