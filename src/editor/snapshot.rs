//! Serialised surface content stored in the undo history.

use super::EditorError;
use crate::draw::Frame;
use serde::{Deserialize, Serialize};

/// Everything needed to put a surface back into a previous state.
///
/// The background pixels are immutable for the lifetime of a surface, so the
/// snapshot records the image geometry rather than the pixels themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceContent {
    pub version: u32,
    pub width: i32,
    pub height: i32,
    pub scale: f64,
    pub image_width: i32,
    pub image_height: i32,
    pub background_color: String,
    pub frame: Frame,
}

impl SurfaceContent {
    pub const CURRENT_VERSION: u32 = 1;
}

/// A captured, immutable JSON snapshot of [`SurfaceContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn capture(content: &SurfaceContent) -> Result<Self, EditorError> {
        Ok(Self(serde_json::to_string(content)?))
    }

    pub fn content(&self) -> Result<SurfaceContent, EditorError> {
        Ok(serde_json::from_str(&self.0)?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
