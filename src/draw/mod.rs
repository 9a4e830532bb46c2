//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used for annotation:
//! - [`Color`]: RGBA color with the toolbar's preset palette
//! - [`Shape`]: arrow, rectangle and text annotations
//! - [`Frame`]: ordered container for all annotations on a surface
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod font;
pub mod frame;
pub mod render;
pub mod shape;

pub use color::{Color, parse_color};
pub use font::FontDescriptor;
pub use frame::Frame;
pub use render::{render_background, render_shape, render_shapes, render_text};
pub use shape::{Annotation, ArrowHead, ArrowStyle, Shape};
