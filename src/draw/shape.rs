//! Shape definitions for screenshot annotations.

use super::color::Color;
use super::font::FontDescriptor;
use crate::util::{self, Bounds, Point};
use serde::{Deserialize, Serialize};

/// Triangular arrowhead, stored already positioned and rotated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowHead {
    /// Center of the triangle (the arrow's end point)
    pub center: Point,
    /// Base width in pixels
    pub width: f64,
    /// Tip-to-base length in pixels
    pub length: f64,
    /// Clockwise rotation in degrees; 0 points the tip up
    pub rotation: f64,
}

impl ArrowHead {
    /// Returns `[tip, base_left, base_right]`.
    pub fn vertices(&self) -> [Point; 3] {
        util::arrow_head_vertices(self.center, self.width, self.length, self.rotation)
    }
}

/// Stroke and head dimensions used when constructing arrows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowStyle {
    pub thick: f64,
    pub head_width: f64,
    pub head_length: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            thick: 4.0,
            head_width: 15.0,
            head_length: 20.0,
        }
    }
}

/// A drawable annotation.
///
/// Each variant carries its own color and size information so a shape renders
/// the same regardless of the editor's current settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Shape {
    /// Line plus triangular head, selected and moved as one unit.
    Arrow {
        /// Drag start (arrow tail)
        start: Point,
        /// Drag end (arrowhead center)
        end: Point,
        head: ArrowHead,
        /// Line and head color
        color: Color,
        /// Line thickness in pixels
        thick: f64,
    },
    /// Rectangle outline with a transparent fill.
    Rect {
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
        /// Width, never negative
        w: f64,
        /// Height, never negative
        h: f64,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        thick: f64,
    },
    /// Editable text anchored at its top-left corner.
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        /// Font size in points
        size: f64,
        font_descriptor: FontDescriptor,
    },
}

impl Shape {
    /// Builds an arrow from `start` to `end` with the head rotated along the drag.
    pub fn arrow(start: Point, end: Point, color: Color, style: ArrowStyle) -> Self {
        Shape::Arrow {
            start,
            end,
            head: ArrowHead {
                center: end,
                width: style.head_width,
                length: style.head_length,
                rotation: util::arrow_head_rotation(start, end),
            },
            color,
            thick: style.thick,
        }
    }

    /// Builds a rectangle spanning the drag from `start` to `current`.
    pub fn rect_from_drag(start: Point, current: Point, color: Color, thick: f64) -> Self {
        let (x, y, w, h) = util::normalize_rect(start, current);
        Shape::Rect {
            x,
            y,
            w,
            h,
            color,
            thick,
        }
    }

    /// Short lowercase name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Arrow { .. } => "arrow",
            Shape::Rect { .. } => "rectangle",
            Shape::Text { .. } => "text",
        }
    }

    /// Moves the whole shape by `(dx, dy)`. Arrow line and head move together.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Arrow {
                start, end, head, ..
            } => {
                *start = start.offset(dx, dy);
                *end = end.offset(dx, dy);
                head.center = head.center.offset(dx, dy);
            }
            Shape::Rect { x, y, .. } | Shape::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }

    /// Returns the axis-aligned bounds used for selection hit testing,
    /// expanded to cover the stroke.
    ///
    /// Returns `None` when the bounds cannot be measured (empty text or no
    /// usable font backend).
    pub fn bounding_box(&self) -> Option<Bounds> {
        match self {
            Shape::Arrow {
                start, head, thick, ..
            } => {
                let [tip, left, right] = head.vertices();
                Bounds::enclosing(&[*start, head.center, tip, left, right])
                    .map(|bounds| bounds.inflate(stroke_padding(*thick)))
            }
            Shape::Rect {
                x, y, w, h, thick, ..
            } => Some(Bounds::from_min_max(*x, *y, x + w, y + h).inflate(stroke_padding(*thick))),
            Shape::Text {
                x,
                y,
                text,
                size,
                font_descriptor,
                ..
            } => bounding_box_for_text(*x, *y, text, *size, font_descriptor),
        }
    }
}

fn stroke_padding(thick: f64) -> f64 {
    (thick / 2.0).max(1.0)
}

fn bounding_box_for_text(
    x: f64,
    y: f64,
    text: &str,
    size: f64,
    font_descriptor: &FontDescriptor,
) -> Option<Bounds> {
    if text.is_empty() {
        return None;
    }

    // A tiny image surface is enough for layout measurement.
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1).ok()?;
    let ctx = cairo::Context::new(&surface).ok()?;
    let layout = font_descriptor.layout(&ctx, text, size);
    let (width, height) = layout.pixel_size();

    Some(Bounds::from_min_max(
        x,
        y,
        x + f64::from(width.max(1)),
        y + f64::from(height.max(1)),
    ))
}

/// A shape on the surface plus its transient drawing flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(flatten)]
    pub shape: Shape,
    /// Set while the shape is still being defined by an active drag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub in_progress: bool,
}

impl Annotation {
    pub fn committed(shape: Shape) -> Self {
        Self {
            shape,
            in_progress: false,
        }
    }

    pub fn in_progress(shape: Shape) -> Self {
        Self {
            shape,
            in_progress: true,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
