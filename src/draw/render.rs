//! Cairo-based rendering functions for the background and shapes.

use super::color::Color;
use super::font::FontDescriptor;
use super::shape::{Annotation, ArrowHead, Shape};
use crate::util::Point;

/// Paints the surface fill, then the background image scaled by `scale`.
///
/// The fill only shows through transparent regions of the image.
pub fn render_background(
    ctx: &cairo::Context,
    image: &cairo::ImageSurface,
    scale: f64,
    fill: Color,
) -> Result<(), cairo::Error> {
    fill.apply(ctx);
    ctx.paint()?;

    ctx.save()?;
    ctx.scale(scale, scale);
    ctx.set_source_surface(image, 0.0, 0.0)?;
    ctx.source().set_filter(cairo::Filter::Good);
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}

/// Renders annotations in order (first = bottom layer).
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Annotation]) {
    for annotation in shapes {
        render_shape(ctx, &annotation.shape);
    }
}

/// Renders a single shape, dispatching on its variant.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Arrow {
            start,
            end,
            head,
            color,
            thick,
        } => render_arrow(ctx, *start, *end, head, *color, *thick),
        Shape::Rect {
            x,
            y,
            w,
            h,
            color,
            thick,
        } => render_rect(ctx, *x, *y, *w, *h, *color, *thick),
        Shape::Text {
            x,
            y,
            text,
            color,
            size,
            font_descriptor,
        } => render_text(ctx, *x, *y, text, *color, *size, font_descriptor),
    }
}

/// Render an arrow: the line first, then the filled head on top.
fn render_arrow(
    ctx: &cairo::Context,
    start: Point,
    end: Point,
    head: &ArrowHead,
    color: Color,
    thick: f64,
) {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Butt);
    ctx.move_to(start.x, start.y);
    ctx.line_to(end.x, end.y);
    let _ = ctx.stroke();

    let [tip, left, right] = head.vertices();
    ctx.move_to(tip.x, tip.y);
    ctx.line_to(left.x, left.y);
    ctx.line_to(right.x, right.y);
    ctx.close_path();
    let _ = ctx.fill();
}

/// Render a rectangle outline (transparent fill)
fn render_rect(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, color: Color, thick: f64) {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.rectangle(x, y, w, h);
    let _ = ctx.stroke();
}

/// Renders text with its top-left corner at `(x, y)` using Pango.
///
/// Newlines in `text` start new lines with spacing from the font metrics.
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font_descriptor: &FontDescriptor,
) {
    if text.is_empty() {
        return;
    }

    // Keep antialias/source changes local to this shape
    if ctx.save().is_err() {
        return;
    }
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = font_descriptor.layout(ctx, text, size);
    color.apply(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}
