//! Pointer down/move/up handling.

use super::core::{DrawingState, Editor};
use super::interaction::DrawingTool;
use crate::draw::{Annotation, Shape};
use crate::util::Point;
use log::{debug, info};

impl Editor {
    pub(super) fn on_pointer_down(&mut self, point: Point) {
        if matches!(self.state, DrawingState::TextEditing { .. }) {
            self.finish_text_edit();
        }

        if self.interaction.selection_enabled {
            self.begin_move(point);
            return;
        }

        match self.interaction.handlers {
            Some(DrawingTool::Text) => self.place_text(point),
            Some(tool) => {
                self.state = DrawingState::Drawing { tool, start: point };
            }
            None => {}
        }
    }

    pub(super) fn on_pointer_move(&mut self, point: Point) {
        match self.state {
            DrawingState::Drawing { tool, start } => {
                let shape = match tool {
                    DrawingTool::Arrow => {
                        Shape::arrow(start, point, self.current_color, self.settings.arrow)
                    }
                    DrawingTool::Rectangle => Shape::rect_from_drag(
                        start,
                        point,
                        self.current_color,
                        self.settings.rect_thickness,
                    ),
                    DrawingTool::Text => return,
                };
                // Replace the previous provisional shape of this drag
                self.surface.frame.pop_in_progress();
                self.surface.frame.push(Annotation::in_progress(shape));
            }
            DrawingState::Moving {
                index,
                ref mut last,
                ref mut moved,
            } => {
                let (dx, dy) = (point.x - last.x, point.y - last.y);
                if dx == 0.0 && dy == 0.0 {
                    return;
                }
                if let Some(annotation) = self.surface.frame.get_mut(index) {
                    annotation.shape.translate(dx, dy);
                    *last = point;
                    *moved = true;
                }
            }
            _ => {}
        }
    }

    pub(super) fn on_pointer_up(&mut self, _point: Point) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing { tool, .. } => {
                if self.surface.frame.finalize_in_progress() {
                    if let Some(annotation) = self.surface.frame.shapes.last() {
                        info!("Added {} annotation", annotation.shape.kind());
                    }
                    self.commit();
                } else {
                    debug!("Zero-length {tool:?} drag ignored");
                }
            }
            DrawingState::Moving { index, moved, .. } => {
                if moved {
                    debug!("Moved annotation {index}");
                    self.commit();
                }
            }
            other => self.state = other,
        }
    }

    /// Select-mode press: pick the topmost shape under the pointer.
    fn begin_move(&mut self, point: Point) {
        self.selection = self.surface.frame.hit_test(point);
        match self.selection {
            Some(index) => {
                debug!("Selected annotation {index}");
                self.state = DrawingState::Moving {
                    index,
                    last: point,
                    moved: false,
                };
            }
            None => self.state = DrawingState::Idle,
        }
    }

    /// Text tool press: insert placeholder text, select it and start editing.
    fn place_text(&mut self, point: Point) {
        let text = self.settings.placeholder_text.clone();
        let shape = Shape::Text {
            x: point.x,
            y: point.y,
            text: text.clone(),
            color: self.current_color,
            size: self.settings.font_size,
            font_descriptor: self.settings.font_descriptor.clone(),
        };
        let index = self.surface.frame.push(Annotation::committed(shape));
        self.selection = Some(index);
        self.state = DrawingState::TextEditing {
            index,
            original: text,
            placeholder: true,
        };
        info!("Added text annotation at ({:.0}, {:.0})", point.x, point.y);
        self.commit();
    }
}
