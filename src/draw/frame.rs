//! Frame container for the ordered annotation list.

use super::shape::{Annotation, Shape};
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// All annotations on a surface, in draw order (first = bottom, last = top).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub shapes: Vec<Annotation>,
}

impl Frame {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Adds an annotation on top of the existing ones and returns its index.
    pub fn push(&mut self, annotation: Annotation) -> usize {
        self.shapes.push(annotation);
        self.shapes.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Annotation> {
        self.shapes.get_mut(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Annotation> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Removes the topmost annotation if it is still in progress.
    pub fn pop_in_progress(&mut self) -> Option<Shape> {
        if self.shapes.last().is_some_and(|a| a.in_progress) {
            self.shapes.pop().map(|a| a.shape)
        } else {
            None
        }
    }

    /// Clears the in-progress flag of the topmost annotation.
    ///
    /// Returns `true` if a shape was finalized.
    pub fn finalize_in_progress(&mut self) -> bool {
        match self.shapes.last_mut() {
            Some(annotation) if annotation.in_progress => {
                annotation.in_progress = false;
                true
            }
            _ => false,
        }
    }

    /// Drops every in-progress annotation, returning how many were removed.
    pub fn discard_in_progress(&mut self) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|a| !a.in_progress);
        before - self.shapes.len()
    }

    /// Index of the topmost committed annotation whose bounds contain `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.shapes.iter().enumerate().rev().find_map(|(index, annotation)| {
            if annotation.in_progress {
                return None;
            }
            annotation
                .shape
                .bounding_box()
                .filter(|bounds| bounds.contains(point))
                .map(|_| index)
        })
    }
}
