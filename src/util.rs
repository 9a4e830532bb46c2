//! Geometry helpers: points, bounds, rectangle normalisation, arrowhead math
//! and viewport fitting.

use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Builds bounds from min/max corners. Degenerate extents are kept as zero.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x: min_x.min(max_x),
            y: min_y.min(max_y),
            width: (max_x - min_x).abs(),
            height: (max_y - min_y).abs(),
        }
    }

    /// Smallest bounds containing every point; `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::from_min_max(min_x, min_y, max_x, max_y))
    }

    /// Expands the bounds evenly in all directions by `amount`.
    pub fn inflate(self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Returns true if the point lies inside or on the edge.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Normalises a drag from `start` to `current` into `(left, top, width, height)`.
///
/// Width and height are always non-negative; the left/top edge moves to the
/// current point when the drag goes left or up.
pub fn normalize_rect(start: Point, current: Point) -> (f64, f64, f64, f64) {
    let dx = current.x - start.x;
    let dy = current.y - start.y;
    let left = if dx < 0.0 { current.x } else { start.x };
    let top = if dy < 0.0 { current.y } else { start.y };
    (left, top, dx.abs(), dy.abs())
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Drag direction in degrees, `atan2(dy, dx)`.
pub fn drag_angle_degrees(start: Point, end: Point) -> f64 {
    (end.y - start.y).atan2(end.x - start.x).to_degrees()
}

/// Rotation of an arrowhead placed at `end`.
///
/// The unrotated head points up (towards negative y), so a quarter turn is
/// added to the drag angle to make the tip follow the drag direction.
pub fn arrow_head_rotation(start: Point, end: Point) -> f64 {
    drag_angle_degrees(start, end) + 90.0
}

/// Corners of a triangular arrowhead centered on `center`.
///
/// Returns `[tip, base_left, base_right]`. `width` is the base width, `length`
/// the tip-to-base distance, `rotation_degrees` is clockwise in screen space.
pub fn arrow_head_vertices(
    center: Point,
    width: f64,
    length: f64,
    rotation_degrees: f64,
) -> [Point; 3] {
    let (sin, cos) = rotation_degrees.to_radians().sin_cos();
    let rotate = |x: f64, y: f64| Point::new(center.x + x * cos - y * sin, center.y + x * sin + y * cos);

    let half_w = width / 2.0;
    let half_l = length / 2.0;
    [
        rotate(0.0, -half_l),
        rotate(-half_w, half_l),
        rotate(half_w, half_l),
    ]
}

// ============================================================================
// Viewport fitting
// ============================================================================

/// Scale that fits an image into `max_width` x `max_height` without upscaling.
///
/// `min(max_width / width, max_height / height, 1)`; zero-sized images are
/// treated as one pixel.
pub fn fit_scale(image_width: i32, image_height: i32, max_width: f64, max_height: f64) -> f64 {
    let width = f64::from(image_width.max(1));
    let height = f64::from(image_height.max(1));
    (max_width / width).min(max_height / height).min(1.0)
}

/// Scales an image dimension, rounding to whole pixels (at least one).
pub fn scaled_dimension(value: i32, scale: f64) -> i32 {
    ((f64::from(value) * scale).round() as i32).max(1)
}
