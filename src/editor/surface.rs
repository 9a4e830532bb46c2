//! Drawing surface bound to one background image.

use super::EditorError;
use super::snapshot::{Snapshot, SurfaceContent};
use crate::draw::{Frame, color::SURFACE_BACKGROUND, render_background, render_shapes};
use crate::util;
use log::{debug, info};

/// Space available for the surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub max_width: f64,
    pub max_height: f64,
}

impl Viewport {
    /// Creates a viewport; each side is at least one pixel.
    pub fn new(max_width: f64, max_height: f64) -> Self {
        Self {
            max_width: max_width.max(1.0),
            max_height: max_height.max(1.0),
        }
    }

    /// Viewport left inside a window once the toolbar/padding margins are removed.
    pub fn from_window(width: f64, height: f64, margin_x: f64, margin_y: f64) -> Self {
        Self::new(width - margin_x, height - margin_y)
    }
}

/// The mutable drawing surface: background image, scale and annotations.
///
/// The background never changes after construction; only [`Frame`] content
/// is edited and captured by snapshots.
pub struct Surface {
    background: cairo::ImageSurface,
    width: i32,
    height: i32,
    scale: f64,
    pub frame: Frame,
}

impl Surface {
    /// Decodes PNG bytes and fits the result into `viewport`.
    pub fn from_png(bytes: &[u8], viewport: Viewport) -> Result<Self, EditorError> {
        let mut reader = bytes;
        let image = cairo::ImageSurface::create_from_png(&mut reader)?;
        Ok(Self::from_image(image, viewport))
    }

    /// Binds an already decoded image, scaling it down to fit `viewport`.
    pub fn from_image(image: cairo::ImageSurface, viewport: Viewport) -> Self {
        let (image_width, image_height) = (image.width(), image.height());
        let scale = util::fit_scale(
            image_width,
            image_height,
            viewport.max_width,
            viewport.max_height,
        );
        let width = util::scaled_dimension(image_width, scale);
        let height = util::scaled_dimension(image_height, scale);

        info!(
            "Surface {}x{} for {}x{} image (scale {:.3})",
            width, height, image_width, image_height, scale
        );

        Self {
            background: image,
            width,
            height,
            scale,
            frame: Frame::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Original image size before scaling.
    pub fn image_size(&self) -> (i32, i32) {
        (self.background.width(), self.background.height())
    }

    /// Serialises geometry and every annotation into a history snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, EditorError> {
        let (image_width, image_height) = self.image_size();
        let content = SurfaceContent {
            version: SurfaceContent::CURRENT_VERSION,
            width: self.width,
            height: self.height,
            scale: self.scale,
            image_width,
            image_height,
            background_color: SURFACE_BACKGROUND.to_hex(),
            frame: self.frame.clone(),
        };
        Snapshot::capture(&content)
    }

    /// Replaces all annotations with the content of `snapshot`.
    ///
    /// Fails without touching the surface when the snapshot belongs to a
    /// surface of another size.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), EditorError> {
        let content = snapshot.content()?;
        if content.width != self.width || content.height != self.height {
            return Err(EditorError::SnapshotMismatch {
                expected: (self.width, self.height),
                found: (content.width, content.height),
            });
        }

        debug!(
            "Restoring snapshot with {} shape(s) (previously {})",
            content.frame.len(),
            self.frame.len()
        );
        self.frame = content.frame;
        Ok(())
    }

    /// Paints background and annotations into a new image at surface resolution.
    pub fn rasterize(&self) -> Result<cairo::ImageSurface, cairo::Error> {
        let target = cairo::ImageSurface::create(cairo::Format::ARgb32, self.width, self.height)?;
        {
            let ctx = cairo::Context::new(&target)?;
            render_background(&ctx, &self.background, self.scale, SURFACE_BACKGROUND)?;
            render_shapes(&ctx, &self.frame.shapes);
        }
        target.flush();
        Ok(target)
    }
}
