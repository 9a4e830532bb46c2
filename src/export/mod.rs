//! PNG export of an annotated surface.

pub mod file;

use thiserror::Error;

/// Errors that can occur while exporting or saving an image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encodes a rasterized surface as PNG bytes.
pub fn encode_png(image: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to_png(&mut bytes)?;
    log::debug!(
        "Encoded {}x{} image as {} PNG bytes",
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(bytes)
}
