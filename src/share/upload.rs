//! Upload and lookup request handlers with JSON responses.

use super::id::{ID_LENGTH, generate_id, is_valid_id};
use super::store::{ImageStore, StoreError, StoredImage};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{error, info};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Errors raised while handling an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No image provided")]
    MissingImage,

    #[error("Malformed upload request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Status code and JSON body produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::new(status, json!({ "error": message }))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
struct UploadRequest {
    #[serde(default)]
    image: Option<String>,
}

/// Wraps PNG bytes in a `data:image/png;base64,` URL.
pub fn encode_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Decodes a data URL (or bare base64) into raw bytes.
///
/// A leading `data:image/<kind>;base64,` prefix is stripped when present.
pub fn decode_data_url(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(strip_data_url_prefix(value.trim()))
}

fn strip_data_url_prefix(value: &str) -> &str {
    let Some(rest) = value.strip_prefix("data:image/") else {
        return value;
    };
    let Some((kind, payload)) = rest.split_once(";base64,") else {
        return value;
    };
    let is_word = !kind.is_empty() && kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_word { payload } else { value }
}

/// Stores the image from a `{"image": "<data url>"}` request body as `<id>.png`.
pub fn upload(store: &dyn ImageStore, body: &str) -> Result<(String, StoredImage), UploadError> {
    let request: UploadRequest = serde_json::from_str(body)?;
    let image = request
        .image
        .filter(|image| !image.is_empty())
        .ok_or(UploadError::MissingImage)?;

    let bytes = decode_data_url(&image)?;
    let id = generate_id(ID_LENGTH);
    let stored = store.put(&format!("{id}.png"), &bytes)?;
    info!("Uploaded image {} ({} bytes)", id, bytes.len());
    Ok((id, stored))
}

/// Upload handler: `200 {id, url}`, `400` without an image, `500` otherwise.
pub fn handle_upload(store: &dyn ImageStore, body: &str) -> HandlerResponse {
    match upload(store, body) {
        Ok((id, stored)) => HandlerResponse::new(200, json!({ "id": id, "url": stored.url })),
        Err(UploadError::MissingImage) => HandlerResponse::error(400, "No image provided"),
        Err(err) => {
            error!("Error uploading image: {err}");
            HandlerResponse::error(500, "Failed to upload image")
        }
    }
}

/// Image lookup handler: `200 {url}`, `404` when unknown, `500` on store errors.
pub fn handle_lookup(store: &dyn ImageStore, id: &str) -> HandlerResponse {
    if !is_valid_id(id) {
        return HandlerResponse::error(404, "Image not found");
    }

    match store.find_by_prefix(&format!("{id}.png")) {
        Ok(Some(found)) => HandlerResponse::new(200, json!({ "url": found.url })),
        Ok(None) => HandlerResponse::error(404, "Image not found"),
        Err(err) => {
            error!("Error fetching image: {err}");
            HandlerResponse::error(500, "Failed to fetch image")
        }
    }
}
