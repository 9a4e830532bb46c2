//! Image persistence and share links.
//!
//! Uploaded images live in an [`ImageStore`] under `<id>.png`; shared
//! annotations under `shared-<id>.png`, reachable at `<base_url>/share/<id>`.

pub mod id;
pub mod store;
pub mod upload;

pub use id::{generate_id, is_valid_id};
pub use store::{DirectoryStore, ImageStore, StoreError, StoredImage};
pub use upload::{
    HandlerResponse, UploadError, decode_data_url, encode_data_url, handle_lookup, handle_upload,
};

use crate::export::ExportError;
use log::info;
use thiserror::Error;
use url::Url;

/// Errors raised while saving or opening a shared annotation.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Failed to export image: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid share URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid share id '{0}'")]
    InvalidId(String),
}

/// Result of sharing an annotated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    pub id: String,
    pub url: String,
}

/// Store key of a shared annotation.
pub fn shared_key(id: &str) -> String {
    format!("shared-{id}.png")
}

/// Filename offered when downloading a shared annotation.
pub fn shared_download_name(id: &str) -> String {
    format!("shared-annotation-{id}.png")
}

/// Saves exported annotations and resolves share links.
pub struct ShareService {
    store: Box<dyn ImageStore>,
    base_url: Url,
}

impl ShareService {
    pub fn new(store: Box<dyn ImageStore>, base_url: Url) -> Self {
        Self { store, base_url }
    }

    pub fn store(&self) -> &dyn ImageStore {
        self.store.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Public link for share `id`.
    pub fn share_url(&self, id: &str) -> Result<Url, ShareError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/share/{id}"))?)
    }

    /// Stores `png` under a fresh identifier and returns its link.
    pub fn share(&self, png: &[u8]) -> Result<SharedLink, ShareError> {
        let id = generate_id(id::ID_LENGTH);
        self.store.put(&shared_key(&id), png)?;
        let url = self.share_url(&id)?;
        info!("Shared annotation {} at {}", id, url);
        Ok(SharedLink {
            id,
            url: url.into(),
        })
    }

    /// Loads a shared annotation; `None` when the id is unknown.
    pub fn open_shared(&self, id: &str) -> Result<Option<Vec<u8>>, ShareError> {
        if !is_valid_id(id) {
            return Err(ShareError::InvalidId(id.to_string()));
        }
        Ok(self.store.get(&shared_key(id))?)
    }
}
