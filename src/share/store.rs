//! Key/value image storage backed by a directory.

use fs2::FileExt;
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

const LOCK_FILE: &str = ".store.lock";

/// Errors raised by an [`ImageStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store key '{0}'")]
    InvalidKey(String),

    #[error("Failed to lock image store {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot build a URL for {0}")]
    Url(PathBuf),
}

/// A stored object and the URL it can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}

/// Persistence collaborator for uploaded and shared images.
pub trait ImageStore {
    /// Stores `bytes` under `key`, replacing any previous value.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredImage, StoreError>;

    /// Returns the bytes stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Returns the first stored object (in lexical key order) whose key starts
    /// with `prefix`.
    fn find_by_prefix(&self, prefix: &str) -> Result<Option<StoredImage>, StoreError>;
}

/// [`ImageStore`] keeping one file per key in a base directory.
///
/// Writes hold an exclusive lock on a store-wide lock file and land through a
/// temporary file plus rename, so readers never see a partial image.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens (creating if needed) the store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        debug!("Image store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    fn url_for(&self, path: &Path) -> Result<String, StoreError> {
        Url::from_file_path(path)
            .map(String::from)
            .map_err(|()| StoreError::Url(path.to_path_buf()))
    }

    fn lock(&self, exclusive: bool) -> Result<File, StoreError> {
        let lock_path = self.root.join(LOCK_FILE);
        let lock_error = |source| StoreError::Lock {
            path: lock_path.clone(),
            source,
        };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_error)?;
        if exclusive {
            file.lock_exclusive().map_err(lock_error)?;
        } else {
            file.lock_shared().map_err(lock_error)?;
        }
        Ok(file)
    }

    fn unlock(&self, file: File) {
        if let Err(err) = FileExt::unlock(&file) {
            warn!("Failed to unlock image store {}: {}", self.root.display(), err);
        }
    }

    fn write_atomic(&self, target: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp_path = temp_path(target);
        {
            let mut tmp_file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp_path)?;
            tmp_file.write_all(bytes)?;
            tmp_file.sync_all()?;
        }
        if let Err(err) = fs::rename(&tmp_path, target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

impl ImageStore for DirectoryStore {
    fn put(&self, key: &str, bytes: &[u8]) -> Result<StoredImage, StoreError> {
        let path = self.path_for(key)?;
        let lock = self.lock(true)?;
        let result = self.write_atomic(&path, bytes);
        self.unlock(lock);
        result?;

        debug!("Stored {} ({} bytes)", key, bytes.len());
        Ok(StoredImage {
            key: key.to_string(),
            url: self.url_for(&path)?,
        })
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        let lock = self.lock(false)?;
        let result = match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        };
        self.unlock(lock);
        result
    }

    fn find_by_prefix(&self, prefix: &str) -> Result<Option<StoredImage>, StoreError> {
        validate_key(prefix)?;
        let lock = self.lock(false)?;
        let result = self.first_matching(prefix);
        self.unlock(lock);

        match result? {
            Some(key) => {
                let url = self.url_for(&self.root.join(&key))?;
                Ok(Some(StoredImage { key, url }))
            }
            None => Ok(None),
        }
    }
}

impl DirectoryStore {
    fn first_matching(&self, prefix: &str) -> Result<Option<String>, StoreError> {
        let mut matches = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if name.starts_with(prefix) && !name.starts_with('.') && !name.contains(".tmp") {
                matches.push(name);
            }
        }
        matches.sort();
        Ok(matches.into_iter().next())
    }
}

/// Keys are plain file names: no separators, no leading dot.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.contains("..");
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

fn temp_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut counter = 0u32;
    let mut candidate = target.with_file_name(format!(".{file_name}.tmp"));
    while candidate.exists() {
        counter += 1;
        candidate = target.with_file_name(format!(".{file_name}.tmp{counter}"));
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path().join("store")).unwrap();

        let stored = store.put("abc.png", b"first").unwrap();
        assert_eq!(stored.key, "abc.png");
        assert!(stored.url.starts_with("file://"));
        assert!(stored.url.ends_with("/abc.png"));

        store.put("abc.png", b"second").unwrap();
        assert_eq!(store.get("abc.png").unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.get("missing.png").unwrap(), None);
    }

    #[test]
    fn writes_leave_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        store.put("one.png", b"1").unwrap();

        let names: Vec<String> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != LOCK_FILE)
            .collect();
        assert_eq!(names, vec!["one.png".to_string()]);
    }

    #[test]
    fn find_by_prefix_returns_first_lexical_match() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();
        store.put("abc.png-b", b"b").unwrap();
        store.put("abc.png", b"a").unwrap();
        store.put("zzz.png", b"z").unwrap();

        let found = store.find_by_prefix("abc.png").unwrap().unwrap();
        assert_eq!(found.key, "abc.png");
        assert!(store.find_by_prefix("nope.png").unwrap().is_none());
    }

    #[test]
    fn rejects_keys_that_escape_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::open(dir.path()).unwrap();

        for key in ["", "../x.png", "a/b.png", ".hidden"] {
            assert!(matches!(
                store.put(key, b"x"),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
