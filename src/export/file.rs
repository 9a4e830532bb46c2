//! Saving exported images to disk.

use super::ExportError;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate the download filename: `annotated-<unix millis>.png`.
pub fn download_filename() -> String {
    format!("annotated-{}.png", Utc::now().timestamp_millis())
}

/// Ensure the download directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating download directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write `png` into `directory` under a fresh download filename.
pub fn save_download(png: &[u8], directory: &Path) -> Result<PathBuf, ExportError> {
    save_as(png, directory, &download_filename())
}

/// Write `png` into `directory` as `filename` (user read/write only).
pub fn save_as(png: &[u8], directory: &Path, filename: &str) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(filename);

    log::info!(
        "Saving image to: {} ({} bytes)",
        file_path.display(),
        png.len()
    );

    fs::write(&file_path, png)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
