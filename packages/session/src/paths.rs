#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for persisted session data.

use std::path::{Path, PathBuf};

/// Environment variable that overrides [`data_dir`].
pub const DATA_DIR_ENV: &str = "METRO_PD_DATA_DIR";

/// Returns the data directory: `$METRO_PD_DATA_DIR` if set and non-empty,
/// otherwise `data/` under the current directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map_or_else(|| PathBuf::from("data"), PathBuf::from)
}

/// Returns the path of the JSON key-value store inside `dir`.
#[must_use]
pub fn store_path(dir: &Path) -> PathBuf {
    dir.join("store.json")
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
