//! Display titles from downloader sidecar metadata.
//!
//! The sidecar is parsed into a typed [`SidecarInfo`]; only `title` is used.
//! Missing, unreadable, or malformed sidecars are not errors for the run: the
//! item identifier becomes the title instead.

mod sanitize;

pub use sanitize::{
    MAX_TITLE_CHARS, UNTITLED, fallback_title, sanitize_title, title_from_file_name, title_or_id,
};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reading a sidecar file.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The sidecar could not be read.
    #[error("cannot read metadata {path}: {source}")]
    Read {
        /// Sidecar path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The sidecar is not a JSON object of the expected shape.
    #[error("malformed metadata {path}: {source}")]
    Parse {
        /// Sidecar path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Fields of a downloader sidecar this crate cares about.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SidecarInfo {
    /// Human-readable title of the item.
    #[serde(default)]
    pub title: Option<String>,
}

/// Reads and parses a sidecar file.
///
/// # Errors
///
/// Returns [`MetadataError`] if the file cannot be read or parsed.
pub fn read_sidecar(path: &Path) -> Result<SidecarInfo, MetadataError> {
    let raw = fs::read_to_string(path).map_err(|source| MetadataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| MetadataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the display title for item `id`.
///
/// Uses the sidecar's `title` when it is present and survives sanitization,
/// otherwise the sanitized identifier.
#[must_use]
pub fn resolve_title(sidecar: Option<&Path>, id: &str) -> String {
    let Some(path) = sidecar else {
        debug!(id, "No sidecar, using identifier as title");
        return fallback_title(id);
    };

    match read_sidecar(path) {
        Ok(info) => title_or_id(info.title.as_deref(), id),
        Err(metadata_error) => {
            warn!(id, error = %metadata_error, "Metadata unusable, using identifier as title");
            fallback_title(id)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_sidecar(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("abc.info.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_resolve_title_uses_sanitized_sidecar_title() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, r#"{"id": "abc", "title": "Goal!\nOf the <Season>"}"#);
        assert_eq!(resolve_title(Some(&path), "abc"), "Goal Of the Season");
    }

    #[test]
    fn test_resolve_title_without_sidecar_uses_id() {
        assert_eq!(resolve_title(None, "abc"), "abc");
    }

    #[test]
    fn test_resolve_title_malformed_sidecar_uses_id() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, "{ not json");
        assert_eq!(resolve_title(Some(&path), "abc"), "abc");
    }

    #[test]
    fn test_resolve_title_missing_title_field_uses_id() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, r#"{"id": "abc", "duration": 12}"#);
        assert_eq!(resolve_title(Some(&path), "abc"), "abc");
    }

    #[test]
    fn test_resolve_title_non_string_title_uses_id() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, r#"{"title": 42}"#);
        assert_eq!(resolve_title(Some(&path), "abc"), "abc");
    }

    #[test]
    fn test_resolve_title_empty_title_uses_id() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, r#"{"title": ""}"#);
        assert_eq!(resolve_title(Some(&path), "abc"), "abc");
    }

    #[test]
    fn test_resolve_title_vanished_sidecar_uses_id() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.info.json");
        assert_eq!(resolve_title(Some(&path), "abc"), "abc");
    }

    #[test]
    fn test_read_sidecar_ignores_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, r#"{"title": "T", "formats": [1, 2, 3]}"#);
        let info = read_sidecar(&path).unwrap();
        assert_eq!(info.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_read_sidecar_bare_string_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_sidecar(&temp, r#""just a title""#);
        assert!(matches!(read_sidecar(&path), Err(MetadataError::Parse { .. })));
    }
}
