//! The playlist manifest handed to the rendering layer.
//!
//! A [`Manifest`] holds at most [`MAX_MANIFEST_ENTRIES`] entries in discovery
//! order. It is written once per run as pretty-printed JSON and replaced
//! atomically, so readers never observe a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Upper bound on manifest length.
pub const MAX_MANIFEST_ENTRIES: usize = 12;

/// Errors reading or writing a manifest file.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// JSON serialization failed.
    #[error("cannot serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The manifest file could not be written or moved into place.
    #[error("cannot write manifest {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest file could not be read.
    #[error("cannot read manifest {path}: {source}")]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest file is not an array of entries.
    #[error("malformed manifest {path}: {source}")]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The manifest file holds more entries than allowed.
    #[error("manifest {path} has {len} entries, max {MAX_MANIFEST_ENTRIES}")]
    TooLong {
        /// Manifest path.
        path: PathBuf,
        /// Number of entries found.
        len: usize,
    },
}

/// One playable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path of the media file relative to the public directory, `/`-separated.
    pub src: String,
    /// Sanitized display title.
    pub title: String,
}

impl ManifestEntry {
    #[must_use]
    pub fn new(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
        }
    }
}

/// Ordered, bounded list of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Keeps the first [`MAX_MANIFEST_ENTRIES`] entries, in order.
    #[must_use]
    pub fn from_entries(mut entries: Vec<ManifestEntry>) -> Self {
        if entries.len() > MAX_MANIFEST_ENTRIES {
            debug!(
                discovered = entries.len(),
                kept = MAX_MANIFEST_ENTRIES,
                "Truncating manifest"
            );
            entries.truncate(MAX_MANIFEST_ENTRIES);
        }
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry shown on display surface `ordinal`: surfaces cycle through the
    /// manifest. `None` when the manifest is empty.
    #[must_use]
    pub fn entry_for_surface(&self, ordinal: usize) -> Option<&ManifestEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(ordinal % self.entries.len())
    }

    /// Serializes as two-space indented JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        let mut json =
            serde_json::to_string_pretty(&self.entries).map_err(ManifestError::Serialize)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the manifest to `path` through a sibling temporary file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if serialization, writing, or the final rename fails.
    #[instrument(skip(self), fields(path = %path.display(), entries = self.len()))]
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = self.to_json()?;
        let tmp_path = temporary_path(path);
        let write_error = |source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&tmp_path, json).map_err(write_error)?;
        if let Err(source) = fs::rename(&tmp_path, path) {
            // Best-effort cleanup; the rename error is what gets reported.
            let _ = fs::remove_file(&tmp_path);
            return Err(write_error(source));
        }
        debug!("Manifest written");
        Ok(())
    }

    /// Reads a manifest written by [`Manifest::write`].
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the file is missing, malformed, or too long.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<ManifestEntry> =
            serde_json::from_str(&raw).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if entries.len() > MAX_MANIFEST_ENTRIES {
            return Err(ManifestError::TooLong {
                path: path.to_path_buf(),
                len: entries.len(),
            });
        }
        Ok(Self { entries })
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
