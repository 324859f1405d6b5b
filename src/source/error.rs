//! Error types for loading the source list.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that make the source list unusable. All of them are fatal for a run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input file could not be read (missing, permissions, ...).
    #[error("cannot read source list {path}: {source}")]
    Read {
        /// Path of the input file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("source list {path} is not valid JSON: {source}")]
    Parse {
        /// Path of the input file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The top-level JSON value is not an array.
    #[error("source list {path} must be a JSON array of URLs, found {found}")]
    NotAnArray {
        /// Path of the input file.
        path: PathBuf,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// The array has no entries.
    #[error("source list {path} must be a non-empty array of URLs")]
    Empty {
        /// Path of the input file.
        path: PathBuf,
    },

    /// One entry is not a non-blank string.
    #[error("source list {path}: entry {index} is invalid: {reason}")]
    InvalidEntry {
        /// Path of the input file.
        path: PathBuf,
        /// Zero-based position of the entry.
        index: usize,
        /// Why the entry was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a JSON parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid entry error.
    pub fn invalid_entry(path: impl Into<PathBuf>, index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            path: path.into(),
            index,
            reason: reason.into(),
        }
    }
}
