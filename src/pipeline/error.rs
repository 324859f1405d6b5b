//! Fatal pipeline errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::ManifestError;
use crate::scan::ScanError;
use crate::source::ConfigError;

/// Errors that stop a run. Everything else is recovered per item.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source list is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The video root could not be created.
    #[error("cannot create video directory {path}: {source}")]
    VideoRoot {
        /// Video root path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The video root could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Neither scanning strategy found a playable file.
    #[error("no videos found in {video_root} after download")]
    NoMedia {
        /// Video root that was scanned.
        video_root: PathBuf,
    },

    /// The manifest could not be written.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
