//! Error types for external downloader invocations.

use thiserror::Error;

/// A failed fetch of a single URL. Always recovered by the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The downloader process could not be started.
    #[error("failed to start {program} for {url}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// The URL being fetched.
        url: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The downloader ran and reported failure.
    #[error("{program} failed for {url} ({status}): {diagnostic}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// The URL being fetched.
        url: String,
        /// Exit status description.
        status: String,
        /// Last diagnostic line printed by the tool.
        diagnostic: String,
    },

    /// The fetcher cannot fetch at all in this environment.
    #[error("no downloader available to fetch {url}")]
    Unavailable {
        /// The URL that was requested.
        url: String,
    },
}

impl FetchError {
    /// Creates a spawn error.
    pub fn spawn(program: impl Into<String>, url: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            url: url.into(),
            source,
        }
    }

    /// Creates a tool failure error.
    pub fn failed(
        program: impl Into<String>,
        url: impl Into<String>,
        status: impl Into<String>,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self::Failed {
            program: program.into(),
            url: url.into(),
            status: status.into(),
            diagnostic: diagnostic.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(url: impl Into<String>) -> Self {
        Self::Unavailable { url: url.into() }
    }

    /// Tool-provided diagnostic text, or the error description when the tool said nothing.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Failed { diagnostic, .. } => diagnostic.clone(),
            Self::Spawn { source, .. } => source.to_string(),
            Self::Unavailable { .. } => self.to_string(),
        }
    }
}
