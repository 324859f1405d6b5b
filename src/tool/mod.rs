//! External downloader abstraction.
//!
//! The pipeline only talks to a [`MediaFetcher`]: one capability query and one
//! fetch call. [`YtDlp`] runs the real tool; [`NoopFetcher`] stands in when
//! fetching is disabled, and tests substitute their own doubles.

mod error;
pub mod format;
mod ytdlp;

pub use error::FetchError;
pub use format::{FORMAT_PREFERENCE, format_selector};
pub use ytdlp::{DEFAULT_TOOL, YtDlp, build_fetch_args};

use std::path::Path;

use async_trait::async_trait;

/// Something that can place remote videos under the video root.
///
/// Implementations write each item to `<video_root>/<id>/<id>.<ext>` next to
/// an `<id>.info.json` sidecar, where `<id>` is chosen by the implementation.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Returns true if this fetcher can run in the current environment.
    async fn is_available(&self) -> bool;

    /// Fetches a single URL. Must not expand playlists.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when this URL could not be fetched; callers treat
    /// it as a per-item failure.
    async fn fetch(&self, url: &str, video_root: &Path) -> Result<(), FetchError>;
}

/// Fetcher that never fetches. Used for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFetcher;

#[async_trait]
impl MediaFetcher for NoopFetcher {
    fn name(&self) -> &str {
        "none"
    }

    async fn is_available(&self) -> bool {
        false
    }

    async fn fetch(&self, url: &str, _video_root: &Path) -> Result<(), FetchError> {
        Err(FetchError::unavailable(url))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_fetcher_is_never_available() {
        let fetcher = NoopFetcher;
        assert!(!fetcher.is_available().await);
        let err = fetcher
            .fetch("https://video.example/v/1", Path::new("video"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unavailable { .. }));
    }
}
