//! End-to-end manifest build.
//!
//! Order of operations: load sources, probe the downloader, fetch each URL
//! (only when the downloader is available), scan item directories, fall back
//! to a flat scan when nothing was found, then write the manifest.
//!
//! # Example
//!
//! ```no_run
//! use reelfetch_core::{Pipeline, ProjectLayout, YtDlp};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(ProjectLayout::new("."), Box::new(YtDlp::default()));
//! let report = pipeline.run().await?;
//! println!("Wrote {} entries", report.written);
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::PipelineError;

use std::fs;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::fetch::{FetchExecutor, FetchStats};
use crate::layout::{ProjectLayout, VIDEO_DIR_NAME};
use crate::manifest::{Manifest, ManifestEntry};
use crate::metadata::{resolve_title, title_from_file_name};
use crate::scan::{ScanError, scan_flat, scan_item_dirs};
use crate::source::load_sources;
use crate::tool::MediaFetcher;

/// Summary of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    /// Whether the downloader was usable.
    pub tool_available: bool,
    /// URLs fetched successfully.
    pub fetched: usize,
    /// URLs whose fetch failed.
    pub failed: usize,
    /// Entries found before truncation.
    pub discovered: usize,
    /// Whether the flat fallback scan produced the entries.
    pub used_fallback: bool,
    /// Entries written to the manifest.
    pub written: usize,
}

/// A configured manifest build.
pub struct Pipeline {
    layout: ProjectLayout,
    fetcher: Box<dyn MediaFetcher>,
    skip_fetch: bool,
    show_progress: bool,
}

impl Pipeline {
    /// Creates a pipeline writing under `layout` and fetching with `fetcher`.
    #[must_use]
    pub fn new(layout: ProjectLayout, fetcher: Box<dyn MediaFetcher>) -> Self {
        Self {
            layout,
            fetcher,
            skip_fetch: false,
            show_progress: false,
        }
    }

    /// Skips the probe and all fetches, using only files already on disk.
    #[must_use]
    pub fn with_skip_fetch(mut self, skip_fetch: bool) -> Self {
        self.skip_fetch = skip_fetch;
        self
    }

    /// Shows a progress bar while fetching.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Runs the pipeline once.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] for a bad source list, an unusable video root,
    /// no media after both scans, or a failed manifest write. Individual fetch
    /// and metadata failures are logged and do not fail the run.
    #[instrument(skip(self), fields(root = %self.layout.root().display()))]
    pub async fn run(&self) -> Result<PipelineReport, PipelineError> {
        let sources = load_sources(self.layout.sources_path())?;

        let video_root = self.layout.video_root();
        fs::create_dir_all(&video_root).map_err(|source| PipelineError::VideoRoot {
            path: video_root.clone(),
            source,
        })?;

        let tool_available = if self.skip_fetch {
            info!("Fetching disabled, using existing local videos");
            false
        } else {
            self.probe().await
        };

        let stats = if tool_available {
            FetchExecutor::new(self.fetcher.as_ref())
                .with_progress(self.show_progress)
                .fetch_all(&sources, &video_root)
                .await
        } else {
            FetchStats::new()
        };

        let mut entries = collect_item_entries(&video_root)?;
        let mut used_fallback = false;
        if entries.is_empty() {
            info!("No structured items found, scanning video root for loose files");
            entries = collect_loose_entries(&video_root)?;
            used_fallback = true;
        }

        if entries.is_empty() {
            return Err(PipelineError::NoMedia { video_root });
        }

        let discovered = entries.len();
        let manifest = Manifest::from_entries(entries);
        manifest.write(self.layout.manifest_path())?;
        info!(
            entries = manifest.len(),
            path = %self.layout.manifest_path().display(),
            "Wrote manifest"
        );

        Ok(PipelineReport {
            tool_available,
            fetched: stats.completed(),
            failed: stats.failed(),
            discovered,
            used_fallback,
            written: manifest.len(),
        })
    }

    async fn probe(&self) -> bool {
        let available = self.fetcher.is_available().await;
        if !available {
            warn!(
                tool = self.fetcher.name(),
                "Downloader not found. Skipping downloads and using existing local videos"
            );
        }
        available
    }
}

/// Entries for every `<video_root>/<id>/` directory holding a playable file.
///
/// # Errors
///
/// Returns [`ScanError`] if the video root cannot be listed.
pub fn collect_item_entries(video_root: &Path) -> Result<Vec<ManifestEntry>, ScanError> {
    let items = scan_item_dirs(video_root)?;
    Ok(items
        .into_iter()
        .filter_map(|media| {
            let chosen = media.preferred()?;
            let src = format!("{VIDEO_DIR_NAME}/{}/{}", media.id, chosen.file_name);
            let title = resolve_title(media.sidecar.as_deref(), &media.id);
            Some(ManifestEntry::new(src, title))
        })
        .collect())
}

/// Entries for media files lying directly in the video root.
///
/// # Errors
///
/// Returns [`ScanError`] if the video root cannot be listed.
pub fn collect_loose_entries(video_root: &Path) -> Result<Vec<ManifestEntry>, ScanError> {
    Ok(scan_flat(video_root)?
        .into_iter()
        .map(|media| {
            ManifestEntry::new(
                format!("{VIDEO_DIR_NAME}/{}", media.file_name),
                title_from_file_name(&media.file_name),
            )
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_collect_item_entries_builds_relative_src() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a").join("a.mp4"));
        touch(&temp.path().join("b").join("b.webm"));

        let entries = collect_item_entries(temp.path()).unwrap();
        assert_eq!(
            entries,
            [
                ManifestEntry::new("video/a/a.mp4", "a"),
                ManifestEntry::new("video/b/b.webm", "b"),
            ]
        );
    }

    #[test]
    fn test_collect_item_entries_uses_sidecar_title() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("xyz").join("xyz.mkv"));
        fs::write(
            temp.path().join("xyz").join("xyz.info.json"),
            r#"{"title": "Match highlights: round 3"}"#,
        )
        .unwrap();

        let entries = collect_item_entries(temp.path()).unwrap();
        assert_eq!(entries[0].title, "Match highlights round 3");
    }

    #[test]
    fn test_collect_loose_entries_titles_from_file_names() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("clip.mp4"));
        touch(&temp.path().join("Intro #1!.webm"));

        let entries = collect_loose_entries(temp.path()).unwrap();
        assert_eq!(
            entries,
            [
                ManifestEntry::new("video/Intro #1!.webm", "Intro 1"),
                ManifestEntry::new("video/clip.mp4", "clip"),
            ]
        );
    }
}
