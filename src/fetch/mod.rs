//! Sequential fetch of every source URL with per-item failure isolation.
//!
//! URLs are fetched one at a time, each fully completing before the next
//! starts. A failure is logged with its URL and the tool's diagnostic and
//! counted; it never stops the remaining URLs.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, instrument};
use url::Url;

use crate::source::SourceList;
use crate::tool::MediaFetcher;

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Outcome counts for one fetch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    completed: usize,
    failed: usize,
}

impl FetchStats {
    /// Creates a stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs the tool reported as fetched.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Number of URLs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of URLs attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }
}

/// Runs a [`MediaFetcher`] over a [`SourceList`].
pub struct FetchExecutor<'a> {
    fetcher: &'a dyn MediaFetcher,
    show_progress: bool,
}

impl<'a> FetchExecutor<'a> {
    /// Creates an executor without a progress bar.
    #[must_use]
    pub fn new(fetcher: &'a dyn MediaFetcher) -> Self {
        Self {
            fetcher,
            show_progress: false,
        }
    }

    /// Enables the terminal progress bar.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Fetches every URL in order into `video_root`.
    #[instrument(skip_all, fields(tool = self.fetcher.name(), count = sources.len()))]
    pub async fn fetch_all(&self, sources: &SourceList, video_root: &Path) -> FetchStats {
        let mut stats = FetchStats::new();
        let total = sources.len();
        let progress = self.progress_bar();

        for (index, url) in sources.iter().enumerate() {
            progress.set_message(format!(
                "[{}/{}] Fetching {}",
                index + 1,
                total,
                host_label(url)
            ));
            progress.suspend(|| info!(url, "Downloading"));

            match self.fetcher.fetch(url, video_root).await {
                Ok(()) => stats.completed += 1,
                Err(fetch_error) => {
                    progress.suspend(|| {
                        error!(
                            url,
                            diagnostic = %fetch_error.diagnostic(),
                            "Failed to download"
                        );
                    });
                    stats.failed += 1;
                }
            }
        }

        progress.finish_and_clear();
        info!(
            completed = stats.completed(),
            failed = stats.failed(),
            "Fetch pass finished"
        );
        stats
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        // Keeps spinning while a single long download blocks this task.
        spinner.enable_steady_tick(SPINNER_TICK);
        spinner
    }
}

fn host_label(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
        .unwrap_or_else(|| url.to_string())
}
