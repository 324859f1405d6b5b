//! `yt-dlp` process backend.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use super::format::{MERGE_OUTPUT_FORMAT, OUTPUT_TEMPLATE, format_selector};
use super::{FetchError, MediaFetcher};

/// Default executable name, looked up on `PATH`.
pub const DEFAULT_TOOL: &str = "yt-dlp";

/// Runs an installed `yt-dlp` (or a compatible executable) as a child process.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: PathBuf,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl YtDlp {
    /// Creates a backend that invokes `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the configured program.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn program_label(&self) -> String {
        self.program.display().to_string()
    }
}

/// Builds the argument list for fetching `url` into `video_root`.
#[must_use]
pub fn build_fetch_args(url: &str, video_root: &Path) -> Vec<OsString> {
    let template = video_root.join(OUTPUT_TEMPLATE[0]).join(OUTPUT_TEMPLATE[1]);
    vec![
        "-o".into(),
        template.into_os_string(),
        "-f".into(),
        format_selector().into(),
        "--merge-output-format".into(),
        MERGE_OUTPUT_FORMAT.into(),
        "--no-warnings".into(),
        "--write-info-json".into(),
        "--no-playlist".into(),
        url.into(),
    ]
}

/// Picks the last non-empty line of the tool's stderr as its diagnostic.
fn last_diagnostic_line(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(
            || format!("no diagnostic output ({})", output.status),
            ToString::to_string,
        )
}

#[async_trait]
impl MediaFetcher for YtDlp {
    fn name(&self) -> &str {
        self.program.to_str().unwrap_or(DEFAULT_TOOL)
    }

    #[instrument(skip(self), fields(program = %self.program.display()))]
    async fn is_available(&self) -> bool {
        let result = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                debug!(version = %version.trim(), "Downloader available");
                true
            }
            Ok(output) => {
                debug!(status = %output.status, "Downloader version query failed");
                false
            }
            Err(error) => {
                debug!(error = %error, "Downloader could not be started");
                false
            }
        }
    }

    #[instrument(skip(self, video_root), fields(program = %self.program.display()))]
    async fn fetch(&self, url: &str, video_root: &Path) -> Result<(), FetchError> {
        let output = Command::new(&self.program)
            .args(build_fetch_args(url, video_root))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| FetchError::spawn(self.program_label(), url, e))?;

        if output.status.success() {
            debug!("Downloader finished");
            return Ok(());
        }

        Err(FetchError::failed(
            self.program_label(),
            url,
            output.status.to_string(),
            last_diagnostic_line(&output),
        ))
    }
}
