//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reelfetch_core::{FetchError, MediaFetcher, ProjectLayout};
use tempfile::TempDir;

/// Test double for the external downloader.
///
/// Each URL's last path segment becomes the item id; the fetch writes
/// `<id>/<id>.mp4` and an `<id>.info.json` sidecar titled `Title <id>`.
/// URLs listed in `fail_on` fail without writing anything.
pub struct ScriptedFetcher {
    available: bool,
    fail_on: Vec<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedFetcher {
    pub fn available() -> Self {
        Self {
            available: true,
            fail_on: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    pub fn failing_on(mut self, url: &str) -> Self {
        self.fail_on.push(url.to_string());
        self
    }

    /// Handle to the recorded URLs that stays valid after the fetcher is boxed.
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl MediaFetcher for ScriptedFetcher {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn fetch(&self, url: &str, video_root: &Path) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail_on.iter().any(|u| u == url) {
            return Err(FetchError::failed(
                "scripted",
                url,
                "exit status: 1",
                "ERROR: Video unavailable",
            ));
        }
        let id = url.rsplit('/').next().unwrap_or("item");
        let dir = video_root.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{id}.mp4")), b"").unwrap();
        fs::write(
            dir.join(format!("{id}.info.json")),
            format!(r#"{{"id": "{id}", "title": "Title {id}"}}"#),
        )
        .unwrap();
        Ok(())
    }
}

/// Creates a temporary project root with the given source list.
pub fn project_with_sources(urls: &[&str]) -> (TempDir, ProjectLayout) {
    let temp = TempDir::new().unwrap();
    let layout = ProjectLayout::new(temp.path());
    fs::write(layout.sources_path(), serde_json::to_string(urls).unwrap()).unwrap();
    (temp, layout)
}

/// Creates an empty file, including parent directories.
pub fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}
