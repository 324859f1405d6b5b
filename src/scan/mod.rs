//! Discovery of media files under the video root.
//!
//! Two strategies share the same container rules:
//! - [`scan_item_dirs`] walks `<video_root>/<id>/` directories written by the
//!   fetcher and picks the best container per item plus its sidecar.
//! - [`scan_flat`] looks at media files placed directly in the video root. It
//!   is only used when the structured scan found nothing.
//!
//! Names are sorted before inspection so results do not depend on the order
//! the operating system returns directory entries in.

mod container;

pub use container::ContainerType;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Suffix of the metadata file the downloader writes next to each item.
pub const SIDECAR_SUFFIX: &str = ".info.json";

/// Errors reading the video root itself.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A directory could not be listed.
    #[error("cannot list directory {path}: {source}")]
    ReadDir {
        /// Directory that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A playable file found during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCandidate {
    /// File name inside its directory.
    pub file_name: String,
    /// Container classification.
    pub container: ContainerType,
}

/// Classification of one item directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredMedia {
    /// Item identifier (the directory name).
    pub id: String,
    /// Media files, best container first, then by name.
    pub candidates: Vec<MediaCandidate>,
    /// Sidecar metadata file, if one exists.
    pub sidecar: Option<PathBuf>,
}

impl DiscoveredMedia {
    /// The file to publish for this item.
    #[must_use]
    pub fn preferred(&self) -> Option<&MediaCandidate> {
        self.candidates.first()
    }
}

/// Lists entry names of `dir`, sorted. Non-UTF-8 names are skipped.
fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let read_dir = fs::read_dir(dir).map_err(|source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| ScanError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        match entry.file_name().into_string() {
            Ok(name) => entries.push((name, entry.path())),
            Err(raw) => debug!(name = ?raw, "Skipping non UTF-8 entry"),
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn media_candidates(entries: &[(String, PathBuf)]) -> Vec<MediaCandidate> {
    let mut candidates: Vec<MediaCandidate> = entries
        .iter()
        .filter(|(_, path)| path.is_file())
        .filter_map(|(name, _)| {
            ContainerType::from_file_name(name).map(|container| MediaCandidate {
                file_name: name.clone(),
                container,
            })
        })
        .collect();
    // Stable sort keeps name order within one container.
    candidates.sort_by_key(|c| c.container);
    candidates
}

/// Classifies the files of a single item directory.
///
/// # Errors
///
/// Returns [`ScanError`] if `dir` cannot be listed.
pub fn classify_item_dir(id: &str, dir: &Path) -> Result<DiscoveredMedia, ScanError> {
    let entries = sorted_entries(dir)?;
    let sidecar = entries
        .iter()
        .find(|(name, path)| name.ends_with(SIDECAR_SUFFIX) && path.is_file())
        .map(|(_, path)| path.clone());

    Ok(DiscoveredMedia {
        id: id.to_string(),
        candidates: media_candidates(&entries),
        sidecar,
    })
}

/// Scans every immediate subdirectory of `video_root`.
///
/// Directories without a media file are skipped. A subdirectory that cannot be
/// listed is logged and skipped as well.
///
/// # Errors
///
/// Returns [`ScanError`] only if `video_root` itself cannot be listed.
#[instrument(fields(video_root = %video_root.display()))]
pub fn scan_item_dirs(video_root: &Path) -> Result<Vec<DiscoveredMedia>, ScanError> {
    let mut items = Vec::new();
    for (id, path) in sorted_entries(video_root)? {
        if !path.is_dir() {
            continue;
        }
        let media = match classify_item_dir(&id, &path) {
            Ok(media) => media,
            Err(scan_error) => {
                warn!(id = %id, error = %scan_error, "Skipping unreadable item directory");
                continue;
            }
        };
        if media.preferred().is_none() {
            debug!(id = %id, "No playable media in item directory");
            continue;
        }
        items.push(media);
    }
    debug!(count = items.len(), "Structured scan finished");
    Ok(items)
}

/// Finds media files placed directly in `video_root`, in name order.
///
/// # Errors
///
/// Returns [`ScanError`] if `video_root` cannot be listed.
#[instrument(fields(video_root = %video_root.display()))]
pub fn scan_flat(video_root: &Path) -> Result<Vec<MediaCandidate>, ScanError> {
    let entries = sorted_entries(video_root)?;
    let found: Vec<MediaCandidate> = entries
        .iter()
        .filter(|(_, path)| path.is_file())
        .filter_map(|(name, _)| {
            ContainerType::from_file_name(name).map(|container| MediaCandidate {
                file_name: name.clone(),
                container,
            })
        })
        .collect();
    debug!(count = found.len(), "Flat scan finished");
    Ok(found)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_classify_prefers_mp4_over_webm() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("x.webm"));
        touch(&temp.path().join("x.mp4"));

        let media = classify_item_dir("x", temp.path()).unwrap();
        assert_eq!(media.preferred().unwrap().file_name, "x.mp4");
        assert_eq!(media.candidates.len(), 2);
        assert_eq!(media.candidates[1].container, ContainerType::Webm);
    }

    #[test]
    fn test_classify_priority_chain_mkv_over_m4v() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.m4v"));
        touch(&temp.path().join("b.mkv"));

        let media = classify_item_dir("x", temp.path()).unwrap();
        assert_eq!(media.preferred().unwrap().file_name, "b.mkv");
    }

    #[test]
    fn test_classify_uppercase_extension_matches() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("CLIP.MP4"));

        let media = classify_item_dir("clip", temp.path()).unwrap();
        assert_eq!(media.preferred().unwrap().file_name, "CLIP.MP4");
    }

    #[test]
    fn test_classify_finds_sidecar() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("abc.mp4"));
        touch(&temp.path().join("abc.info.json"));

        let media = classify_item_dir("abc", temp.path()).unwrap();
        assert_eq!(media.sidecar, Some(temp.path().join("abc.info.json")));
    }

    #[test]
    fn test_classify_missing_sidecar_is_none() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("abc.mp4"));

        let media = classify_item_dir("abc", temp.path()).unwrap();
        assert!(media.sidecar.is_none());
    }

    #[test]
    fn test_scan_item_dirs_skips_dirs_without_media() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a").join("a.mp4"));
        touch(&temp.path().join("b").join("b.info.json"));
        touch(&temp.path().join("c").join("c.webm"));
        touch(&temp.path().join("loose.mp4"));

        let items = scan_item_dirs(temp.path()).unwrap();
        let ids: Vec<_> = items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_scan_item_dirs_ignores_directory_named_like_media() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a").join("fake.mp4")).unwrap();

        let items = scan_item_dirs(temp.path()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_scan_item_dirs_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        let err = scan_item_dirs(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScanError::ReadDir { .. }));
    }

    #[test]
    fn test_scan_flat_lists_root_media_in_name_order() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("zeta.webm"));
        touch(&temp.path().join("alpha.mp4"));
        touch(&temp.path().join("notes.txt"));
        touch(&temp.path().join("item").join("item.mp4"));

        let found = scan_flat(temp.path()).unwrap();
        let names: Vec<_> = found.iter().map(|m| m.file_name.as_str()).collect();
        assert_eq!(names, ["alpha.mp4", "zeta.webm"]);
    }
}
