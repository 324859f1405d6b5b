//! Filesystem layout for a single pipeline run.
//!
//! Every component receives its paths from a [`ProjectLayout`] instead of
//! resolving them on its own, so a run can be redirected to any root
//! (tests point it at a temporary directory).

use std::path::{Path, PathBuf};

/// Default input list file name, relative to the project root.
pub const SOURCES_FILE_NAME: &str = "videos.remote.json";

/// Default manifest file name, relative to the project root.
pub const MANIFEST_FILE_NAME: &str = "videos.json";

/// Directory served to the rendering layer, relative to the project root.
pub const PUBLIC_DIR_NAME: &str = "public";

/// Media directory inside the public directory. Manifest `src` values start with it.
pub const VIDEO_DIR_NAME: &str = "video";

/// Resolved paths for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    sources_path: PathBuf,
    manifest_path: PathBuf,
}

impl ProjectLayout {
    /// Creates a layout with default file names under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            sources_path: root.join(SOURCES_FILE_NAME),
            manifest_path: root.join(MANIFEST_FILE_NAME),
            root,
        }
    }

    /// Overrides the input list location.
    #[must_use]
    pub fn with_sources_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources_path = path.into();
        self
    }

    /// Overrides the manifest location.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn sources_path(&self) -> &Path {
        &self.sources_path
    }

    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// `<root>/public`
    #[must_use]
    pub fn public_dir(&self) -> PathBuf {
        self.root.join(PUBLIC_DIR_NAME)
    }

    /// `<root>/public/video`
    #[must_use]
    pub fn video_root(&self) -> PathBuf {
        self.public_dir().join(VIDEO_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults_derive_from_root() {
        let layout = ProjectLayout::new("/srv/site");
        assert_eq!(layout.root(), Path::new("/srv/site"));
        assert_eq!(
            layout.sources_path(),
            Path::new("/srv/site/videos.remote.json")
        );
        assert_eq!(layout.manifest_path(), Path::new("/srv/site/videos.json"));
        assert_eq!(layout.public_dir(), PathBuf::from("/srv/site/public"));
        assert_eq!(layout.video_root(), PathBuf::from("/srv/site/public/video"));
    }

    #[test]
    fn test_layout_overrides_keep_video_root() {
        let layout = ProjectLayout::new("/srv/site")
            .with_sources_path("/etc/links.json")
            .with_manifest_path("/tmp/out.json");
        assert_eq!(layout.sources_path(), Path::new("/etc/links.json"));
        assert_eq!(layout.manifest_path(), Path::new("/tmp/out.json"));
        assert_eq!(layout.video_root(), PathBuf::from("/srv/site/public/video"));
    }
}
