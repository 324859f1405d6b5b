//! Container types recognised as playable media.

use std::fmt;

/// Video container, ordered by preference (`Mp4` is best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerType {
    Mp4,
    Webm,
    Mkv,
    M4v,
}

impl ContainerType {
    /// All containers, most preferred first.
    pub const PRIORITY: [Self; 4] = [Self::Mp4, Self::Webm, Self::Mkv, Self::M4v];

    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
            Self::Mkv => "mkv",
            Self::M4v => "m4v",
        }
    }

    /// Classifies a file name by its suffix, ignoring ASCII case.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::PRIORITY.into_iter().find(|container| {
            lower
                .strip_suffix(container.extension())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
